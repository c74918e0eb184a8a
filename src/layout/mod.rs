//! Turning a sanitized resume into positioned page primitives.

pub mod document;
pub mod engine;
pub mod metrics;
pub mod wrap;

pub use document::{
    Cursor, Document, DrawOp, FontWeight, Page, PageGeometry, RoleSpan, RuleOp, TextOp, TextStyle,
};
pub use engine::{company_line, header_lines, render_document, LayoutEngine};
pub use metrics::{StandardMetrics, TextMeasure, MM_PER_PT};
pub use wrap::{paragraphs, wrap_text, Paragraph};
