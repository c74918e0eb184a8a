//! Resume PDF generation.
//!
//! A resume is read from YAML ([`schema`]), normalized for PDF text
//! ([`sanitize`]), laid out onto pages ([`layout`]) and written as PDF by an
//! [`emit::Emitter`].  [`pipeline::generate`] runs the whole chain and writes
//! the full resume plus a short variant limited to the leading roles.

pub mod config;
pub mod emit;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod schema;

pub use config::Config;
pub use error::{ConfigError, EmitError, Error, LoadError, ValidationError, Violation};
pub use model::{EmploymentKind, Header, Resume, Role, YearMonth};
pub use pipeline::generate;
