//! Emitter backed by printpdf and the PDF base-14 Helvetica fonts.

use std::io::{self, BufWriter};

use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point,
};

use super::Emitter;
use crate::error::EmitError;
use crate::layout::{Document, DrawOp, FontWeight, RuleOp, TextOp, MM_PER_PT};

const LAYER_NAME: &str = "Resume";

fn pdf_error(err: impl std::fmt::Display) -> EmitError {
    EmitError::Pdf(err.to_string())
}

/// Writes documents with the standard Helvetica family, which every PDF reader provides.
///
/// The layout engine's [`StandardMetrics`](crate::layout::StandardMetrics) use
/// the same advance widths, so measured and printed text line up exactly.
#[derive(Clone, Debug)]
pub struct BuiltinEmitter {
    title: String,
}

impl BuiltinEmitter {
    /// Creates an emitter that stamps `title` into the document metadata.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
            FontWeight::Italic => &self.italic,
        }
    }
}

impl Emitter for BuiltinEmitter {
    fn emit(&self, document: &Document) -> Result<Vec<u8>, EmitError> {
        let geometry = *document.geometry();
        let (pdf, first_page, first_layer) = PdfDocument::new(
            self.title.as_str(),
            Mm(geometry.width),
            Mm(geometry.height),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: pdf
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: pdf
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
            italic: pdf
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(pdf_error)?,
        };

        for (index, page) in document.pages().iter().enumerate() {
            let layer = if index == 0 {
                pdf.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_index, layer_index) =
                    pdf.add_page(Mm(geometry.width), Mm(geometry.height), LAYER_NAME);
                pdf.get_page(page_index).get_layer(layer_index)
            };

            for op in page.ops() {
                match op {
                    DrawOp::Text(text) => draw_text(&layer, &fonts, text, geometry.height),
                    DrawOp::Rule(rule) => draw_rule(&layer, rule, geometry.height),
                }
            }
        }

        let mut writer = BufWriter::new(io::Cursor::new(Vec::new()));
        pdf.save(&mut writer).map_err(pdf_error)?;
        let cursor = writer
            .into_inner()
            .map_err(|err| pdf_error(err.into_error()))?;
        Ok(cursor.into_inner())
    }
}

/// Baseline of text centred in a line box, measured from the top of the page.
///
/// Same placement rule as a classic FPDF cell: half the box height plus 30% of
/// the font size below the top of the box.
pub(crate) fn baseline(text: &TextOp) -> f64 {
    text.y + 0.5 * text.height + 0.3 * text.style.size_pt * MM_PER_PT
}

fn draw_text(layer: &PdfLayerReference, fonts: &Fonts, text: &TextOp, page_height: f64) {
    layer.use_text(
        text.text.as_str(),
        text.style.size_pt,
        Mm(text.x),
        Mm(page_height - baseline(text)),
        fonts.get(text.style.weight),
    );
}

fn draw_rule(layer: &PdfLayerReference, rule: &RuleOp, page_height: f64) {
    let y = Mm(page_height - rule.y);
    let line = Line {
        points: vec![(Point::new(Mm(rule.x1), y), false), (Point::new(Mm(rule.x2), y), false)],
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    };
    layer.set_outline_color(Color::Greyscale(Greyscale::new(
        f64::from(rule.gray) / 255.0,
        None,
    )));
    layer.set_outline_thickness(rule.thickness / MM_PER_PT);
    layer.add_shape(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PageGeometry, TextStyle};

    #[test]
    fn baseline_sits_inside_the_line_box() {
        let text = TextOp {
            x: 10.0,
            y: 20.0,
            width: 5.0,
            height: 5.0,
            text: "x".into(),
            style: TextStyle::regular(10.0),
        };
        let y = baseline(&text);
        assert!(y > text.y && y < text.y + text.height);
    }

    #[test]
    fn emits_a_pdf_header() {
        let document = crate::layout::render_document(
            &crate::sanitize::sanitize(&crate::model::Resume::new(
                crate::model::Header::new("Jane Doe", "Engineer", "jane@x.com", "555-0100"),
                Vec::new(),
            )),
            None,
        );
        assert_eq!(*document.geometry(), PageGeometry::A4);
        let bytes = BuiltinEmitter::new("Jane Doe").emit(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
