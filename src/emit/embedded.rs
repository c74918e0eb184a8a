//! Emitter backed by genpdf with TrueType fonts embedded in the file.

use std::path::Path;

use genpdf::elements::PageBreak;
use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

use super::Emitter;
use crate::error::EmitError;
use crate::fonts;
use crate::layout::{Document, DrawOp, FontWeight, Page, RuleOp, TextOp};

fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Writes documents with a TrueType family located by [`crate::fonts`].
///
/// Line breaks were decided with the Helvetica metrics, and metric-compatible
/// families such as LiberationSans or Arial keep every line inside its box.
pub struct EmbeddedEmitter {
    title: String,
    family: FontFamily<FontData>,
}

impl EmbeddedEmitter {
    /// Creates an emitter using an already loaded font family.
    pub fn new(title: impl Into<String>, family: FontFamily<FontData>) -> Self {
        Self {
            title: title.into(),
            family,
        }
    }

    /// Locates the font family (see [`fonts::default_font_family`]) and creates an emitter.
    pub fn load(title: impl Into<String>, fonts_dir: Option<&Path>) -> Result<Self, EmitError> {
        let family = fonts::default_font_family(fonts_dir)?;
        Ok(Self::new(title, family))
    }
}

impl Emitter for EmbeddedEmitter {
    fn emit(&self, document: &Document) -> Result<Vec<u8>, EmitError> {
        let geometry = document.geometry();
        let mut pdf = genpdf::Document::new(self.family.clone());
        pdf.set_title(self.title.clone());
        pdf.set_paper_size(Size::new(mm(geometry.width), mm(geometry.height)));

        for (index, page) in document.pages().iter().enumerate() {
            if index > 0 {
                pdf.push(PageBreak::new());
            }
            pdf.push(PageCanvas::new(page.clone()));
        }

        let mut bytes = Vec::new();
        pdf.render(&mut bytes)?;
        Ok(bytes)
    }
}

/// Draws one laid-out page at absolute positions inside the page area.
struct PageCanvas {
    page: Page,
}

impl PageCanvas {
    fn new(page: Page) -> Self {
        Self { page }
    }

    fn draw_text(
        context: &genpdf::Context,
        area: &render::Area<'_>,
        text: &TextOp,
    ) -> Result<(), Error> {
        let mut style = Style::new();
        style.set_font_size(text.style.size_pt.round() as u8);
        match text.style.weight {
            FontWeight::Regular => {}
            FontWeight::Bold => style.set_bold(),
            FontWeight::Italic => style.set_italic(),
        }

        let line_height: printpdf::Mm = style.line_height(&context.font_cache).into();
        let top = text.y + (text.height - line_height.0) / 2.0;
        if let Some(mut section) =
            area.text_section(&context.font_cache, Position::new(mm(text.x), mm(top)), style)
        {
            section.print_str(&text.text, style)?;
        }
        Ok(())
    }

    fn draw_rule(area: &render::Area<'_>, rule: &RuleOp) {
        area.draw_line(
            vec![
                Position::new(mm(rule.x1), mm(rule.y)),
                Position::new(mm(rule.x2), mm(rule.y)),
            ],
            Style::new().with_color(Color::Greyscale(rule.gray)),
        );
    }
}

impl Element for PageCanvas {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        for op in self.page.ops() {
            match op {
                DrawOp::Text(text) => Self::draw_text(context, &area, text)?,
                DrawOp::Rule(rule) => Self::draw_rule(&area, rule),
            }
        }

        let mut result = RenderResult::default();
        result.size = area.size();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render_document;
    use crate::model::{Header, Resume, Role, YearMonth};
    use crate::sanitize::sanitize;

    #[test]
    fn embeds_fonts_when_available() {
        if !fonts::fonts_available(None) {
            eprintln!(
                "Skipping embeds_fonts_when_available: fonts missing. Set {} or copy assets/fonts next to the binary.",
                fonts::FONTS_DIR_ENV
            );
            return;
        }

        let start: YearMonth = "2020-01".parse().unwrap();
        let resume = sanitize(&Resume::new(
            Header::new("Jane Doe", "Engineer", "jane@x.com", "555-0100"),
            vec![Role::new("Engineer", "Acme", start).with_done("- Shipped things")],
        ));
        let document = render_document(&resume, None);

        let bytes = EmbeddedEmitter::load("Jane Doe", None)
            .unwrap()
            .emit(&document)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(b"/FontFile".len()).any(|w| w == b"/FontFile"));
    }
}
