//! Pagination and drawing of a resume onto fixed-size pages.
//!
//! Every role is measured before it is drawn.  When the block would cross the
//! printable bottom of the current page, the page is closed with its footer and
//! the block starts at the top of a new page, so a role is never split.  Only
//! the first page carries the name header; every page gets a `Page n` footer.

use log::{debug, warn};

use super::document::{
    Cursor, Document, DrawOp, Page, PageGeometry, RoleSpan, RuleOp, TextOp, TextStyle,
};
use super::metrics::{StandardMetrics, TextMeasure};
use super::wrap::{paragraphs, wrap_text, Paragraph};
use crate::model::{Header, Resume, Role};

const NAME_STYLE: TextStyle = TextStyle::bold(18.0);
const NAME_HEIGHT: f64 = 8.0;
const TAGLINE_STYLE: TextStyle = TextStyle::regular(11.0);
const TAGLINE_HEIGHT: f64 = 6.0;
const CONTACT_STYLE: TextStyle = TextStyle::regular(9.0);
const CONTACT_HEIGHT: f64 = 5.0;
const HEADER_RULE_GAP: f64 = 2.0;
const HEADER_GAP: f64 = 6.0;
const HEADER_RULE_GRAY: u8 = 50;

const TITLE_STYLE: TextStyle = TextStyle::bold(12.0);
const DATES_STYLE: TextStyle = TextStyle::regular(10.0);
const TITLE_HEIGHT: f64 = 6.0;
const COMPANY_STYLE: TextStyle = TextStyle::italic(10.0);
const COMPANY_HEIGHT: f64 = 6.0;
const BODY_STYLE: TextStyle = TextStyle::regular(10.0);
const BODY_HEIGHT: f64 = 5.0;
const BULLET_INDENT: f64 = 6.0;
const BULLET_MARKER: &str = "-";
const BULLET_MARKER_WIDTH: f64 = 6.0;
const BODY_GAP: f64 = 2.0;
const STACK_STYLE: TextStyle = TextStyle::italic(9.0);
const STACK_HEIGHT: f64 = 5.0;
const ROLE_GAP: f64 = 6.0;

const FOOTER_STYLE: TextStyle = TextStyle::italic(8.0);
const FOOTER_RULE_GAP: f64 = 2.0;
const FOOTER_HEIGHT: f64 = 8.0;
const FOOTER_RULE_GRAY: u8 = 200;

const RULE_THICKNESS: f64 = 0.25;

/// One wrapped line of a role's accomplishments block.
#[derive(Clone, Debug, PartialEq)]
enum BodyLine {
    Blank,
    Plain(String),
    Bullet { text: String, first: bool },
}

/// Lays out resumes onto pages using a [`TextMeasure`] for line breaking.
#[derive(Clone, Debug)]
pub struct LayoutEngine<M = StandardMetrics> {
    measure: M,
    geometry: PageGeometry,
}

impl LayoutEngine<StandardMetrics> {
    /// Creates an engine for A4 pages measured with the built-in Helvetica metrics.
    pub fn standard() -> Self {
        Self::new(StandardMetrics, PageGeometry::A4)
    }
}

impl Default for LayoutEngine<StandardMetrics> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<M: TextMeasure> LayoutEngine<M> {
    /// Creates an engine with the given metrics and page geometry.
    pub fn new(measure: M, geometry: PageGeometry) -> Self {
        Self { measure, geometry }
    }

    /// Returns the page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Lays out `resume`, keeping only the first `max_roles` roles when given.
    pub fn render(&self, resume: &Resume, max_roles: Option<usize>) -> Document {
        let roles = resume.leading_roles(max_roles);
        let bottom = self.geometry.printable_bottom();
        let mut pages = PageSet::new(self.geometry);

        let mut cursor = self.draw_header(
            pages.current(),
            Cursor::at(self.geometry.margin_top),
            resume.header(),
        );

        for (index, role) in roles.iter().enumerate() {
            let height = self.measure_role(role);
            if cursor.y + height > bottom && cursor.y > self.geometry.margin_top {
                debug!(
                    "role {} needs {:.1}mm but only {:.1}mm remain; starting page {}",
                    index,
                    height,
                    bottom - cursor.y,
                    pages.len() + 1
                );
                cursor = self.break_page(&mut pages);
            }
            if cursor.y + height > bottom {
                warn!(
                    "role '{}' at {} needs {:.1}mm, more than a whole page; it will overflow the bottom margin",
                    role.role(),
                    role.company(),
                    height
                );
            }

            let top = cursor;
            cursor = self.draw_role(pages.current(), cursor, role);
            pages.current().push_role(RoleSpan {
                index,
                top: top.y,
                bottom: cursor.y,
            });
        }

        self.draw_footer(pages.current());
        let document = pages.finish();
        debug!(
            "laid out {} roles on {} pages",
            document.role_count(),
            document.page_count()
        );
        document
    }

    /// Height a role block occupies, trailing gap included.
    pub fn measure_role(&self, role: &Role) -> f64 {
        let body = self.body_lines(role.done()).len() as f64 * BODY_HEIGHT;
        let stack = self.stack_lines(role.stack()).len() as f64 * STACK_HEIGHT;
        TITLE_HEIGHT + COMPANY_HEIGHT + body + BODY_GAP + stack + ROLE_GAP
    }

    /// Closes the current page and returns the cursor at the top of the next one.
    fn break_page(&self, pages: &mut PageSet) -> Cursor {
        self.draw_footer(pages.current());
        pages.open_next();
        Cursor::at(self.geometry.margin_top)
    }

    fn body_lines(&self, done: &str) -> Vec<BodyLine> {
        let full = self.geometry.content_width();
        let bullet_width = full - BULLET_INDENT - BULLET_MARKER_WIDTH;
        let mut lines = Vec::new();

        for paragraph in paragraphs(done) {
            match paragraph {
                Paragraph::Blank => lines.push(BodyLine::Blank),
                Paragraph::Plain(text) => lines.extend(
                    wrap_text(&self.measure, text, BODY_STYLE, full)
                        .into_iter()
                        .map(BodyLine::Plain),
                ),
                Paragraph::Bullet(text) => {
                    let mut wrapped = wrap_text(&self.measure, text, BODY_STYLE, bullet_width);
                    if wrapped.is_empty() {
                        wrapped.push(String::new());
                    }
                    lines.extend(wrapped.into_iter().enumerate().map(|(i, text)| {
                        BodyLine::Bullet {
                            text,
                            first: i == 0,
                        }
                    }));
                }
            }
        }
        lines
    }

    fn stack_lines(&self, stack: &str) -> Vec<String> {
        if stack.trim().is_empty() {
            return Vec::new();
        }
        wrap_text(
            &self.measure,
            &format!("Stack: {}", stack.trim()),
            STACK_STYLE,
            self.geometry.content_width(),
        )
    }

    fn draw_header(&self, page: &mut Page, cursor: Cursor, header: &Header) -> Cursor {
        let (name, tagline) = header_lines(header);
        let mut cursor = self.centered(page, cursor, &name, NAME_STYLE, NAME_HEIGHT);
        if let Some(tagline) = tagline {
            cursor = self.centered(page, cursor, &tagline, TAGLINE_STYLE, TAGLINE_HEIGHT);
        }
        if !header.contact().is_empty() {
            cursor = self.centered(page, cursor, header.contact(), CONTACT_STYLE, CONTACT_HEIGHT);
        }
        let cursor = self.rule(page, cursor.advance(HEADER_RULE_GAP), HEADER_RULE_GRAY);
        cursor.advance(HEADER_GAP)
    }

    fn draw_role(&self, page: &mut Page, cursor: Cursor, role: &Role) -> Cursor {
        let left = self.geometry.margin_left;

        self.text(page, cursor, left, role.role(), TITLE_STYLE, TITLE_HEIGHT);
        let dates_width = self.measure.text_width(role.dates(), DATES_STYLE);
        let cursor = self.text(
            page,
            cursor,
            self.geometry.content_right() - dates_width,
            role.dates(),
            DATES_STYLE,
            TITLE_HEIGHT,
        );

        let cursor = self.text(
            page,
            cursor,
            left,
            &company_line(role),
            COMPANY_STYLE,
            COMPANY_HEIGHT,
        );

        let mut cursor = cursor;
        for line in self.body_lines(role.done()) {
            cursor = match line {
                BodyLine::Blank => cursor.advance(BODY_HEIGHT),
                BodyLine::Plain(text) => {
                    self.text(page, cursor, left, &text, BODY_STYLE, BODY_HEIGHT)
                }
                BodyLine::Bullet { text, first } => {
                    if first {
                        self.text(
                            page,
                            cursor,
                            left + BULLET_INDENT,
                            BULLET_MARKER,
                            BODY_STYLE,
                            BODY_HEIGHT,
                        );
                    }
                    self.text(
                        page,
                        cursor,
                        left + BULLET_INDENT + BULLET_MARKER_WIDTH,
                        &text,
                        BODY_STYLE,
                        BODY_HEIGHT,
                    )
                }
            };
        }
        cursor = cursor.advance(BODY_GAP);

        for line in self.stack_lines(role.stack()) {
            cursor = self.text(page, cursor, left, &line, STACK_STYLE, STACK_HEIGHT);
        }
        cursor.advance(ROLE_GAP)
    }

    fn draw_footer(&self, page: &mut Page) {
        let y = self.geometry.height - self.geometry.footer_offset;
        let cursor = self.rule(page, Cursor::at(y), FOOTER_RULE_GRAY);
        let label = format!("Page {}", page.number());
        self.centered(
            page,
            cursor.advance(FOOTER_RULE_GAP),
            &label,
            FOOTER_STYLE,
            FOOTER_HEIGHT,
        );
    }

    /// Draws one line of text at `x` and returns the cursor below its line box.
    fn text(
        &self,
        page: &mut Page,
        cursor: Cursor,
        x: f64,
        text: &str,
        style: TextStyle,
        height: f64,
    ) -> Cursor {
        if !text.is_empty() {
            page.push(DrawOp::Text(TextOp {
                x,
                y: cursor.y,
                width: self.measure.text_width(text, style),
                height,
                text: text.to_owned(),
                style,
            }));
        }
        cursor.advance(height)
    }

    fn centered(
        &self,
        page: &mut Page,
        cursor: Cursor,
        text: &str,
        style: TextStyle,
        height: f64,
    ) -> Cursor {
        let width = self.measure.text_width(text, style);
        let x = self.geometry.margin_left + (self.geometry.content_width() - width) / 2.0;
        self.text(page, cursor, x, text, style, height)
    }

    fn rule(&self, page: &mut Page, cursor: Cursor, gray: u8) -> Cursor {
        page.push(DrawOp::Rule(RuleOp {
            x1: self.geometry.margin_left,
            x2: self.geometry.content_right(),
            y: cursor.y,
            thickness: RULE_THICKNESS,
            gray,
        }));
        cursor
    }
}

/// Lays out `resume` on A4 pages with the built-in metrics.
pub fn render_document(resume: &Resume, max_roles: Option<usize>) -> Document {
    LayoutEngine::standard().render(resume, max_roles)
}

/// Resolves the name and optional tagline printed in the header.
///
/// When the name is missing or repeats the title, a title of the form
/// `Name - Tagline` is split on its first ` - `.
pub fn header_lines(header: &Header) -> (String, Option<String>) {
    let name = header.name().trim();
    let title = header.title().trim();

    if name.is_empty() || name == title {
        return match title.split_once(" - ") {
            Some((name, tagline)) => (name.trim().to_owned(), Some(tagline.trim().to_owned())),
            None => (title.to_owned(), None),
        };
    }
    let tagline = (!title.is_empty()).then(|| title.to_owned());
    (name.to_owned(), tagline)
}

/// Company name followed by `(location, Hybrid, Contract)` when any apply.
pub fn company_line(role: &Role) -> String {
    let annotations = role.annotations();
    if annotations.is_empty() {
        role.company().to_owned()
    } else {
        format!("{} ({})", role.company(), annotations.join(", "))
    }
}

/// Finished pages plus the one being drawn.
struct PageSet {
    geometry: PageGeometry,
    finished: Vec<Page>,
    current: Page,
}

impl PageSet {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            finished: Vec::new(),
            current: Page::new(1),
        }
    }

    fn current(&mut self) -> &mut Page {
        &mut self.current
    }

    fn len(&self) -> usize {
        self.finished.len() + 1
    }

    fn open_next(&mut self) {
        let next = Page::new(self.current.number() + 1);
        self.finished.push(std::mem::replace(&mut self.current, next));
    }

    fn finish(mut self) -> Document {
        self.finished.push(self.current);
        Document::new(self.geometry, self.finished)
    }
}
