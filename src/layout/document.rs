//! Render-time page model produced by the layout engine.
//!
//! All coordinates are millimetres measured from the top-left corner of the
//! page, matching the way the engine walks down the page.  Emitters convert
//! them into whatever coordinate system their backend uses.

/// Physical page size and margins in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Paper width.
    pub width: f64,
    /// Paper height.
    pub height: f64,
    /// Left margin.
    pub margin_left: f64,
    /// Right margin.
    pub margin_right: f64,
    /// Top margin, where the cursor starts on every page.
    pub margin_top: f64,
    /// Bottom margin; role content never starts a block that would cross it.
    pub margin_bottom: f64,
    /// Distance from the bottom edge to the footer rule.
    pub footer_offset: f64,
}

impl PageGeometry {
    /// A4 portrait with 10 mm side margins and a 20 mm bottom band for the footer.
    pub const A4: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin_left: 10.0,
        margin_right: 10.0,
        margin_top: 10.0,
        margin_bottom: 20.0,
        footer_offset: 12.0,
    };

    /// Width available between the side margins.
    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest y coordinate role content may reach.
    pub fn printable_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    /// Right edge of the content area.
    pub fn content_right(&self) -> f64 {
        self.width - self.margin_right
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Font variant used for a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Upright regular weight.
    #[default]
    Regular,
    /// Upright bold weight.
    Bold,
    /// Regular weight, italic.
    Italic,
}

/// Immutable text style passed with every draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font variant.
    pub weight: FontWeight,
    /// Font size in points.
    pub size_pt: f64,
}

impl TextStyle {
    /// Regular text at `size_pt`.
    pub const fn regular(size_pt: f64) -> Self {
        Self {
            weight: FontWeight::Regular,
            size_pt,
        }
    }

    /// Bold text at `size_pt`.
    pub const fn bold(size_pt: f64) -> Self {
        Self {
            weight: FontWeight::Bold,
            size_pt,
        }
    }

    /// Italic text at `size_pt`.
    pub const fn italic(size_pt: f64) -> Self {
        Self {
            weight: FontWeight::Italic,
            size_pt,
        }
    }
}

/// Vertical position on the current page, threaded through the draw helpers.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Cursor {
    /// Distance from the top edge in millimetres.
    pub y: f64,
}

impl Cursor {
    /// Creates a cursor at `y`.
    pub fn at(y: f64) -> Self {
        Self { y }
    }

    /// Returns the cursor moved down by `dy`.
    pub fn advance(self, dy: f64) -> Self {
        Self { y: self.y + dy }
    }
}

/// One line of text placed inside a line box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// Left edge of the text.
    pub x: f64,
    /// Top of the line box.
    pub y: f64,
    /// Measured width of the text.
    pub width: f64,
    /// Height of the line box; the text is vertically centred inside it.
    pub height: f64,
    /// The text itself, already wrapped.
    pub text: String,
    /// Style to draw with.
    pub style: TextStyle,
}

/// A horizontal rule.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleOp {
    /// Start of the rule.
    pub x1: f64,
    /// End of the rule.
    pub x2: f64,
    /// Vertical position.
    pub y: f64,
    /// Stroke width in millimetres.
    pub thickness: f64,
    /// Stroke gray level, `0` is black.
    pub gray: u8,
}

/// A drawing primitive on a page.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Positioned text.
    Text(TextOp),
    /// Horizontal rule.
    Rule(RuleOp),
}

/// Vertical extent of a role block on its page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleSpan {
    /// Index of the role in the rendered sequence.
    pub index: usize,
    /// Cursor position before the block was drawn.
    pub top: f64,
    /// Cursor position after the block, trailing gap included.
    pub bottom: f64,
}

/// A single laid-out page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    number: usize,
    ops: Vec<DrawOp>,
    roles: Vec<RoleSpan>,
}

impl Page {
    pub(crate) fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
            roles: Vec::new(),
        }
    }

    /// Returns the 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the drawing primitives in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the role blocks placed on this page.
    pub fn roles(&self) -> &[RoleSpan] {
        &self.roles
    }

    /// Returns every text run on the page in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            DrawOp::Rule(_) => None,
        })
    }

    /// Returns whether any text run equals `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.text == needle)
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub(crate) fn push_role(&mut self, span: RoleSpan) {
        self.roles.push(span);
    }
}

/// The ordered pages produced by one render call.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl Document {
    pub(crate) fn new(geometry: PageGeometry, pages: Vec<Page>) -> Self {
        Self { geometry, pages }
    }

    /// Returns the page geometry every page shares.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Returns the pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the number of role blocks across all pages.
    pub fn role_count(&self) -> usize {
        self.pages.iter().map(|page| page.roles.len()).sum()
    }

    /// Returns the text runs of the 1-based page `number`, or an empty list.
    pub fn page_text(&self, number: usize) -> Vec<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(|page| page.texts().map(|text| text.text.as_str()).collect())
            .unwrap_or_default()
    }
}
