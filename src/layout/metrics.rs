//! Static advance-width tables for the PDF base-14 Helvetica family.
//!
//! Widths are in thousandths of an em and cover ASCII 0x20..=0x7E, indexed by
//! `(char as usize) - 32`.  Helvetica-Oblique shares the regular widths.
//! Characters outside the table fall back to the width of a digit.

use super::document::{FontWeight, TextStyle};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n-z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    // sp    !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A-M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a-m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n-z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

/// Measures rendered text width.
///
/// The layout engine only ever asks for widths, so any font backend can be
/// plugged in as long as the emitter draws with matching metrics.
pub trait TextMeasure {
    /// Width of `text` in millimetres when drawn with `style`.
    fn text_width(&self, text: &str, style: TextStyle) -> f64;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        (**self).text_width(text, style)
    }
}

/// Metrics of the built-in Helvetica family used by [`crate::emit::BuiltinEmitter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    fn table(weight: FontWeight) -> &'static [u16; 95] {
        match weight {
            FontWeight::Bold => &HELVETICA_BOLD,
            FontWeight::Regular | FontWeight::Italic => &HELVETICA,
        }
    }

    /// Width of `text` in thousandths of an em.
    pub fn em_units(&self, text: &str, weight: FontWeight) -> u32 {
        let table = Self::table(weight);
        text.chars()
            .map(|ch| {
                let code = ch as usize;
                if (32..=126).contains(&code) {
                    u32::from(table[code - 32])
                } else {
                    u32::from(FALLBACK_WIDTH)
                }
            })
            .sum()
    }
}

impl TextMeasure for StandardMetrics {
    fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        f64::from(self.em_units(text, style.weight)) * style.size_pt / 1000.0 * MM_PER_PT
    }
}
