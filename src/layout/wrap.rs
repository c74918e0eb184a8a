//! Greedy word wrapping and accomplishment paragraph splitting.
//!
//! The same functions are used to measure a role before the page-break
//! decision and to draw it afterwards, so the measured height always equals
//! the drawn height.

use super::document::TextStyle;
use super::metrics::TextMeasure;

const WIDTH_EPSILON: f64 = 1e-9;

/// Wraps `text` into lines no wider than `width`.
///
/// A word is appended to the current line only while the line, the joining
/// space, the word and a trailing space all fit; otherwise it starts a new
/// line.  The first word of a line is always placed, so a single word wider
/// than `width` is kept whole on its own line.  Whitespace-only input yields
/// no lines.
pub fn wrap_text<M>(measure: &M, text: &str, style: TextStyle, width: f64) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let space = measure.text_width(" ", style);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = measure.text_width(word, style);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width + space <= width + WIDTH_EPSILON {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A paragraph of the accomplishments block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paragraph<'a> {
    /// An empty source line, drawn as one line of vertical space.
    Blank,
    /// Plain text wrapped at the full width.
    Plain(&'a str),
    /// A `-` item, drawn with a marker and a hanging indent.
    Bullet(&'a str),
}

/// Splits an accomplishments block into paragraphs.
///
/// Trailing blank lines are dropped so a YAML block scalar's final newline
/// does not add space under the block.
pub fn paragraphs(done: &str) -> Vec<Paragraph<'_>> {
    let done = done.trim_end();
    if done.is_empty() {
        return Vec::new();
    }

    done.split('\n')
        .map(str::trim)
        .map(|line| {
            if line.is_empty() {
                Paragraph::Blank
            } else if let Some(content) = line.strip_prefix('-') {
                Paragraph::Bullet(content.trim_start_matches('-').trim())
            } else {
                Paragraph::Plain(line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::StandardMetrics;

    /// Every character is one millimetre wide.
    struct Monospace;

    impl TextMeasure for Monospace {
        fn text_width(&self, text: &str, _style: TextStyle) -> f64 {
            text.chars().count() as f64
        }
    }

    const STYLE: TextStyle = TextStyle::regular(10.0);

    #[test]
    fn wraps_greedily_at_word_boundaries() {
        let lines = wrap_text(&Monospace, "aaa bbb ccc dddd", STYLE, 8.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc", "dddd"]);
    }

    #[test]
    fn trailing_space_counts_against_the_width() {
        let lines = wrap_text(&Monospace, "aaa bbb", STYLE, 7.0);
        assert_eq!(lines, vec!["aaa", "bbb"]);

        let lines = wrap_text(&Monospace, "aaa bbb", STYLE, 8.0);
        assert_eq!(lines, vec!["aaa bbb"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_text(&Monospace, "a supercalifragilistic b", STYLE, 5.0);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let lines = wrap_text(&Monospace, "  a \t b  ", STYLE, 50.0);
        assert_eq!(lines, vec!["a b"]);
        assert!(wrap_text(&Monospace, "   ", STYLE, 50.0).is_empty());
    }

    #[test]
    fn wrapped_lines_respect_width_with_real_metrics() {
        let text = "Designed and operated a multi-region event ingestion platform \
                    handling billions of messages per day with strict latency budgets";
        let width = 60.0;
        let lines = wrap_text(&StandardMetrics, text, STYLE, width);
        assert!(lines.len() > 1);
        let space = StandardMetrics.text_width(" ", STYLE);
        for line in &lines {
            let with_trailing = StandardMetrics.text_width(line, STYLE) + space;
            assert!(with_trailing <= width + WIDTH_EPSILON);
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn splits_paragraphs_and_bullets() {
        let done = "Led the platform team.\n\n- Cut costs by 30%\n  -- Shipped v2  \n";
        assert_eq!(
            paragraphs(done),
            vec![
                Paragraph::Plain("Led the platform team."),
                Paragraph::Blank,
                Paragraph::Bullet("Cut costs by 30%"),
                Paragraph::Bullet("Shipped v2"),
            ]
        );
    }

    #[test]
    fn empty_block_has_no_paragraphs() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n  \n").is_empty());
    }
}
