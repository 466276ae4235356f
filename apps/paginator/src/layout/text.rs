//! Analytic text measurement: predicts line wrapping and block height from
//! the static font-metric tables, and performs the deterministic split used
//! when a text block crosses a page boundary.
//!
//! Tokenization is single-space word splitting; consecutive whitespace runs
//! collapse to one separator when fragments are rejoined. Acceptable for
//! prose pagination, a known limitation if bit-exact round-trips matter.

use crate::layout::font_metrics::{metrics_for, FontMetricTable};
use crate::layout::theme::{FontAttributes, Theme};
use crate::models::{Block, TagClass};

/// One measurement of one block's text against one theme. Wrap results are
/// derived on demand and never cached across blocks.
pub struct TextMeasure<'a> {
    theme: &'a Theme,
    tag: TagClass,
    attrs: FontAttributes,
    table: &'static FontMetricTable,
    words: Vec<&'a str>,
}

impl<'a> TextMeasure<'a> {
    pub fn new(theme: &'a Theme, text: &'a str, tag: TagClass) -> Self {
        let attrs = font_attributes(theme, tag);
        let font = match tag {
            TagClass::Heading(_) => theme.style().header_font,
            _ => theme.style().body_font,
        };
        TextMeasure {
            theme,
            tag,
            attrs,
            table: metrics_for(font),
            words: text.split_whitespace().collect(),
        }
    }

    pub fn attributes(&self) -> FontAttributes {
        self.attrs
    }

    /// Greedy first-fit wrap against the theme's inner width.
    ///
    /// Each word advances by its own width plus one space width; a word that
    /// would overflow closes the current line and starts the next one at
    /// zero width. The first line of a `Paragraph` starts at the paragraph
    /// indent; continuations and headings start at zero.
    pub fn wrap(&self) -> Vec<Vec<&'a str>> {
        let max_width = self.theme.inner_width();
        let size = self.attrs.font_size_px;
        let space = self.table.space_px(size);

        let mut lines: Vec<Vec<&'a str>> = Vec::new();
        let mut current: Vec<&'a str> = Vec::new();
        let mut cur_width = if self.tag == TagClass::Paragraph {
            self.theme.style().paragraph_indent_px
        } else {
            0.0
        };

        for &word in &self.words {
            let advance = self.table.advance_px(word, size) + space;
            if cur_width + advance > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                cur_width = 0.0;
            }
            current.push(word);
            cur_width += advance;
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    pub fn line_count(&self) -> usize {
        self.wrap().len()
    }

    /// Predicted block height: line count times the class line pitch.
    pub fn height(&self) -> f32 {
        self.line_count() as f32 * self.attrs.line_height_px
    }

    /// Splits the text at a height budget.
    ///
    /// The first fragment keeps this block's tag and holds
    /// `floor(remaining_height / line_height)` wrapped lines; the second is
    /// re-tagged `Span` so indentation and heading styling do not repeat on
    /// the continuation. Fragment heights are exact line multiples, so
    /// `first.height <= remaining_height` and the two heights sum to
    /// `height()`. A `remaining_height` below one line pitch yields an
    /// empty first fragment: the caller must treat that as "nothing fits".
    pub fn split(&self, remaining_height: f32) -> (Block, Block) {
        let lines = self.wrap();
        let line_height = self.attrs.line_height_px;

        let budget = remaining_height.max(0.0);
        let lines_first = ((budget / line_height).floor() as usize).min(lines.len());

        let first_text = join_lines(&lines[..lines_first]);
        let second_text = join_lines(&lines[lines_first..]);

        let first = Block::fragment(self.tag, first_text, lines_first as f32 * line_height);
        let second = Block::fragment(
            TagClass::Span,
            second_text,
            (lines.len() - lines_first) as f32 * line_height,
        );
        (first, second)
    }
}

/// Metrics for a tag class: heading table for headings, body for the rest.
pub fn font_attributes(theme: &Theme, tag: TagClass) -> FontAttributes {
    match tag {
        TagClass::Heading(level) => theme.heading_attributes(level),
        TagClass::Paragraph | TagClass::Span | TagClass::Other => theme.body_attributes(),
    }
}

fn join_lines(lines: &[Vec<&str>]) -> String {
    lines
        .iter()
        .flat_map(|line| line.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::default()
    }

    /// Builds a paragraph of repeated words that wraps to exactly `lines`
    /// lines under the default theme.
    fn text_with_lines(theme: &Theme, lines: usize) -> String {
        let mut text = "word".to_string();
        loop {
            let measure = TextMeasure::new(theme, &text, TagClass::Paragraph);
            let count = measure.line_count();
            if count == lines {
                return text;
            }
            assert!(count < lines, "overshot target line count");
            text.push_str(" word");
        }
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        let theme = theme();
        let measure = TextMeasure::new(&theme, "", TagClass::Paragraph);
        assert_eq!(measure.line_count(), 0);
        assert_eq!(measure.height(), 0.0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let theme = theme();
        let measure = TextMeasure::new(&theme, "hello world", TagClass::Paragraph);
        assert_eq!(measure.line_count(), 1);
        assert_eq!(measure.height(), 18.0);
    }

    #[test]
    fn test_long_text_wraps() {
        let theme = theme();
        let text = "word ".repeat(200);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        assert!(measure.line_count() > 1);
    }

    #[test]
    fn test_paragraph_indent_reduces_first_line_capacity() {
        // With a large indent the first paragraph line holds fewer words, so
        // the same text can need more lines than a span continuation.
        let geometry = crate::layout::theme::PageSize::A4.geometry();
        let style = crate::layout::theme::StyleConfig {
            paragraph_indent_px: 400.0,
            ..Default::default()
        };
        let theme = Theme::new(geometry, style).unwrap();
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
        let as_para = TextMeasure::new(&theme, text, TagClass::Paragraph).line_count();
        let as_span = TextMeasure::new(&theme, text, TagClass::Span).line_count();
        assert!(as_para >= as_span);
    }

    #[test]
    fn test_heading_uses_heading_line_height() {
        let theme = theme();
        let measure = TextMeasure::new(&theme, "Chapter One", TagClass::Heading(1));
        assert_eq!(measure.attributes().font_size_px, 32.0);
        assert_eq!(measure.height(), 38.0); // one line at h1 pitch
    }

    #[test]
    fn test_wrap_monotonicity() {
        // Height is non-decreasing as whole words are appended.
        let theme = theme();
        let mut text = String::new();
        let mut prev_height = 0.0;
        for i in 0..120 {
            if i > 0 {
                text.push(' ');
            }
            text.push_str("lorem");
            let h = TextMeasure::new(&theme, &text, TagClass::Paragraph).height();
            assert!(h >= prev_height, "height shrank after appending a word");
            prev_height = h;
        }
    }

    #[test]
    fn test_split_conserves_words() {
        let theme = theme();
        let text = text_with_lines(&theme, 10);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        let total = measure.height();

        let (first, second) = measure.split(4.0 * 18.0 + 5.0);
        let rejoined = format!("{} {}", first.text, second.text);
        let original_words: Vec<&str> = text.split_whitespace().collect();
        let rejoined_words: Vec<&str> = rejoined.split_whitespace().collect();
        assert_eq!(original_words, rejoined_words);

        assert!(first.height <= 4.0 * 18.0 + 5.0);
        assert_eq!(first.height + second.height, total);
    }

    #[test]
    fn test_split_fragment_tags() {
        let theme = theme();
        let text = text_with_lines(&theme, 6);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        let (first, second) = measure.split(3.0 * 18.0);
        assert_eq!(first.tag, TagClass::Paragraph);
        assert_eq!(second.tag, TagClass::Span);
        assert!(first.html.starts_with("<p>"));
        assert!(second.html.starts_with("<span>"));
    }

    #[test]
    fn test_split_with_no_room_yields_empty_first() {
        let theme = theme();
        let text = text_with_lines(&theme, 4);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        let (first, second) = measure.split(10.0); // below one 18px line
        assert!(first.text.is_empty());
        assert_eq!(first.height, 0.0);
        assert_eq!(second.height, measure.height());
    }

    #[test]
    fn test_split_past_end_yields_empty_second() {
        let theme = theme();
        let text = text_with_lines(&theme, 4);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        let (first, second) = measure.split(1000.0);
        assert_eq!(first.height, measure.height());
        assert!(second.text.is_empty());
        assert_eq!(second.height, 0.0);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let theme = theme();
        let measure = TextMeasure::new(&theme, "a   b \t c", TagClass::Paragraph);
        let (first, _) = measure.split(1000.0);
        assert_eq!(first.text, "a b c");
    }

    #[test]
    fn test_a4_scenario_41_line_first_fragment() {
        // A4: inner 495x742, 12px body, 18px lines. A 50-line paragraph
        // splits into floor(742/18) = 41 lines (738px) and 9 lines (162px).
        let theme = theme();
        let text = text_with_lines(&theme, 50);
        let measure = TextMeasure::new(&theme, &text, TagClass::Paragraph);
        assert_eq!(measure.height(), 900.0);

        let (first, second) = measure.split(theme.inner_height());
        assert_eq!(first.height, 738.0);
        assert_eq!(second.height, 162.0);
        let second_lines = TextMeasure::new(&theme, &second.text, TagClass::Span).line_count();
        assert_eq!(second_lines, 9);
    }
}
