//! Page compositor: packs an ordered block sequence into pages, splitting
//! text blocks at page boundaries.
//!
//! The split-and-continue step is an explicit work queue rather than
//! recursion on the sliced remainder, so documents with many forced splits
//! do not grow the call stack. Boundaries and ordering are identical to the
//! recursive formulation: the continuation fragment re-enters the queue at
//! the front and the next page starts fresh.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::text::TextMeasure;
use crate::layout::theme::Theme;
use crate::models::{Block, Page};

/// Result of one pagination run.
///
/// `dropped` records atomic blocks that could not fit even an empty page.
/// The compositor keeps the drop decision local (it is not fatal) but makes
/// the content loss observable to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationOutcome {
    pub pages: Vec<Page>,
    pub dropped: Vec<Block>,
}

/// Packs blocks into pages against the theme's inner height.
///
/// Splittable classes (paragraphs, spans, headings) are measured
/// analytically so originals and continuation fragments share one metric;
/// atomic blocks keep their renderer-reported height. Output page order
/// equals input block order; there is no lookahead.
pub fn paginate(blocks: Vec<Block>, theme: &Theme) -> PaginationOutcome {
    let inner_height = theme.inner_height();

    let mut pages: Vec<Page> = Vec::new();
    let mut dropped: Vec<Block> = Vec::new();
    let mut current = Page::default();
    let mut remaining = inner_height;

    let mut pending: VecDeque<Block> = blocks.into();

    while let Some(block) = pending.pop_front() {
        if block.tag.is_splittable() {
            let measure = TextMeasure::new(theme, &block.text, block.tag);
            let height = measure.height();

            if height < remaining {
                remaining -= height;
                current.blocks.push(reheighted(block, height));
                continue;
            }

            // The block crosses the page boundary: emit what fits, close the
            // page, and requeue the continuation.
            let (first, second) = measure.split(remaining);

            if first.text.is_empty() {
                if current.is_empty() {
                    // One line is taller than the whole page. Force a single
                    // line through so pagination terminates.
                    let (forced_first, forced_second) =
                        measure.split(measure.attributes().line_height_px);
                    warn!(
                        line_height = measure.attributes().line_height_px,
                        inner_height, "line pitch exceeds page height, force-placing one line"
                    );
                    current.blocks.push(forced_first);
                    pages.push(std::mem::take(&mut current));
                    remaining = inner_height;
                    if !forced_second.text.is_empty() {
                        pending.push_front(forced_second);
                    }
                } else {
                    // Nothing fits in the leftover space: close the page and
                    // retry the whole block on a fresh one.
                    pages.push(std::mem::take(&mut current));
                    remaining = inner_height;
                    pending.push_front(block);
                }
                continue;
            }

            current.blocks.push(first);
            pages.push(std::mem::take(&mut current));
            remaining = inner_height;
            if !second.text.is_empty() {
                pending.push_front(second);
            }
            continue;
        }

        // Atomic block: place whole or move whole.
        if block.height < remaining {
            remaining -= block.height;
            current.blocks.push(block);
        } else if !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            remaining = inner_height;
            pending.push_front(block);
        } else if block.height <= inner_height {
            // An exact full-page fit counts as fitting.
            remaining -= block.height;
            current.blocks.push(block);
        } else {
            warn!(
                height = block.height,
                inner_height,
                tag = ?block.tag,
                "atomic block taller than an empty page, dropping"
            );
            dropped.push(block);
        }
    }

    pages.push(current);

    for (i, page) in pages.iter().enumerate() {
        debug!(
            page = i + 1,
            blocks = page.blocks.len(),
            fill = page.total_height(),
            "page composed"
        );
    }
    debug!(
        pages = pages.len(),
        dropped = dropped.len(),
        "pagination complete"
    );
    PaginationOutcome { pages, dropped }
}

/// Derives a copy of a text block carrying its analytic height, so page
/// capacity accounting and re-pagination agree with the split metric.
fn reheighted(block: Block, height: f32) -> Block {
    Block { height, ..block }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagClass;

    fn theme() -> Theme {
        Theme::default() // A4: inner 495x742, 18px body lines
    }

    fn atomic(height: f32) -> Block {
        Block {
            tag: TagClass::Other,
            text: String::new(),
            html: format!("<img data-h=\"{height}\">"),
            height,
            width: None,
        }
    }

    fn paragraph(theme: &Theme, lines: usize) -> Block {
        let mut text = "word".to_string();
        loop {
            let count = TextMeasure::new(theme, &text, TagClass::Paragraph).line_count();
            if count == lines {
                break;
            }
            assert!(count < lines);
            text.push_str(" word");
        }
        let height = lines as f32 * theme.line_height();
        Block::fragment(TagClass::Paragraph, text, height)
    }

    fn flatten(outcome: &PaginationOutcome) -> Vec<Block> {
        outcome
            .pages
            .iter()
            .flat_map(|p| p.blocks.iter().cloned())
            .collect()
    }

    #[test]
    fn test_empty_input_yields_single_empty_page() {
        let outcome = paginate(Vec::new(), &theme());
        assert_eq!(outcome.pages.len(), 1);
        assert!(outcome.pages[0].is_empty());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_atomic_packing_three_hundreds() {
        // 300+300 fits (600 <= 742), the third moves to page 2.
        let theme = theme();
        let blocks = vec![atomic(300.0), atomic(300.0), atomic(300.0)];
        let outcome = paginate(blocks, &theme);
        assert_eq!(outcome.pages.len(), 2);
        assert_eq!(outcome.pages[0].blocks.len(), 2);
        assert_eq!(outcome.pages[1].blocks.len(), 1);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_oversized_atomic_on_empty_page_is_dropped_with_warning() {
        let theme = theme();
        let blocks = vec![atomic(900.0), atomic(100.0)];
        let outcome = paginate(blocks, &theme);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].height, 900.0);
        // No page references the dropped block.
        assert!(flatten(&outcome).iter().all(|b| b.height != 900.0));
    }

    #[test]
    fn test_oversized_atomic_after_content_also_dropped() {
        // The oversized block moves to a fresh page first, then hits the
        // empty-page drop rule there.
        let theme = theme();
        let blocks = vec![atomic(100.0), atomic(900.0), atomic(100.0)];
        let outcome = paginate(blocks, &theme);
        assert_eq!(outcome.dropped.len(), 1);
        for page in &outcome.pages {
            assert!(page.total_height() <= theme.inner_height());
        }
    }

    #[test]
    fn test_atomic_exact_full_page_fits() {
        let theme = theme();
        let blocks = vec![atomic(742.0)];
        let outcome = paginate(blocks, &theme);
        assert!(outcome.dropped.is_empty());
        assert_eq!(outcome.pages[0].blocks.len(), 1);
        assert_eq!(outcome.pages[0].total_height(), theme.inner_height());
    }

    #[test]
    fn test_fifty_line_paragraph_splits_41_9() {
        let theme = theme();
        let block = paragraph(&theme, 50); // 900px of text
        let outcome = paginate(vec![block], &theme);

        assert_eq!(outcome.pages.len(), 2);
        let first = &outcome.pages[0].blocks[0];
        let second = &outcome.pages[1].blocks[0];
        assert_eq!(first.height, 738.0); // 41 lines
        assert_eq!(second.height, 162.0); // 9 lines
        assert_eq!(first.tag, TagClass::Paragraph);
        assert_eq!(second.tag, TagClass::Span);
    }

    #[test]
    fn test_split_continuation_flows_before_later_blocks() {
        let theme = theme();
        let blocks = vec![paragraph(&theme, 50), atomic(100.0)];
        let outcome = paginate(blocks, &theme);
        assert_eq!(outcome.pages.len(), 2);
        let page2 = &outcome.pages[1];
        assert_eq!(page2.blocks[0].tag, TagClass::Span);
        assert_eq!(page2.blocks[1].height, 100.0);
    }

    #[test]
    fn test_page_capacity_invariant() {
        let theme = theme();
        let mut blocks = Vec::new();
        for lines in [3, 50, 1, 12, 41, 7] {
            blocks.push(paragraph(&theme, lines));
        }
        blocks.push(atomic(200.0));
        blocks.push(atomic(742.0));
        let outcome = paginate(blocks, &theme);
        for (i, page) in outcome.pages.iter().enumerate() {
            assert!(
                page.total_height() <= theme.inner_height() + 1e-3,
                "page {i} overflows: {}",
                page.total_height()
            );
        }
    }

    #[test]
    fn test_no_content_loss_without_oversized_atomics() {
        let theme = theme();
        let blocks = vec![
            paragraph(&theme, 10),
            paragraph(&theme, 50),
            paragraph(&theme, 5),
        ];
        let input_words: Vec<String> = blocks
            .iter()
            .flat_map(|b| b.text.split_whitespace().map(str::to_string))
            .collect();

        let outcome = paginate(blocks, &theme);
        let output_words: Vec<String> = flatten(&outcome)
            .iter()
            .flat_map(|b| b.text.split_whitespace().map(str::to_string))
            .collect();
        assert_eq!(input_words, output_words);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_repagination_is_idempotent() {
        let theme = theme();
        let blocks = vec![
            paragraph(&theme, 30),
            paragraph(&theme, 50),
            atomic(120.0),
            paragraph(&theme, 8),
        ];
        let first_run = paginate(blocks, &theme);
        let boundaries: Vec<usize> = first_run.pages.iter().map(|p| p.blocks.len()).collect();

        let second_run = paginate(flatten(&first_run), &theme);
        let reboundaries: Vec<usize> = second_run.pages.iter().map(|p| p.blocks.len()).collect();
        assert_eq!(boundaries, reboundaries);
    }

    #[test]
    fn test_heading_splits_continuation_as_span() {
        // A heading long enough to cross a page boundary continues as plain
        // flow text, not another heading.
        let theme = theme();
        let mut text = "Heading".to_string();
        loop {
            let m = TextMeasure::new(&theme, &text, TagClass::Heading(2));
            if m.height() > theme.inner_height() {
                break;
            }
            text.push_str(" Heading");
        }
        let height = TextMeasure::new(&theme, &text, TagClass::Heading(2)).height();
        let block = Block::fragment(TagClass::Heading(2), text, height);

        let outcome = paginate(vec![block], &theme);
        assert!(outcome.pages.len() >= 2);
        assert!(matches!(
            outcome.pages[0].blocks[0].tag,
            TagClass::Heading(2)
        ));
        assert_eq!(outcome.pages[1].blocks[0].tag, TagClass::Span);
    }

    #[test]
    fn test_output_order_matches_input_order() {
        let theme = theme();
        let blocks = vec![
            atomic(100.0),
            paragraph(&theme, 2),
            atomic(200.0),
            paragraph(&theme, 3),
        ];
        let heights: Vec<f32> = blocks.iter().map(|b| b.height).collect();
        let outcome = paginate(blocks, &theme);
        let out_heights: Vec<f32> = flatten(&outcome).iter().map(|b| b.height).collect();
        assert_eq!(heights, out_heights);
    }
}
