//! Measurement boundary: turns a rendered HTML document into the measured
//! block stream the compositor consumes.
//!
//! Two strategies implement the same trait. A DOM-backed renderer drives a
//! real browser and reports client-box heights; `EstimatingRenderer` derives
//! heights analytically from the font-metric tables. The estimator never
//! stands in for DOM numbers implicitly, the caller picks the strategy.

use async_trait::async_trait;
use kuchiki::traits::TendrilSink;
use thiserror::Error;
use tracing::debug;

use crate::layout::text::TextMeasure;
use crate::layout::theme::Theme;
use crate::models::{Block, RawElement, TagClass};

/// Renderer-boundary failures, kept separate from engine errors so callers
/// can tell a broken collaborator from bad configuration.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendering backend could not start.
    #[error("renderer failed to launch: {0}")]
    Launch(String),

    /// The backend started but could not load or walk the document.
    #[error("document navigation failed: {0}")]
    Navigation(String),

    /// The document loaded but produced zero content blocks. Distinct from
    /// the failures above so callers can treat it as "empty input".
    #[error("renderer produced no blocks")]
    NoBlocks,
}

/// Measures a rendered document into blocks.
///
/// `close` is explicit teardown and must be awaited on every exit path,
/// including error paths, so backends holding OS resources (a browser
/// process, a socket) shut down deterministically.
#[async_trait]
pub trait BlockRenderer {
    async fn measure_blocks(
        &mut self,
        html: &str,
        theme: &Theme,
    ) -> Result<Vec<Block>, RenderError>;

    async fn close(&mut self) -> Result<(), RenderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Estimating renderer
// ────────────────────────────────────────────────────────────────────────────

/// Height used for atomic blocks the analytic model cannot measure (images,
/// tables, lists). A deliberate placeholder, not a prediction.
const DEFAULT_ATOMIC_HEIGHT_PX: f32 = 150.0;

/// Analytic measurement strategy: parses the document, takes the top-level
/// body children as blocks, and predicts text heights with `TextMeasure`.
/// Needs no external process, so it also serves as the test double for the
/// DOM strategy.
#[derive(Debug, Clone)]
pub struct EstimatingRenderer {
    atomic_height_px: f32,
    closed: bool,
}

impl Default for EstimatingRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ATOMIC_HEIGHT_PX)
    }
}

impl EstimatingRenderer {
    pub fn new(atomic_height_px: f32) -> Self {
        EstimatingRenderer {
            atomic_height_px,
            closed: false,
        }
    }
}

#[async_trait]
impl BlockRenderer for EstimatingRenderer {
    async fn measure_blocks(
        &mut self,
        html: &str,
        theme: &Theme,
    ) -> Result<Vec<Block>, RenderError> {
        if self.closed {
            return Err(RenderError::Launch("renderer is closed".to_string()));
        }
        let document = kuchiki::parse_html().one(html);
        let body = document
            .select_first("body")
            .map_err(|()| RenderError::Navigation("document has no <body>".to_string()))?;

        let mut blocks = Vec::new();
        for child in body.as_node().children() {
            let Some(element) = child.as_element() else {
                continue; // inter-element whitespace
            };
            let tag = TagClass::from_tag_name(&element.name.local);

            let mut outer = Vec::new();
            child
                .serialize(&mut outer)
                .map_err(|e| RenderError::Navigation(format!("serialize failed: {e}")))?;

            let text = child.text_contents();
            let height = if tag.is_splittable() {
                TextMeasure::new(theme, &text, tag).height()
            } else {
                self.atomic_height_px
            };
            // Same ingestion funnel a DOM backend uses, so height validation
            // has a single home.
            let raw = RawElement {
                tag_name: element.name.local.to_string(),
                inner_text: text,
                outer_html: String::from_utf8_lossy(&outer).into_owned(),
                client_height: f64::from(height),
                client_width: f64::from(theme.inner_width()),
            };
            let block = Block::from_raw(raw)
                .map_err(|err| RenderError::Navigation(err.to_string()))?;
            blocks.push(block);
        }

        if blocks.is_empty() {
            return Err(RenderError::NoBlocks);
        }
        debug!(blocks = blocks.len(), "estimated block stream");
        Ok(blocks)
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.closed = true;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
