//! End-to-end flow: markup conversion, measurement, pagination.
//!
//! The theme threads through every stage as an argument; nothing here holds
//! layout state between runs.

use tracing::{info, warn};

use crate::errors::EngineError;
use crate::layout::paginate::{paginate, PaginationOutcome};
use crate::layout::theme::Theme;
use crate::render::markup::{html_boilerplate, MarkupConverter};
use crate::render::renderer::BlockRenderer;

/// Converts markdown to HTML, measures it through the renderer, and packs
/// the blocks into pages.
///
/// The renderer is closed before this function returns, on the error path
/// too. A close failure after a successful run is still an error; a close
/// failure after a measurement failure is logged and the measurement error
/// wins.
pub async fn paginate_markdown<C, R>(
    source: &str,
    theme: &Theme,
    converter: &C,
    renderer: &mut R,
) -> Result<PaginationOutcome, EngineError>
where
    C: MarkupConverter,
    R: BlockRenderer + Send,
{
    let html = converter.to_html(source);
    let document = html_boilerplate(&html);

    let measured = renderer.measure_blocks(&document, theme).await;
    let closed = renderer.close().await;

    let blocks = match measured {
        Ok(blocks) => blocks,
        Err(err) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "renderer close failed during error teardown");
            }
            return Err(err.into());
        }
    };
    closed?;

    let outcome = paginate(blocks, theme);
    info!(
        pages = outcome.pages.len(),
        dropped = outcome.dropped.len(),
        "paginated document"
    );
    if !outcome.dropped.is_empty() {
        warn!(
            dropped = outcome.dropped.len(),
            "content lost: atomic blocks taller than a page were dropped"
        );
    }
    Ok(outcome)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
