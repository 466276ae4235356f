//! Engine-level error type.
//!
//! Renderer-boundary failures have their own type (`render::RenderError`) so
//! callers can distinguish "the browser broke" from "the configuration or
//! measurements are unusable"; it folds into `EngineError` at the pipeline.

use thiserror::Error;

use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Page geometry rejected at theme construction (margins eat the page,
    /// non-finite dimensions). Fatal configuration error.
    #[error("invalid page geometry: {0}")]
    Geometry(String),

    /// Style configuration rejected at theme construction.
    #[error("invalid style config: {0}")]
    Style(String),

    /// A renderer-reported block measurement that pagination cannot trust
    /// (non-finite or negative height).
    #[error("invalid block measurement: {0}")]
    Measurement(String),

    /// Renderer collaborator failure. No internal retry; retry policy
    /// belongs to the caller.
    #[error("renderer error: {0}")]
    Renderer(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
