//! Core data model shared by the measurement and pagination stages.
//!
//! Blocks are immutable value objects: the renderer produces them, the
//! compositor may derive new ones (split fragments) but never mutates an
//! existing one.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

// ────────────────────────────────────────────────────────────────────────────
// Tag classification
// ────────────────────────────────────────────────────────────────────────────

/// Closed set of block classes the compositor dispatches on.
///
/// `Span` marks a continuation fragment produced by a prior split; it
/// carries no original tag semantics, only residual text. Everything that is
/// not flowing text (images, tables, lists, block quotes) is `Other` and is
/// treated as an atomic, unsplittable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagClass {
    /// Heading level 1 through 6.
    Heading(u8),
    Paragraph,
    /// Continuation fragment of a split text block.
    Span,
    /// Atomic block: never split, placed whole or not at all.
    Other,
}

impl TagClass {
    /// Classifies a DOM tag name (case-insensitive).
    pub fn from_tag_name(tag: &str) -> Self {
        let upper = tag.to_ascii_uppercase();
        match upper.as_str() {
            "P" => TagClass::Paragraph,
            "SPAN" => TagClass::Span,
            "H1" => TagClass::Heading(1),
            "H2" => TagClass::Heading(2),
            "H3" => TagClass::Heading(3),
            "H4" => TagClass::Heading(4),
            "H5" => TagClass::Heading(5),
            "H6" => TagClass::Heading(6),
            _ => TagClass::Other,
        }
    }

    /// True for classes whose text can flow across a page boundary.
    pub fn is_splittable(&self) -> bool {
        !matches!(self, TagClass::Other)
    }

    /// The lowercase HTML tag used when re-wrapping fragment text.
    pub fn tag_name(&self) -> String {
        match self {
            TagClass::Heading(level) => format!("h{level}"),
            TagClass::Paragraph => "p".to_string(),
            TagClass::Span => "span".to_string(),
            TagClass::Other => "div".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

/// Raw per-element measurement returned by the DOM renderer.
///
/// One entry per top-level child of the rendered content root. Heights and
/// widths are the browser's client box values in px.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawElement {
    pub tag_name: String,
    pub inner_text: String,
    pub outer_html: String,
    pub client_height: f64,
    pub client_width: f64,
}

/// One measured content unit flowing through pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub tag: TagClass,
    /// Plain text content (innerText for renderer-produced blocks).
    pub text: String,
    /// Markup fragment emitted when the block is serialized onto a page.
    pub html: String,
    /// Measured or estimated height in px.
    pub height: f32,
    pub width: Option<f32>,
}

impl Block {
    /// Builds a block from a raw renderer measurement.
    ///
    /// A non-finite or negative height means the renderer is broken, not
    /// the content; pagination cannot proceed safely on such input.
    pub fn from_raw(raw: RawElement) -> Result<Self, EngineError> {
        let height = raw.client_height as f32;
        if !height.is_finite() || height < 0.0 {
            return Err(EngineError::Measurement(format!(
                "renderer reported height {} for <{}>",
                raw.client_height, raw.tag_name
            )));
        }
        Ok(Block {
            tag: TagClass::from_tag_name(&raw.tag_name),
            text: raw.inner_text,
            html: raw.outer_html,
            height,
            width: Some(raw.client_width as f32),
        })
    }

    /// Builds a derived text fragment, wrapping `text` in `tag`'s element.
    pub fn fragment(tag: TagClass, text: String, height: f32) -> Self {
        let name = tag.tag_name();
        let html = format!("<{name}>{text}</{name}>");
        Block {
            tag,
            text,
            html,
            height,
            width: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pages
// ────────────────────────────────────────────────────────────────────────────

/// An ordered run of blocks whose heights sum to at most the theme's inner
/// height. Produced only by the compositor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn total_height(&self) -> f32 {
        self.blocks.iter().map(|b| b.height).sum()
    }

    /// Concatenated markup of every block on the page, in order.
    pub fn html(&self) -> String {
        self.blocks.iter().map(|b| b.html.as_str()).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
