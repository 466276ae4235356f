//! Layout model: page geometry + typography, and the derived values the
//! measurer and compositor consume.
//!
//! A `Theme` is validated at construction and immutable afterwards. Every
//! pagination call owns its theme for the duration of the call; there is no
//! process-wide "current theme".

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::layout::font_metrics::FontFamily;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Physical page box in px.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Left and right margin (applied on both sides).
    pub margin_lr: f32,
    /// Top and bottom margin (applied on both sides).
    pub margin_tb: f32,
}

impl PageGeometry {
    fn validate(&self) -> Result<(), EngineError> {
        let dims = [self.width, self.height, self.margin_lr, self.margin_tb];
        if dims.iter().any(|d| !d.is_finite()) {
            return Err(EngineError::Geometry(
                "page dimensions must be finite".to_string(),
            ));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(EngineError::Geometry(format!(
                "page size {}x{} must be positive",
                self.width, self.height
            )));
        }
        if self.margin_lr < 0.0 || self.margin_tb < 0.0 {
            return Err(EngineError::Geometry("margins must be non-negative".to_string()));
        }
        // Margins at or past the page midline leave no content area.
        if 2.0 * self.margin_lr >= self.width || 2.0 * self.margin_tb >= self.height {
            return Err(EngineError::Geometry(format!(
                "margins {}x{} consume the whole {}x{} page",
                self.margin_lr, self.margin_tb, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Standard page-size presets, 50px margins all around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    A5,
    A6,
    B5,
}

impl PageSize {
    pub fn geometry(&self) -> PageGeometry {
        let (width, height) = match self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::A5 => (420.0, 595.0),
            PageSize::A6 => (297.0, 420.0),
            PageSize::B5 => (499.0, 709.0),
        };
        PageGeometry {
            width,
            height,
            margin_lr: 50.0,
            margin_tb: 50.0,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "A4" => Some(PageSize::A4),
            "A5" => Some(PageSize::A5),
            "A6" => Some(PageSize::A6),
            "B5" => Some(PageSize::B5),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Style configuration
// ────────────────────────────────────────────────────────────────────────────

/// Typography knobs independent of page size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub body_font: FontFamily,
    pub header_font: FontFamily,
    pub body_font_size_px: f32,
    /// First-line indent applied to paragraphs (not continuations).
    pub paragraph_indent_px: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            body_font: FontFamily::Arial,
            header_font: FontFamily::Arial,
            body_font_size_px: 12.0,
            paragraph_indent_px: 30.0,
        }
    }
}

impl StyleConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if !self.body_font_size_px.is_finite() || self.body_font_size_px <= 0.0 {
            return Err(EngineError::Style(format!(
                "body font size {} must be positive",
                self.body_font_size_px
            )));
        }
        if !self.paragraph_indent_px.is_finite() || self.paragraph_indent_px < 0.0 {
            return Err(EngineError::Style(format!(
                "paragraph indent {} must be non-negative",
                self.paragraph_indent_px
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

/// Font size + line pitch for one text class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FontAttributes {
    pub font_size_px: f32,
    pub line_height_px: f32,
}

/// Per-level heading metrics, h1 through h6. Sizes decrease with level,
/// line heights run roughly 1.2x the size.
const HEADING_SIZES: [FontAttributes; 6] = [
    FontAttributes { font_size_px: 32.0, line_height_px: 38.0 },
    FontAttributes { font_size_px: 30.0, line_height_px: 35.0 },
    FontAttributes { font_size_px: 28.0, line_height_px: 33.0 },
    FontAttributes { font_size_px: 26.0, line_height_px: 31.5 },
    FontAttributes { font_size_px: 24.0, line_height_px: 28.0 },
    FontAttributes { font_size_px: 22.0, line_height_px: 27.0 },
];

/// Validated, immutable layout model for one pagination run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    geometry: PageGeometry,
    style: StyleConfig,
}

impl Default for Theme {
    fn default() -> Self {
        // A4 with the default style is always valid.
        Theme {
            geometry: PageSize::A4.geometry(),
            style: StyleConfig::default(),
        }
    }
}

impl Theme {
    pub fn new(geometry: PageGeometry, style: StyleConfig) -> Result<Self, EngineError> {
        geometry.validate()?;
        style.validate()?;
        Ok(Theme { geometry, style })
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Usable content width per page.
    pub fn inner_width(&self) -> f32 {
        self.geometry.width - 2.0 * self.geometry.margin_lr
    }

    /// Usable content height per page.
    pub fn inner_height(&self) -> f32 {
        self.geometry.height - 2.0 * self.geometry.margin_tb
    }

    /// Body line pitch: 1.5x the body font size.
    pub fn line_height(&self) -> f32 {
        self.style.body_font_size_px * 1.5
    }

    /// Body text metrics.
    pub fn body_attributes(&self) -> FontAttributes {
        FontAttributes {
            font_size_px: self.style.body_font_size_px,
            line_height_px: self.line_height(),
        }
    }

    /// Heading metrics for level 1..=6; out-of-range levels clamp.
    pub fn heading_attributes(&self, level: u8) -> FontAttributes {
        let idx = (level.clamp(1, 6) - 1) as usize;
        HEADING_SIZES[idx]
    }

    /// The stylesheet the DOM renderer injects so its measurements agree
    /// with the analytic model: page box sizing, body font and line pitch,
    /// paragraph indent, heading fonts.
    pub fn stylesheet(&self) -> String {
        let mut css = format!(
            r#"html {{ box-sizing: border-box; margin: 0; }}
*, *:before, *:after {{ box-sizing: inherit; }}
body, h1, h2, h3, h4, h5, h6, p, ol, ul {{
  margin: 0; padding: 0; font-weight: normal; letter-spacing: normal;
}}
img {{ max-width: 100%; height: auto; }}
#prePage, .innerPage {{
  padding: {margin_tb}px {margin_lr}px;
  width: {page_w}px;
  min-width: {page_w}px;
  position: relative;
}}
.innerPage {{ height: {page_h}px; }}
p {{ text-indent: {indent}px; }}
p, span {{
  font-family: '{body_font}';
  font-size: {body_size}px;
  line-height: {line_height}px;
  display: block;
}}
h1, h2, h3, h4, h5, h6 {{ font-family: '{header_font}'; }}
"#,
            margin_tb = self.geometry.margin_tb,
            margin_lr = self.geometry.margin_lr,
            page_w = self.geometry.width,
            page_h = self.geometry.height,
            indent = self.style.paragraph_indent_px,
            body_font = self.style.body_font.css_name(),
            body_size = self.style.body_font_size_px,
            line_height = self.line_height(),
            header_font = self.style.header_font.css_name(),
        );
        for (i, attrs) in HEADING_SIZES.iter().enumerate() {
            css.push_str(&format!(
                "h{} {{ font-size: {}px; line-height: {}px; }}\n",
                i + 1,
                attrs.font_size_px,
                attrs.line_height_px
            ));
        }
        css
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
