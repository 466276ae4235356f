//! Static font-metric tables for the supported web font families.
//!
//! Character widths are in em units (relative to font size). This stands in
//! for a real text-shaping engine: pagination needs a fast, re-runnable
//! height prediction when splitting a block, and a few px of drift per line
//! is acceptable because pages are validated against the theme's inner
//! height, not a hard pixel budget.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Floor for a single-string advance in px. A zero or negative advance for
/// non-empty text would make greedy wrapping place every word on one line.
const MIN_ADVANCE_PX: f32 = 0.1;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Web-safe font families the theme can select for body or heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Arial,
    TimesNewRoman,
    Georgia,
    Verdana,
    CourierNew,
}

impl FontFamily {
    /// The name used in generated CSS `font-family` rules.
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Georgia => "Georgia",
            FontFamily::Verdana => "Verdana",
            FontFamily::CourierNew => "Courier New",
        }
    }

    /// Parses the names accepted in configuration (case-insensitive, spaces
    /// and separators ignored).
    pub fn parse(name: &str) -> Option<Self> {
        let folded: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "arial" => Some(FontFamily::Arial),
            "timesnewroman" | "times" => Some(FontFamily::TimesNewRoman),
            "georgia" => Some(FontFamily::Georgia),
            "verdana" => Some(FontFamily::Verdana),
            "couriernew" | "courier" => Some(FontFamily::CourierNew),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one font family.
///
/// `widths[i]` = em width of ASCII character `(i + 32)`, covering 0x20
/// (space) through 0x7E (~). Non-ASCII characters fall back to
/// `average_char_width`.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for codepoints outside 0x20..=0x7E.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the advance of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Advance of a string in px at the given font size.
    ///
    /// A non-positive result for non-empty text is an estimator defect, not
    /// a property of the content; it is clamped to a minimum positive width
    /// and flagged so wrapping stays finite.
    pub fn advance_px(&self, s: &str, font_size_px: f32) -> f32 {
        if s.is_empty() {
            return 0.0;
        }
        let advance = self.measure_str(s) * font_size_px;
        if advance <= 0.0 {
            warn!(
                text = s,
                font = ?self.font,
                advance,
                "non-positive advance for non-empty text, clamping"
            );
            return MIN_ADVANCE_PX;
        }
        advance
    }

    /// Width of a single space in px at the given font size.
    pub fn space_px(&self, font_size_px: f32) -> f32 {
        self.space_width * font_size_px
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Arial: a neo-grotesque sans-serif, the default body font.
static ARIAL_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Arial,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.28, 0.35, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.01,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
        // [     \     ]     ^     _     `
        0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.58,
    ],
    average_char_width: 0.53,
    space_width: 0.28,
};

/// Times New Roman: a transitional serif, narrower than Arial overall.
static TIMES_NEW_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesNewRoman,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.33, 0.41, 0.50, 0.50, 0.83, 0.78, 0.18, 0.33, 0.33, 0.50, 0.56, 0.25, 0.33, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.56, 0.56, 0.56, 0.44, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.72, 0.67, 0.67, 0.72, 0.61, 0.56, 0.72, 0.72, 0.33, 0.39, 0.72, 0.61, 0.89,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.72, 0.56, 0.72, 0.67, 0.56, 0.61, 0.72, 0.72, 0.94, 0.72, 0.72, 0.61,
        // [     \     ]     ^     _     `
        0.33, 0.28, 0.33, 0.47, 0.50, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.44, 0.50, 0.44, 0.50, 0.44, 0.33, 0.50, 0.50, 0.28, 0.28, 0.50, 0.28, 0.78,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.33, 0.39, 0.28, 0.50, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.48, 0.20, 0.48, 0.54,
    ],
    average_char_width: 0.47,
    space_width: 0.25,
};

/// Georgia: a screen serif with wide lowercase and old-style figures.
static GEORGIA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Georgia,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.24, 0.33, 0.41, 0.64, 0.61, 0.82, 0.71, 0.22, 0.38, 0.38, 0.47, 0.64, 0.27, 0.38, 0.27, 0.47,
        // 0     1     2     3     4     5     6     7     8     9
        0.61, 0.42, 0.56, 0.55, 0.56, 0.54, 0.58, 0.52, 0.60, 0.58,
        // :     ;     <     =     >     ?     @
        0.33, 0.33, 0.64, 0.64, 0.64, 0.48, 0.93,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.71, 0.69, 0.70, 0.76, 0.68, 0.65, 0.77, 0.81, 0.40, 0.53, 0.74, 0.64, 0.93,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.79, 0.78, 0.66, 0.78, 0.73, 0.60, 0.65, 0.76, 0.71, 0.98, 0.72, 0.65, 0.62,
        // [     \     ]     ^     _     `
        0.38, 0.47, 0.38, 0.64, 0.64, 0.50,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.50, 0.55, 0.46, 0.55, 0.50, 0.34, 0.51, 0.56, 0.29, 0.29, 0.54, 0.28, 0.84,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.55, 0.55, 0.55, 0.39, 0.44, 0.35, 0.56, 0.51, 0.76, 0.52, 0.51, 0.45,
        // {     |     }     ~
        0.43, 0.38, 0.43, 0.64,
    ],
    average_char_width: 0.52,
    space_width: 0.24,
};

/// Verdana: a wide humanist sans-serif designed for screens.
static VERDANA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Verdana,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.35, 0.39, 0.46, 0.82, 0.64, 1.07, 0.73, 0.27, 0.45, 0.45, 0.64, 0.82, 0.36, 0.45, 0.36, 0.45,
        // 0     1     2     3     4     5     6     7     8     9
        0.64, 0.64, 0.64, 0.64, 0.64, 0.64, 0.64, 0.64, 0.64, 0.64,
        // :     ;     <     =     >     ?     @
        0.45, 0.45, 0.82, 0.82, 0.82, 0.55, 1.00,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.68, 0.69, 0.70, 0.77, 0.63, 0.57, 0.78, 0.75, 0.42, 0.45, 0.69, 0.56, 0.84,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.75, 0.79, 0.60, 0.79, 0.70, 0.68, 0.62, 0.73, 0.68, 0.99, 0.69, 0.62, 0.69,
        // [     \     ]     ^     _     `
        0.45, 0.45, 0.45, 0.82, 0.64, 0.64,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.60, 0.62, 0.52, 0.62, 0.60, 0.35, 0.62, 0.63, 0.27, 0.34, 0.59, 0.27, 0.97,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.63, 0.61, 0.62, 0.62, 0.43, 0.52, 0.39, 0.63, 0.59, 0.82, 0.59, 0.59, 0.53,
        // {     |     }     ~
        0.63, 0.45, 0.63, 0.82,
    ],
    average_char_width: 0.60,
    space_width: 0.35,
};

/// Courier New: fixed pitch; every glyph advances 0.60 em.
static COURIER_NEW_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::CourierNew,
    widths: [0.60; 95],
    average_char_width: 0.60,
    space_width: 0.60,
};

/// Returns the static metric table for a font family.
pub fn metrics_for(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Arial => &ARIAL_TABLE,
        FontFamily::TimesNewRoman => &TIMES_NEW_ROMAN_TABLE,
        FontFamily::Georgia => &GEORGIA_TABLE,
        FontFamily::Verdana => &VERDANA_TABLE,
        FontFamily::CourierNew => &COURIER_NEW_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
