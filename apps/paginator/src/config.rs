//! Environment-based settings. Every knob has a default, so an empty
//! environment yields the stock A4 setup.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::font_metrics::FontFamily;
use crate::layout::theme::{PageSize, StyleConfig, Theme};

#[derive(Debug, Clone)]
pub struct Settings {
    pub page_size: PageSize,
    /// Margin overrides; `None` keeps the preset's 50px.
    pub margin_lr: Option<f32>,
    pub margin_tb: Option<f32>,
    pub style: StyleConfig,
    pub out_dir: PathBuf,
    pub rust_log: String,
}

impl Settings {
    /// Loads settings from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Environment-independent core of `from_env`, parameterized over the
    /// variable source so tests do not mutate process state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let page_size = match get("PAGE_SIZE") {
            Some(raw) => PageSize::parse(&raw)
                .ok_or_else(|| anyhow!("PAGE_SIZE '{raw}' is not one of A4, A5, A6, B5"))?,
            None => PageSize::A4,
        };

        let defaults = StyleConfig::default();
        let style = StyleConfig {
            body_font: parse_font(&get, "BODY_FONT", defaults.body_font)?,
            header_font: parse_font(&get, "HEADER_FONT", defaults.header_font)?,
            body_font_size_px: parse_f32(&get, "BODY_FONT_SIZE_PX", defaults.body_font_size_px)?,
            paragraph_indent_px: parse_f32(
                &get,
                "PARAGRAPH_INDENT_PX",
                defaults.paragraph_indent_px,
            )?,
        };

        let margin_lr = parse_opt_f32(&get, "PAGE_MARGIN_LR")?;
        let margin_tb = parse_opt_f32(&get, "PAGE_MARGIN_TB")?;

        let out_dir = get("OUT_DIR").map(PathBuf::from).unwrap_or_else(|| ".".into());
        let rust_log = get("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Settings {
            page_size,
            margin_lr,
            margin_tb,
            style,
            out_dir,
            rust_log,
        })
    }

    /// Builds the validated theme these settings describe.
    pub fn theme(&self) -> Result<Theme> {
        let mut geometry = self.page_size.geometry();
        if let Some(lr) = self.margin_lr {
            geometry.margin_lr = lr;
        }
        if let Some(tb) = self.margin_tb {
            geometry.margin_tb = tb;
        }
        Theme::new(geometry, self.style.clone()).context("settings describe an invalid theme")
    }
}

fn parse_font(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: FontFamily,
) -> Result<FontFamily> {
    match get(key) {
        Some(raw) => {
            FontFamily::parse(&raw).ok_or_else(|| anyhow!("{key} '{raw}' is not a known font"))
        }
        None => Ok(default),
    }
}

fn parse_f32(get: &impl Fn(&str) -> Option<String>, key: &str, default: f32) -> Result<f32> {
    match get(key) {
        Some(raw) => raw
            .parse::<f32>()
            .with_context(|| format!("{key} '{raw}' is not a number")),
        None => Ok(default),
    }
}

fn parse_opt_f32(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f32>> {
    match get(key) {
        Some(raw) => raw
            .parse::<f32>()
            .map(Some)
            .with_context(|| format!("{key} '{raw}' is not a number")),
        None => Ok(None),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_map<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(settings.page_size, PageSize::A4);
        assert_eq!(settings.style.body_font_size_px, 12.0);
        assert_eq!(settings.style.paragraph_indent_px, 30.0);
        assert!(settings.margin_lr.is_none());

        let theme = settings.theme().expect("default theme");
        assert_eq!(theme.inner_height(), 742.0);
    }

    #[test]
    fn test_overrides_apply() {
        let mut vars = HashMap::new();
        vars.insert("PAGE_SIZE", "a5");
        vars.insert("BODY_FONT", "Georgia");
        vars.insert("BODY_FONT_SIZE_PX", "14");
        vars.insert("PAGE_MARGIN_TB", "40");
        let settings = Settings::from_lookup(lookup_map(&vars)).expect("valid overrides");

        assert_eq!(settings.page_size, PageSize::A5);
        assert_eq!(settings.style.body_font, FontFamily::Georgia);
        let theme = settings.theme().unwrap();
        assert_eq!(theme.line_height(), 21.0);
        assert_eq!(theme.inner_height(), 595.0 - 80.0);
    }

    #[test]
    fn test_invalid_page_size_is_an_error() {
        let mut vars = HashMap::new();
        vars.insert("PAGE_SIZE", "letter");
        assert!(Settings::from_lookup(lookup_map(&vars)).is_err());
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let mut vars = HashMap::new();
        vars.insert("BODY_FONT_SIZE_PX", "tiny");
        assert!(Settings::from_lookup(lookup_map(&vars)).is_err());
    }

    #[test]
    fn test_oversized_margins_fail_at_theme_build() {
        let mut vars = HashMap::new();
        vars.insert("PAGE_MARGIN_LR", "400");
        let settings = Settings::from_lookup(lookup_map(&vars)).expect("parse ok");
        assert!(settings.theme().is_err());
    }
}
