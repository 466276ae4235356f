//! Markdown to HTML conversion behind a small trait, so the pipeline does
//! not care which markup dialect produced the block stream.

use pulldown_cmark::{html, Options, Parser};

/// Converts an authoring format into the flat HTML the renderer measures.
/// Pure and synchronous.
pub trait MarkupConverter {
    fn to_html(&self, source: &str) -> String;
}

/// CommonMark converter with tables and strikethrough enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkConverter;

impl MarkupConverter for CmarkConverter {
    fn to_html(&self, source: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(source, options);
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Wraps body content in a minimal standalone HTML document.
pub fn html_boilerplate(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>paginator</title>
</head>
<body>
{content}
</body>
</html>"#
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
