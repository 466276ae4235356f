//! Output sink: serializes paginated pages to HTML and handles the
//! numbered-chapter concatenation step.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::EngineError;
use crate::layout::theme::Theme;
use crate::models::Page;

/// Serializes pages as a run of fixed-size `innerPage` containers. The
/// theme's stylesheet gives each container its page box.
pub fn pages_to_html(pages: &[Page]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str("<div class=\"innerPage\">");
        out.push_str(&page.html());
        out.push_str("</div>");
    }
    out
}

/// Writes a standalone HTML document: boilerplate head with the theme's
/// stylesheet embedded, pages as the body.
pub fn write_paged_html(path: &Path, pages: &[Page], theme: &Theme) -> Result<(), EngineError> {
    let document = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>paginator</title>
<style>
{css}</style>
</head>
<body>
{body}
</body>
</html>"#,
        css = theme.stylesheet(),
        body = pages_to_html(pages),
    );
    fs::write(path, document)?;
    info!(path = %path.display(), pages = pages.len(), "wrote paged document");
    Ok(())
}

/// Concatenates numbered chapter files in a directory into one document.
///
/// Picks every `<number><anything>.html` file except the output itself,
/// orders by the leading number, joins with `<br>`, and writes
/// `final.html` alongside them. Returns the combined path, or `None` when
/// the directory holds no numbered chapters.
pub fn concat_paged_files(dir: &Path) -> Result<Option<PathBuf>, EngineError> {
    let mut chapters: Vec<(u32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        if let Some(number) = leading_number(name) {
            chapters.push((number, path));
        }
    }

    if chapters.is_empty() {
        warn!(dir = %dir.display(), "no numbered chapter files to combine");
        return Ok(None);
    }
    chapters.sort_by_key(|(number, _)| *number);

    let mut contents = Vec::with_capacity(chapters.len());
    for (_, path) in &chapters {
        contents.push(fs::read_to_string(path)?);
    }
    let combined = contents.join("<br>");

    let out_path = dir.join("final.html");
    fs::write(&out_path, combined)?;
    info!(
        chapters = chapters.len(),
        path = %out_path.display(),
        "combined chapter files"
    );
    Ok(Some(out_path))
}

fn leading_number(name: &str) -> Option<u32> {
    let digits: String = name.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
