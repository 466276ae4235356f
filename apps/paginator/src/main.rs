//! Binary shell: environment config in, paged HTML out.

mod config;
mod errors;
mod layout;
mod models;
mod pipeline;
mod render;

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::render::markup::CmarkConverter;
use crate::render::renderer::EstimatingRenderer;
use crate::render::{concat_paged_files, write_paged_html};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env().context("failed to load settings")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &settings.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let theme = settings.theme()?;

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: paginator <chapter.md> [--json] | paginator --combine");
    };
    let emit_json = args.any(|a| a == "--json");

    // Combine mode stitches previously paginated chapter files together.
    if input == "--combine" {
        match concat_paged_files(&settings.out_dir)? {
            Some(path) => info!(path = %path.display(), "combined document ready"),
            None => bail!("no chapter files in {}", settings.out_dir.display()),
        }
        return Ok(());
    }

    let source = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {input}"))?;

    let mut renderer = EstimatingRenderer::default();
    let outcome =
        pipeline::paginate_markdown(&source, &theme, &CmarkConverter, &mut renderer).await?;

    std::fs::create_dir_all(&settings.out_dir)
        .with_context(|| format!("failed to create {}", settings.out_dir.display()))?;
    let stem = Path::new(&input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let out_path = settings.out_dir.join(format!("{stem}.html"));
    write_paged_html(&out_path, &outcome.pages, &theme)?;

    if emit_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    info!(
        input = %input,
        output = %out_path.display(),
        pages = outcome.pages.len(),
        "done"
    );

    // Numbered chapters (1.intro.md style) refresh the combined document.
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        concat_paged_files(&settings.out_dir)?;
    }
    Ok(())
}
