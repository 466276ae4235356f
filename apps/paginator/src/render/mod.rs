//! Rendering boundary: markup conversion in, measured blocks through, paged
//! HTML out.

pub mod markup;
pub mod output;
pub mod renderer;

pub use markup::{html_boilerplate, CmarkConverter, MarkupConverter};
pub use output::{concat_paged_files, pages_to_html, write_paged_html};
pub use renderer::{BlockRenderer, EstimatingRenderer, RenderError};
