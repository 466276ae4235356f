//! Layout engine: font metrics, theme model, analytic text measurement and
//! the page compositor.

pub mod font_metrics;
pub mod paginate;
pub mod text;
pub mod theme;

pub use paginate::{paginate, PaginationOutcome};
pub use text::TextMeasure;
pub use theme::{PageGeometry, PageSize, StyleConfig, Theme};
