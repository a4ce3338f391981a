//! Static site generator for bipscript example documentation.
//!
//! Renders every example script under the input root to an HTML page with
//! highlighted code, prose and audio, plus the example index and demo gallery.

pub mod assets;
pub mod builder;
pub mod catalog;
pub mod render;
pub mod templates;

pub use assets::AssetPaths;
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use catalog::{parse_catalog, CatalogEntry, CatalogError, CatalogKind};
pub use render::{CmarkRenderer, MarkdownOptions, MarkdownRenderer, QuoteStyle};
