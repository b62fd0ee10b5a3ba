//! Engine for a side-by-side font comparison tool.
//!
//! Two text previews share weight, style, size, background, and sample-text
//! parameters; fonts can be swapped, favorited, and ingested from user
//! files. The load path resolves a requested (family, weight, style) to the
//! best available resource, dedupes concurrent requests, caches outcomes,
//! and degrades through a fallback chain, so a preview is always renderable
//! even when the exact variant never arrives.

pub mod catalog;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod load_cache;
pub mod registry;
pub mod resolver;
pub mod services;
pub mod settings;
pub mod state;

pub use catalog::{FontCatalog, FontDescriptor, FontStyle, VariantSpec};
pub use error::{AppError, Result};
pub use load_cache::FontLoadCache;
pub use registry::{FontRegistry, FontdbRegistry};
pub use services::FontLoadService;
pub use settings::Settings;
pub use state::{LoadRequest, SelectionController, SelectionState, Side};
