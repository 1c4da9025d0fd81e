//! Site-specific modules: the registry, selectors, extraction, and models.

pub mod extract;
pub mod models;
pub mod money;
pub mod registry;
pub mod selectors;

pub use extract::{Extract, Extractors};
pub use models::{AggregateMode, Quote, SiteReport};
pub use registry::{FetchStrategy, Site};
