//! apt-tracker - Apartment floorplan price tracker CLI
//!
//! Fetches the listing pages of a fixed set of apartment properties and
//! reduces each to the list of floorplan prices it advertises.

pub mod commands;
pub mod config;
pub mod fetch;
pub mod format;
pub mod sites;

pub use config::Config;
pub use sites::models::{AggregateMode, Quote, SiteReport};
pub use sites::registry::Site;
