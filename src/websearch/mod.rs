//! Web corroboration: search, fetch, and containment ranking.
//!
//! Strictly an optional enrichment. The ensemble swallows every error from
//! this module; nothing here may fail a scan.

pub mod client;
pub mod containment;
pub mod corroborator;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod query;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{HttpPageFetcher, HttpSearchProvider, PageFetcher, SearchProvider};
pub use containment::containment;
pub use corroborator::{CorroboratorConfig, WebCorroborator};
pub use error::WebSearchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockPageFetcher, MockSearchProvider};
pub use query::generate_queries;
pub use types::{SearchHit, WebSource};
