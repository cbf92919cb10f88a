//! Embedding capability boundary.
//!
//! Embeddings are computed by an external inference service; this module
//! only defines the consuming contract and an HTTP client for it. The scan
//! pipeline treats embedding failure as fatal (it blocks similarity
//! matching), so errors propagate instead of degrading.

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::{EmbeddingClient, HttpEmbeddingClient};
pub use config::EmbeddingConfig;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingClient;
