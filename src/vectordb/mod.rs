//! Qdrant-backed chunk index.
//!
//! The index is append/delete by ingestion and query-only during scanning.
//! Points are keyed by `(document_id, chunk_index)` so re-ingesting a
//! document upserts its chunks in place instead of duplicating them.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;


pub use client::{QdrantIndex, VectorIndexClient};
pub use error::VectorDbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockVectorIndex, cosine_similarity};
pub use model::{ChunkHit, ChunkPoint, chunk_point_id};

pub const DEFAULT_COLLECTION_NAME: &str = "veriscan_chunks";

pub const DEFAULT_VECTOR_SIZE: u64 = crate::constants::DEFAULT_EMBEDDING_DIM_U64;
