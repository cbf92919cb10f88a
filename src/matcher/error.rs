use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

/// Errors from the similarity matching stage. All of these are fatal to
/// the scan that triggered them.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The embedding capability failed or timed out.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The vector index query failed.
    #[error("vector index query failed: {0}")]
    Index(#[from] VectorDbError),

    /// Chunk and embedding counts diverged; indicates a bug upstream.
    #[error("chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    CountMismatch { chunks: usize, embeddings: usize },
}
