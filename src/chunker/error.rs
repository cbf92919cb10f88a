use thiserror::Error;

/// Chunker construction errors.
#[derive(Debug, Error)]
pub enum ChunkerError {
    /// A zero-width window can never advance.
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,

    /// The walk must advance by at least one character per window.
    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { overlap: usize, chunk_size: usize },
}
