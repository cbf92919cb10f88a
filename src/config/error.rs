//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    ParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A float setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Chunk size must be positive.
    #[error("invalid chunk size '{value}': must be greater than zero")]
    InvalidChunkSize { value: usize },

    /// Window overlap must leave a positive stride.
    #[error("invalid chunk overlap {overlap}: must be less than chunk size {chunk_size}")]
    InvalidOverlap { overlap: usize, chunk_size: usize },

    /// Similarity floor must be a cosine score.
    #[error("invalid similarity floor {value}: must be in (0.0, 1.0]")]
    InvalidSimilarityFloor { value: f32 },

    /// Embedding dimension must be positive.
    #[error("invalid embedding dimension '{value}': must be greater than zero")]
    InvalidDimension { value: usize },
}
