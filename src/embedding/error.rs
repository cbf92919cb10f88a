use thiserror::Error;

/// Errors returned by the embedding capability.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The HTTP request failed (connect, timeout, non-success status).
    #[error("embedding request to '{url}' failed: {message}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The service returned a body that could not be decoded.
    #[error("failed to decode embedding response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },

    /// The service returned a different number of vectors than inputs.
    #[error("embedding count mismatch: sent {sent} texts, got {received} vectors")]
    CountMismatch { sent: usize, received: usize },

    /// A returned vector had the wrong dimensionality.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },
}
