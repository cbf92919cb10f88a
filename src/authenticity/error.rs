use thiserror::Error;

/// Errors from the authenticity signal capabilities.
///
/// The ensemble recovers from all of these locally; they surface only as
/// notes in the report breakdown, never as scan failures.
#[derive(Debug, Error)]
pub enum AuthenticityError {
    /// A signal service request failed.
    #[error("{capability} request to '{url}' failed: {message}")]
    RequestFailed {
        /// Which capability failed (classifier, perplexity).
        capability: &'static str,
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// A signal service returned an undecodable body.
    #[error("failed to decode {capability} response: {message}")]
    InvalidResponse {
        capability: &'static str,
        message: String,
    },

    /// The secondary LLM call failed.
    #[error("LLM judgment failed: {message}")]
    LlmFailed { message: String },
}
