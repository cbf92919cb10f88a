use thiserror::Error;

/// Errors from the web corroboration capabilities.
///
/// These never propagate past the authenticity ensemble; they end up as an
/// error note in the report's signal breakdown.
#[derive(Debug, Error)]
pub enum WebSearchError {
    /// The search endpoint request failed.
    #[error("web search for '{query}' failed: {message}")]
    SearchFailed {
        /// The query that failed.
        query: String,
        /// Error message.
        message: String,
    },

    /// A page fetch failed outright (fetch timeouts degrade to empty
    /// content instead and do not produce this error).
    #[error("failed to fetch '{url}': {message}")]
    FetchFailed {
        /// Page URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build web client: {message}")]
    ClientBuildFailed {
        /// Error message.
        message: String,
    },
}
