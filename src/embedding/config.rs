use std::time::Duration;

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Configuration for the HTTP embedding client.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Embedding service endpoint (text-embeddings-inference style).
    pub url: String,

    /// Expected vector dimensionality. Responses with a different
    /// dimension are rejected rather than silently indexed.
    pub dimension: usize,

    /// Request timeout.
    pub timeout: Duration,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081/embed".to_string(),
            dimension: DEFAULT_EMBEDDING_DIM,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl EmbeddingConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
