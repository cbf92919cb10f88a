use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::config::EmbeddingConfig;
use super::error::EmbeddingError;

/// Async embedding capability.
///
/// Implementations must be deterministic enough that the same input maps
/// to the same (or a near-identical) vector, otherwise re-scans drift.
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embeds a batch of texts, one vector per input, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [String],
}

/// HTTP client for a text-embeddings-inference style endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingClient {
    http: reqwest::Client,
    config: EmbeddingConfig,
}

impl HttpEmbeddingClient {
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::RequestFailed {
                url: config.url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    fn validate(&self, sent: usize, vectors: &[Vec<f32>]) -> Result<(), EmbeddingError> {
        if vectors.len() != sent {
            return Err(EmbeddingError::CountMismatch {
                sent,
                received: vectors.len(),
            });
        }
        for vector in vectors {
            if vector.len() != self.config.dimension {
                return Err(EmbeddingError::InvalidDimension {
                    expected: self.config.dimension,
                    actual: vector.len(),
                });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn validate_for_test(
        &self,
        sent: usize,
        vectors: &[Vec<f32>],
    ) -> Result<(), EmbeddingError> {
        self.validate(sent, vectors)
    }
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch = texts.len(), url = %self.config.url, "Requesting embeddings");

        let response = self
            .http
            .post(&self.config.url)
            .json(&EmbedRequest { inputs: texts })
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                url: self.config.url.clone(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| EmbeddingError::RequestFailed {
                url: self.config.url.clone(),
                message: e.to_string(),
            })?;

        let vectors: Vec<Vec<f32>> =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    message: e.to_string(),
                })?;

        self.validate(texts.len(), &vectors)?;
        Ok(vectors)
    }
}
