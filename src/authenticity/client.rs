use std::time::Duration;

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};
use serde::Deserialize;
use tracing::debug;

use super::error::AuthenticityError;
use super::types::{ClassLabel, Classification, LlmJudgment};
use crate::constants::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Real/Fake text classifier capability.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, AuthenticityError>;
}

/// Reference-model perplexity capability.
#[async_trait]
pub trait PerplexityModel: Send + Sync {
    async fn perplexity(&self, text: &str) -> Result<f64, AuthenticityError>;
}

/// Optional secondary judgment from a general-purpose LLM.
#[async_trait]
pub trait LlmJudge: Send + Sync {
    async fn judge(&self, text: &str) -> Result<LlmJudgment, AuthenticityError>;
}

#[derive(Deserialize)]
struct ClassifierResponse {
    label: String,
    score: f64,
}

/// HTTP client for a HF-style text-classification inference endpoint.
///
/// Expects a single `{"label": "Real"|"Fake", "score": 0.x}` object back.
#[derive(Debug, Clone)]
pub struct HttpTextClassifier {
    http: reqwest::Client,
    url: String,
}

impl HttpTextClassifier {
    pub fn new(url: impl Into<String>) -> Result<Self, AuthenticityError> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthenticityError> {
        let url = url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "classifier",
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl TextClassifier for HttpTextClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, AuthenticityError> {
        debug!(url = %self.url, text_len = text.len(), "Classifying text");

        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "classifier",
                url: self.url.clone(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "classifier",
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let body: ClassifierResponse =
            response
                .json()
                .await
                .map_err(|e| AuthenticityError::InvalidResponse {
                    capability: "classifier",
                    message: e.to_string(),
                })?;

        let label = match body.label.as_str() {
            "Fake" | "fake" | "FAKE" => ClassLabel::Fake,
            "Real" | "real" | "REAL" => ClassLabel::Real,
            other => {
                return Err(AuthenticityError::InvalidResponse {
                    capability: "classifier",
                    message: format!("unknown label '{other}'"),
                });
            }
        };

        Ok(Classification {
            label,
            confidence: body.score.clamp(0.0, 1.0),
        })
    }
}

#[derive(Deserialize)]
struct PerplexityResponse {
    perplexity: f64,
}

/// HTTP client for a perplexity scoring endpoint.
#[derive(Debug, Clone)]
pub struct HttpPerplexityModel {
    http: reqwest::Client,
    url: String,
}

impl HttpPerplexityModel {
    pub fn new(url: impl Into<String>) -> Result<Self, AuthenticityError> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthenticityError> {
        let url = url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "perplexity",
                url: url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl PerplexityModel for HttpPerplexityModel {
    async fn perplexity(&self, text: &str) -> Result<f64, AuthenticityError> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "perplexity",
                url: self.url.clone(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| AuthenticityError::RequestFailed {
                capability: "perplexity",
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let body: PerplexityResponse =
            response
                .json()
                .await
                .map_err(|e| AuthenticityError::InvalidResponse {
                    capability: "perplexity",
                    message: e.to_string(),
                })?;

        Ok(body.perplexity)
    }
}

const JUDGE_PROMPT: &str = "You are an expert AI detection system. Analyze the \
following text and determine if it was written by an AI or a Human. Respond in \
JSON with two keys: \"is_ai\" (boolean) and \"reason\" (brief explanation).";

/// Text sent to the judge is capped to leave context room for the prompt.
const JUDGE_MAX_CHARS: usize = 6000;

/// Secondary judgment via a chat model through `genai`.
pub struct GenaiJudge {
    client: genai::Client,
    model: String,
}

impl GenaiJudge {
    /// Provider credentials come from the environment, resolved by `genai`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: genai::Client::default(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl LlmJudge for GenaiJudge {
    async fn judge(&self, text: &str) -> Result<LlmJudgment, AuthenticityError> {
        let truncated: String = text.chars().take(JUDGE_MAX_CHARS).collect();

        let request = ChatRequest::new(vec![
            ChatMessage::system(JUDGE_PROMPT),
            ChatMessage::user(format!("Text: \"{truncated}\"")),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| AuthenticityError::LlmFailed {
                message: e.to_string(),
            })?;

        let analysis = response.first_text().unwrap_or_default().to_string();

        // Tolerant parse: models do not reliably emit clean JSON.
        let is_ai = analysis.to_lowercase().contains("true");

        Ok(LlmJudgment { is_ai, analysis })
    }
}
