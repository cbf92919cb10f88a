use async_trait::async_trait;
use parking_lot::RwLock;

use super::client::{LlmJudge, PerplexityModel, TextClassifier};
use super::error::AuthenticityError;
use super::types::{ClassLabel, Classification, LlmJudgment};

/// Scriptable classifier for tests.
pub struct MockTextClassifier {
    result: RwLock<Result<Classification, String>>,
}

impl MockTextClassifier {
    pub fn returning(label: ClassLabel, confidence: f64) -> Self {
        Self {
            result: RwLock::new(Ok(Classification { label, confidence })),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: RwLock::new(Err(message.into())),
        }
    }

    pub fn script(&self, label: ClassLabel, confidence: f64) {
        *self.result.write() = Ok(Classification { label, confidence });
    }
}

#[async_trait]
impl TextClassifier for MockTextClassifier {
    async fn classify(&self, _text: &str) -> Result<Classification, AuthenticityError> {
        self.result
            .read()
            .clone()
            .map_err(|message| AuthenticityError::RequestFailed {
                capability: "classifier",
                url: "mock://classifier".to_string(),
                message,
            })
    }
}

/// Scriptable perplexity model for tests.
pub struct MockPerplexityModel {
    result: RwLock<Result<f64, String>>,
}

impl MockPerplexityModel {
    pub fn returning(perplexity: f64) -> Self {
        Self {
            result: RwLock::new(Ok(perplexity)),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: RwLock::new(Err(message.into())),
        }
    }
}

#[async_trait]
impl PerplexityModel for MockPerplexityModel {
    async fn perplexity(&self, _text: &str) -> Result<f64, AuthenticityError> {
        self.result
            .read()
            .clone()
            .map_err(|message| AuthenticityError::RequestFailed {
                capability: "perplexity",
                url: "mock://perplexity".to_string(),
                message,
            })
    }
}

/// Fixed-answer LLM judge for tests.
pub struct MockLlmJudge {
    is_ai: bool,
}

impl MockLlmJudge {
    pub fn answering(is_ai: bool) -> Self {
        Self { is_ai }
    }
}

#[async_trait]
impl LlmJudge for MockLlmJudge {
    async fn judge(&self, _text: &str) -> Result<LlmJudgment, AuthenticityError> {
        Ok(LlmJudgment {
            is_ai: self.is_ai,
            analysis: format!("{{\"is_ai\": {}, \"reason\": \"mock\"}}", self.is_ai),
        })
    }
}
