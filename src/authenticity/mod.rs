//! AI-authenticity assessment.
//!
//! Independent signals are normalized to one 0-100 AI-likelihood scale
//! and combined with fixed weights: an external Real/Fake classifier, a
//! reference model's perplexity, locally computed burstiness, optional
//! web corroboration and an optional secondary LLM judgment.

pub mod client;
pub mod ensemble;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod signals;
pub mod types;


pub use client::{
    GenaiJudge, HttpPerplexityModel, HttpTextClassifier, LlmJudge, PerplexityModel, TextClassifier,
};
pub use ensemble::AuthenticityEnsemble;
pub use error::AuthenticityError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLlmJudge, MockPerplexityModel, MockTextClassifier};
pub use types::{
    AuthenticityReport, ClassLabel, Classification, LlmJudgment, SignalBreakdown, Verdict,
};
