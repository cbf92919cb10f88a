use serde::{Deserialize, Serialize};

use crate::constants::{VERDICT_AI_GENERATED, VERDICT_LIKELY_AI, VERDICT_MIXED};
use crate::websearch::WebSource;

/// Raw output of the external text classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassLabel {
    /// Human-written.
    Real,
    /// Machine-generated.
    Fake,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub label: ClassLabel,
    /// Classifier confidence in its own label, in `[0, 1]`.
    pub confidence: f64,
}

impl Classification {
    /// Converts to the shared 0-100 AI-likelihood scale.
    pub fn ai_probability(&self) -> f64 {
        let raw = match self.label {
            ClassLabel::Fake => self.confidence * 100.0,
            ClassLabel::Real => (1.0 - self.confidence) * 100.0,
        };
        (raw * 100.0).round() / 100.0
    }
}

/// Output of the optional secondary LLM judgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmJudgment {
    pub is_ai: bool,
    /// The model's own free-text reasoning.
    pub analysis: String,
}

/// Human-facing verdict over the final ensemble score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Human")]
    Human,
    #[serde(rename = "Mixed / Unsure")]
    MixedUnsure,
    #[serde(rename = "Likely AI")]
    LikelyAi,
    #[serde(rename = "AI Generated")]
    AiGenerated,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
    #[serde(rename = "Error")]
    Error,
}

impl Verdict {
    /// Maps a final 0-100 score to a verdict.
    pub fn for_score(score: f64) -> Self {
        if score > VERDICT_AI_GENERATED {
            Verdict::AiGenerated
        } else if score > VERDICT_LIKELY_AI {
            Verdict::LikelyAi
        } else if score > VERDICT_MIXED {
            Verdict::MixedUnsure
        } else {
            Verdict::Human
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::Human => "Human",
            Verdict::MixedUnsure => "Mixed / Unsure",
            Verdict::LikelyAi => "Likely AI",
            Verdict::AiGenerated => "AI Generated",
            Verdict::InsufficientData => "Insufficient Data",
            Verdict::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Per-signal detail carried in the report.
///
/// Web sources and the LLM judgment are informational only; they do not
/// enter the weighted average (adding them a weight is a deliberate,
/// documented decision, not a default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier_error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub perplexity: Option<f64>,
    pub perplexity_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perplexity_error: Option<String>,

    pub burstiness: f64,
    pub burstiness_score: f64,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub web_sources: Vec<WebSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_judgment: Option<LlmJudgment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_error: Option<String>,
}

/// Final authenticity assessment for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticityReport {
    /// Weighted AI-likelihood in `[0, 100]`, rounded to 2 decimals.
    pub ai_probability: f64,
    pub label: Verdict,
    pub breakdown: SignalBreakdown,
}

impl AuthenticityReport {
    /// Report for text too short to classify.
    pub fn insufficient_data() -> Self {
        Self {
            ai_probability: 0.0,
            label: Verdict::InsufficientData,
            breakdown: SignalBreakdown::default(),
        }
    }
}
