use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::client::{LlmJudge, PerplexityModel, TextClassifier};
use super::signals::{burstiness, burstiness_bucket, perplexity_bucket};
use super::types::{AuthenticityReport, SignalBreakdown, Verdict};
use crate::constants::{
    CLASSIFIER_MAX_CHARS, MIN_CLASSIFIABLE_CHARS, WEIGHT_BURSTINESS, WEIGHT_CLASSIFIER,
    WEIGHT_PERPLEXITY,
};
use crate::websearch::WebCorroborator;

/// Fixed-weight ensemble over independent AI-likelihood signals.
///
/// The classifier is the anchor signal: without it there is no score
/// (`Error` verdict). Every other signal degrades to a neutral or absent
/// contribution on failure, so the ensemble itself never returns an error.
pub struct AuthenticityEnsemble {
    classifier: Arc<dyn TextClassifier>,
    perplexity: Arc<dyn PerplexityModel>,
    corroborator: Option<WebCorroborator>,
    judge: Option<Arc<dyn LlmJudge>>,
}

impl std::fmt::Debug for AuthenticityEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticityEnsemble")
            .field("has_corroborator", &self.corroborator.is_some())
            .field("has_judge", &self.judge.is_some())
            .finish()
    }
}

impl AuthenticityEnsemble {
    pub fn new(classifier: Arc<dyn TextClassifier>, perplexity: Arc<dyn PerplexityModel>) -> Self {
        Self {
            classifier,
            perplexity,
            corroborator: None,
            judge: None,
        }
    }

    /// Enables web corroboration (reported, unweighted).
    pub fn with_corroborator(mut self, corroborator: WebCorroborator) -> Self {
        self.corroborator = Some(corroborator);
        self
    }

    /// Enables the secondary LLM judgment (reported, unweighted).
    pub fn with_judge(mut self, judge: Arc<dyn LlmJudge>) -> Self {
        self.judge = Some(judge);
        self
    }

    /// Assesses one document's text. Infallible by contract.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn assess(&self, text: &str) -> AuthenticityReport {
        let truncated: String = text.chars().take(CLASSIFIER_MAX_CHARS).collect();

        if truncated.chars().count() < MIN_CLASSIFIABLE_CHARS {
            debug!("Text below classifiable length");
            return AuthenticityReport::insufficient_data();
        }

        let mut breakdown = SignalBreakdown::default();

        // Anchor signal. If the classifier cannot even attempt scoring,
        // the whole assessment is an error, not a guess.
        let classification = match self.classifier.classify(&truncated).await {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Classifier unavailable");
                breakdown.classifier_error = Some(e.to_string());
                return AuthenticityReport {
                    ai_probability: 0.0,
                    label: Verdict::Error,
                    breakdown,
                };
            }
        };

        let classifier_score = classification.ai_probability();
        breakdown.classifier = Some(classification);

        let perplexity_score = match self.perplexity.perplexity(text).await {
            Ok(p) => {
                breakdown.perplexity = Some(p);
                perplexity_bucket(p)
            }
            Err(e) => {
                warn!(error = %e, "Perplexity signal failed");
                breakdown.perplexity_error = Some(e.to_string());
                0.0
            }
        };
        breakdown.perplexity_score = perplexity_score;

        let b = burstiness(text);
        let burstiness_score = burstiness_bucket(b);
        breakdown.burstiness = b;
        breakdown.burstiness_score = burstiness_score;

        if let Some(corroborator) = &self.corroborator {
            match corroborator.corroborate(text).await {
                Ok(sources) => breakdown.web_sources = sources,
                Err(e) => {
                    warn!(error = %e, "Web corroboration failed");
                    breakdown.web_error = Some(e.to_string());
                }
            }
        }

        if let Some(judge) = &self.judge {
            match judge.judge(&truncated).await {
                Ok(judgment) => breakdown.llm_judgment = Some(judgment),
                Err(e) => {
                    warn!(error = %e, "LLM judgment failed");
                    breakdown.llm_error = Some(e.to_string());
                }
            }
        }

        let final_score = WEIGHT_CLASSIFIER * classifier_score
            + WEIGHT_PERPLEXITY * perplexity_score
            + WEIGHT_BURSTINESS * burstiness_score;
        let final_score = (final_score * 100.0).round() / 100.0;

        debug!(
            classifier_score,
            perplexity_score, burstiness_score, final_score, "Ensemble combined"
        );

        AuthenticityReport {
            ai_probability: final_score,
            label: Verdict::for_score(final_score),
            breakdown,
        }
    }
}
