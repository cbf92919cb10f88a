use serde::{Deserialize, Serialize};

/// One raw result from the search capability.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// One corroborating web source in the final report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebSource {
    pub url: String,
    pub title: String,
    /// Containment similarity as a percentage in `[0, 100]`.
    pub similarity_percent: f64,
    pub snippet: String,
}
