use serde::{Deserialize, Serialize};

use crate::vectordb::ChunkHit;

/// One cross-document candidate returned by the index for a query chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchCandidate {
    pub source_document_id: i64,
    pub text: String,
    /// Cosine similarity in `[0, 1]`.
    pub score: f32,
}

impl From<ChunkHit> for MatchCandidate {
    fn from(hit: ChunkHit) -> Self {
        Self {
            source_document_id: hit.document_id,
            text: hit.text,
            score: hit.score,
        }
    }
}

/// The best surviving candidate for one chunk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMatch {
    pub chunk_index: usize,
    pub chunk_text: String,
    pub best_match: MatchCandidate,
}

/// Document-level matching result.
///
/// `overall_score` is a coverage metric: the percentage of chunks with any
/// match above the similarity floor. It ignores how strong the matches are;
/// a known limitation kept for report comparability (per-chunk scores are
/// still carried in `chunk_matches`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchOutcome {
    pub chunk_matches: Vec<ChunkMatch>,
    pub matched_chunks: usize,
    pub total_chunks: usize,
    pub overall_score: f64,
}

impl MatchOutcome {
    pub fn coverage_score(matched: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let raw = matched as f64 / total as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}
