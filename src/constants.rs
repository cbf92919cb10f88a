//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//! Scoring thresholds and ensemble weights are part of the engine's
//! contract: tests pin them, and reports generated with different values
//! are not comparable across versions.

/// Default chunk window, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default overlap between consecutive chunks, in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Nearest neighbors requested per chunk query.
pub const DEFAULT_TOP_K: u64 = 5;

/// Minimum cosine similarity for a vector hit to count as a match.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.8;

/// Embedding dimensionality of the default index (all-MiniLM-class models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

pub const DEFAULT_EMBEDDING_DIM_U64: u64 = DEFAULT_EMBEDDING_DIM as u64;

/// Texts shorter than this cannot be meaningfully classified.
pub const MIN_CLASSIFIABLE_CHARS: usize = 50;

/// Upper bound on classifier input; roughly 512 tokens for BERT-class models.
pub const CLASSIFIER_MAX_CHARS: usize = 2000;

/// Ensemble weights. Web corroboration and the secondary LLM judgment are
/// reported but unweighted; see `authenticity::ensemble`.
pub const WEIGHT_CLASSIFIER: f64 = 0.6;
pub const WEIGHT_PERPLEXITY: f64 = 0.2;
pub const WEIGHT_BURSTINESS: f64 = 0.2;

/// Verdict thresholds on the final 0-100 AI-likelihood score.
pub const VERDICT_AI_GENERATED: f64 = 85.0;
pub const VERDICT_LIKELY_AI: f64 = 60.0;
pub const VERDICT_MIXED: f64 = 40.0;

/// Web corroboration tuning.
pub const MIN_CONTAINMENT: f64 = 0.05;
pub const DOMINANT_CONTAINMENT: f64 = 0.80;
pub const MAX_WEB_SOURCES: usize = 2;
pub const RESULTS_PER_QUERY: usize = 5;
pub const MAX_QUERY_WORDS: usize = 25;
pub const MIN_QUERY_SENTENCE_WORDS: usize = 15;
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Per-page fetch timeout for web corroboration, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default timeout for embedding/classifier/perplexity HTTP calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// A `Scanning` scan with no progress update for this long is considered
/// stuck and gets failed by the watchdog.
pub const DEFAULT_WATCHDOG_STALE_AFTER_SECS: u64 = 600;

pub const WATCHDOG_CHECK_INTERVAL_SECS: u64 = 30;

/// Progress checkpoints committed by the orchestrator, in order.
pub const PROGRESS_INIT: u8 = 0;
pub const PROGRESS_CHUNKING: u8 = 10;
pub const PROGRESS_EMBEDDING: u8 = 30;
pub const PROGRESS_MATCHING: u8 = 50;
pub const PROGRESS_AUTHENTICITY: u8 = 70;
pub const PROGRESS_REPORT: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;
