//! Veriscan library crate: document similarity and authenticity scoring.
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Scan Pipeline
//! - [`ScanOrchestrator`] - Drives a scan from `Queued` to a terminal state
//! - [`ScanStore`], [`MemoryScanStore`] - Persistence boundary for scans
//! - [`ProgressBus`], [`ProgressEvent`] - Live progress pub/sub
//! - [`ScanWatchdog`] - Fails scans whose worker died mid-flight
//!
//! ## Similarity
//! - [`Chunker`], [`Chunk`] - Overlapping character-window chunking
//! - [`EmbeddingClient`], [`HttpEmbeddingClient`] - Text embedding
//! - [`VectorIndexClient`], [`QdrantIndex`] - Chunk vector index
//! - [`SimilarityMatcher`], [`MatchOutcome`] - Per-chunk nearest-neighbor
//!   matching with self-match exclusion
//!
//! ## Authenticity
//! - [`AuthenticityEnsemble`], [`AuthenticityReport`] - Fixed-weight signal
//!   ensemble (classifier, perplexity, burstiness)
//! - [`WebCorroborator`], [`WebSource`] - Web containment corroboration
//! - [`GenaiJudge`] - Optional secondary LLM judgment
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `VERISCAN_*` environment configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod authenticity;
pub mod chunker;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod matcher;
pub mod scan;
pub mod vectordb;
pub mod websearch;

pub use authenticity::{
    AuthenticityEnsemble, AuthenticityError, AuthenticityReport, ClassLabel, Classification,
    GenaiJudge, HttpPerplexityModel, HttpTextClassifier, LlmJudge, LlmJudgment, PerplexityModel,
    SignalBreakdown, TextClassifier, Verdict,
};
#[cfg(any(test, feature = "mock"))]
pub use authenticity::{MockLlmJudge, MockPerplexityModel, MockTextClassifier};

pub use chunker::{Chunk, Chunker, ChunkerError};
pub use config::{Config, ConfigError};

pub use embedding::{EmbeddingClient, EmbeddingConfig, EmbeddingError, HttpEmbeddingClient};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingClient;

pub use matcher::{
    ChunkMatch, MatchCandidate, MatchError, MatchOutcome, MatcherConfig, SimilarityMatcher,
};

pub use scan::{
    Document, DocumentId, DocumentStatus, MemoryScanStore, ProgressBus, ProgressEvent, Scan,
    ScanError, ScanId, ScanOrchestrator, ScanReport, ScanStatus, ScanStore, ScanSummary,
    ScanWatchdog, StoreError,
};

#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockVectorIndex, cosine_similarity};
pub use vectordb::{
    ChunkHit, ChunkPoint, DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE, QdrantIndex,
    VectorDbError, VectorIndexClient, chunk_point_id,
};

#[cfg(any(test, feature = "mock"))]
pub use websearch::{MockPageFetcher, MockSearchProvider};
pub use websearch::{
    CorroboratorConfig, HttpPageFetcher, HttpSearchProvider, PageFetcher, SearchHit,
    SearchProvider, WebCorroborator, WebSearchError, WebSource, containment, generate_queries,
};
