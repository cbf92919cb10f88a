//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VERISCAN_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;

use crate::constants::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_EMBEDDING_DIM, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MIN_SIMILARITY, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOP_K,
    DEFAULT_WATCHDOG_STALE_AFTER_SECS,
};
use crate::vectordb::DEFAULT_COLLECTION_NAME;

/// Default Qdrant URL used when `VERISCAN_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
/// Default embedding service URL.
pub const DEFAULT_EMBEDDING_URL: &str = "http://localhost:8081/embed";
/// Default AI-text classifier URL.
pub const DEFAULT_CLASSIFIER_URL: &str = "http://localhost:8082/classify";
/// Default perplexity scorer URL.
pub const DEFAULT_PERPLEXITY_URL: &str = "http://localhost:8082/perplexity";
/// Default web search endpoint (SearxNG-compatible JSON API).
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:8090/search";

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VERISCAN_*` overrides on top of
/// defaults, then [`Config::validate`] before wiring the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Qdrant collection holding chunk vectors. Default: `veriscan_chunks`.
    pub collection_name: String,

    /// Embedding service URL. Default: `http://localhost:8081/embed`.
    pub embedding_url: String,

    /// Vector width produced by the embedding service. Default: `384`.
    pub embedding_dimension: usize,

    /// AI-text classifier URL. Default: `http://localhost:8082/classify`.
    pub classifier_url: String,

    /// Perplexity scorer URL. Default: `http://localhost:8082/perplexity`.
    pub perplexity_url: String,

    /// Web search endpoint. Default: `http://localhost:8090/search`.
    pub search_url: String,

    /// LLM judge model name. Default: `gpt-4o-mini`.
    pub judge_model: String,

    /// Chunk window size in characters. Default: `500`.
    pub chunk_size: usize,

    /// Overlap between consecutive windows. Default: `50`.
    pub chunk_overlap: usize,

    /// Neighbors requested per chunk. Default: `5`.
    pub top_k: u64,

    /// Cosine similarity floor for a match. Default: `0.8`.
    pub min_similarity: f32,

    /// Timeout for model/search service calls, in seconds. Default: `30`.
    pub request_timeout_secs: u64,

    /// Timeout for fetching a corroboration page, in seconds. Default: `30`.
    pub fetch_timeout_secs: u64,

    /// Age at which a silent `Scanning` scan is failed by the watchdog,
    /// in seconds. Default: `600`.
    pub watchdog_stale_after_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_dimension: DEFAULT_EMBEDDING_DIM,
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            perplexity_url: DEFAULT_PERPLEXITY_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            judge_model: "gpt-4o-mini".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            watchdog_stale_after_secs: DEFAULT_WATCHDOG_STALE_AFTER_SECS,
        }
    }
}

impl Config {
    const ENV_QDRANT_URL: &'static str = "VERISCAN_QDRANT_URL";
    const ENV_COLLECTION_NAME: &'static str = "VERISCAN_COLLECTION_NAME";
    const ENV_EMBEDDING_URL: &'static str = "VERISCAN_EMBEDDING_URL";
    const ENV_EMBEDDING_DIMENSION: &'static str = "VERISCAN_EMBEDDING_DIMENSION";
    const ENV_CLASSIFIER_URL: &'static str = "VERISCAN_CLASSIFIER_URL";
    const ENV_PERPLEXITY_URL: &'static str = "VERISCAN_PERPLEXITY_URL";
    const ENV_SEARCH_URL: &'static str = "VERISCAN_SEARCH_URL";
    const ENV_JUDGE_MODEL: &'static str = "VERISCAN_JUDGE_MODEL";
    const ENV_CHUNK_SIZE: &'static str = "VERISCAN_CHUNK_SIZE";
    const ENV_CHUNK_OVERLAP: &'static str = "VERISCAN_CHUNK_OVERLAP";
    const ENV_TOP_K: &'static str = "VERISCAN_TOP_K";
    const ENV_MIN_SIMILARITY: &'static str = "VERISCAN_MIN_SIMILARITY";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "VERISCAN_REQUEST_TIMEOUT_SECS";
    const ENV_FETCH_TIMEOUT_SECS: &'static str = "VERISCAN_FETCH_TIMEOUT_SECS";
    const ENV_WATCHDOG_STALE_AFTER_SECS: &'static str = "VERISCAN_WATCHDOG_STALE_AFTER_SECS";

    /// Loads configuration from environment variables (falling back to
    /// defaults), then validates the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            qdrant_url: Self::parse_string(Self::ENV_QDRANT_URL, defaults.qdrant_url),
            collection_name: Self::parse_string(
                Self::ENV_COLLECTION_NAME,
                defaults.collection_name,
            ),
            embedding_url: Self::parse_string(Self::ENV_EMBEDDING_URL, defaults.embedding_url),
            embedding_dimension: Self::parse_usize(
                Self::ENV_EMBEDDING_DIMENSION,
                defaults.embedding_dimension,
            )?,
            classifier_url: Self::parse_string(Self::ENV_CLASSIFIER_URL, defaults.classifier_url),
            perplexity_url: Self::parse_string(Self::ENV_PERPLEXITY_URL, defaults.perplexity_url),
            search_url: Self::parse_string(Self::ENV_SEARCH_URL, defaults.search_url),
            judge_model: Self::parse_string(Self::ENV_JUDGE_MODEL, defaults.judge_model),
            chunk_size: Self::parse_usize(Self::ENV_CHUNK_SIZE, defaults.chunk_size)?,
            chunk_overlap: Self::parse_usize(Self::ENV_CHUNK_OVERLAP, defaults.chunk_overlap)?,
            top_k: Self::parse_u64(Self::ENV_TOP_K, defaults.top_k)?,
            min_similarity: Self::parse_f32(Self::ENV_MIN_SIMILARITY, defaults.min_similarity)?,
            request_timeout_secs: Self::parse_u64(
                Self::ENV_REQUEST_TIMEOUT_SECS,
                defaults.request_timeout_secs,
            )?,
            fetch_timeout_secs: Self::parse_u64(
                Self::ENV_FETCH_TIMEOUT_SECS,
                defaults.fetch_timeout_secs,
            )?,
            watchdog_stale_after_secs: Self::parse_u64(
                Self::ENV_WATCHDOG_STALE_AFTER_SECS,
                defaults.watchdog_stale_after_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the basic invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize {
                value: self.chunk_size,
            });
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::InvalidOverlap {
                overlap: self.chunk_overlap,
                chunk_size: self.chunk_size,
            });
        }
        if !(self.min_similarity > 0.0 && self.min_similarity <= 1.0) {
            return Err(ConfigError::InvalidSimilarityFloor {
                value: self.min_similarity,
            });
        }
        if self.embedding_dimension == 0 {
            return Err(ConfigError::InvalidDimension {
                value: self.embedding_dimension,
            });
        }
        Ok(())
    }

    fn parse_string(var_name: &'static str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_usize(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u64(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_f32(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::FloatParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
