//! Per-chunk similarity matching against the vector index.

pub mod error;
pub mod matcher;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::MatchError;
pub use matcher::{MatcherConfig, SimilarityMatcher};
pub use types::{ChunkMatch, MatchCandidate, MatchOutcome};
