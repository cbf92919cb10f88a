use std::sync::Arc;

use tracing::{debug, instrument};

use crate::chunker::Chunk;
use crate::constants::{DEFAULT_MIN_SIMILARITY, DEFAULT_TOP_K};
use crate::embedding::EmbeddingClient;
use crate::vectordb::{DEFAULT_COLLECTION_NAME, VectorIndexClient};

use super::error::MatchError;
use super::types::{ChunkMatch, MatchCandidate, MatchOutcome};

/// Matching parameters.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Collection queried for neighbors.
    pub collection: String,
    /// Neighbors requested per chunk.
    pub top_k: u64,
    /// Cosine similarity floor for a neighbor to count.
    pub min_score: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION_NAME.to_string(),
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SIMILARITY,
        }
    }
}

/// Finds, per chunk, the highest-scoring cross-document near-duplicate.
pub struct SimilarityMatcher<V: VectorIndexClient> {
    embedder: Arc<dyn EmbeddingClient>,
    index: V,
    config: MatcherConfig,
}

impl<V: VectorIndexClient> std::fmt::Debug for SimilarityMatcher<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityMatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V: VectorIndexClient> SimilarityMatcher<V> {
    pub fn new(embedder: Arc<dyn EmbeddingClient>, index: V, config: MatcherConfig) -> Self {
        Self {
            embedder,
            index,
            config,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn index(&self) -> &V {
        &self.index
    }

    /// Embeds chunk texts in one batch. Failure here is fatal to the scan.
    pub async fn embed_chunks(&self, chunks: &[Chunk]) -> Result<Vec<Vec<f32>>, MatchError> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        Ok(self.embedder.embed(&texts).await?)
    }

    /// Queries the index per chunk and keeps the best cross-document hit.
    ///
    /// Hits whose `document_id` equals `document_id` are discarded: the
    /// index usually already contains this document's own chunks from
    /// ingestion, and matching a document against itself would saturate
    /// the score. The exclusion is client-side because the query limit is
    /// small (see the matched `top_k`).
    #[instrument(skip(self, chunks, embeddings), fields(chunks = chunks.len()))]
    pub async fn match_chunks(
        &self,
        document_id: i64,
        chunks: &[Chunk],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<MatchOutcome, MatchError> {
        if chunks.len() != embeddings.len() {
            return Err(MatchError::CountMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        let mut chunk_matches = Vec::new();

        for (chunk, vector) in chunks.iter().zip(embeddings) {
            let hits = self
                .index
                .search(
                    &self.config.collection,
                    vector,
                    self.config.top_k,
                    self.config.min_score,
                )
                .await?;

            let best = hits
                .into_iter()
                .filter(|hit| hit.document_id != document_id)
                .max_by(|a, b| {
                    a.score
                        .partial_cmp(&b.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });

            if let Some(hit) = best {
                debug!(
                    chunk_index = chunk.index,
                    source_document = hit.document_id,
                    score = hit.score,
                    "Chunk matched"
                );
                chunk_matches.push(ChunkMatch {
                    chunk_index: chunk.index,
                    chunk_text: chunk.text.clone(),
                    best_match: MatchCandidate::from(hit),
                });
            }
        }

        let matched_chunks = chunk_matches.len();
        let total_chunks = chunks.len();
        let overall_score = MatchOutcome::coverage_score(matched_chunks, total_chunks);

        debug!(
            matched_chunks,
            total_chunks, overall_score, "Similarity matching finished"
        );

        Ok(MatchOutcome {
            chunk_matches,
            matched_chunks,
            total_chunks,
            overall_score,
        })
    }
}
