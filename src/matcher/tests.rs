use std::sync::Arc;

use super::*;
use crate::chunker::Chunk;
use crate::embedding::MockEmbeddingClient;
use crate::vectordb::{ChunkPoint, MockVectorIndex, VectorIndexClient};

const COLLECTION: &str = "matcher_test";
const DIM: u64 = 4;

fn config() -> MatcherConfig {
    MatcherConfig {
        collection: COLLECTION.to_string(),
        top_k: 5,
        min_score: 0.8,
    }
}

fn chunk(index: usize, text: &str) -> Chunk {
    Chunk {
        index,
        text: text.to_string(),
    }
}

async fn index_with(points: Vec<ChunkPoint>) -> MockVectorIndex {
    let index = MockVectorIndex::new();
    index.ensure_collection(COLLECTION, DIM).await.unwrap();
    index.upsert_chunks(COLLECTION, points).await.unwrap();
    index
}

#[tokio::test]
async fn test_self_matches_are_never_selected() {
    // The index holds an exact copy of the chunk under both the scanned
    // document's id and a foreign one.
    let index = index_with(vec![
        ChunkPoint::new(42, 0, "identical text".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
        ChunkPoint::new(7, 0, "identical text".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
    ])
    .await;

    let embedder = Arc::new(MockEmbeddingClient::new(DIM as usize));
    embedder.script("identical text", vec![1.0, 0.0, 0.0, 0.0]);

    let matcher = SimilarityMatcher::new(embedder.clone(), index, config());
    let chunks = vec![chunk(0, "identical text")];
    let embeddings = matcher.embed_chunks(&chunks).await.unwrap();

    let outcome = matcher.match_chunks(42, &chunks, embeddings).await.unwrap();

    assert_eq!(outcome.matched_chunks, 1);
    assert_eq!(outcome.chunk_matches[0].best_match.source_document_id, 7);
}

#[tokio::test]
async fn test_only_self_matches_means_unmatched() {
    let index = index_with(vec![ChunkPoint::new(
        42,
        0,
        "identical text".to_string(),
        vec![1.0, 0.0, 0.0, 0.0],
    )])
    .await;

    let embedder = Arc::new(MockEmbeddingClient::new(DIM as usize));
    embedder.script("identical text", vec![1.0, 0.0, 0.0, 0.0]);

    let matcher = SimilarityMatcher::new(embedder, index, config());
    let chunks = vec![chunk(0, "identical text")];
    let embeddings = matcher.embed_chunks(&chunks).await.unwrap();

    let outcome = matcher.match_chunks(42, &chunks, embeddings).await.unwrap();

    assert_eq!(outcome.matched_chunks, 0);
    assert!(outcome.chunk_matches.is_empty());
    assert_eq!(outcome.overall_score, 0.0);
}

#[tokio::test]
async fn test_best_scoring_neighbor_wins() {
    let index = index_with(vec![
        ChunkPoint::new(1, 0, "close copy".to_string(), vec![0.95, 0.05, 0.0, 0.0]),
        ChunkPoint::new(2, 0, "exact copy".to_string(), vec![1.0, 0.0, 0.0, 0.0]),
    ])
    .await;

    let embedder = Arc::new(MockEmbeddingClient::new(DIM as usize));
    embedder.script("query", vec![1.0, 0.0, 0.0, 0.0]);

    let matcher = SimilarityMatcher::new(embedder, index, config());
    let chunks = vec![chunk(0, "query")];
    let embeddings = matcher.embed_chunks(&chunks).await.unwrap();

    let outcome = matcher.match_chunks(99, &chunks, embeddings).await.unwrap();

    assert_eq!(outcome.chunk_matches[0].best_match.source_document_id, 2);
}

#[tokio::test]
async fn test_coverage_score_one_of_four() {
    let index = index_with(vec![ChunkPoint::new(
        1,
        0,
        "plagiarized".to_string(),
        vec![1.0, 0.0, 0.0, 0.0],
    )])
    .await;

    let embedder = Arc::new(MockEmbeddingClient::new(DIM as usize));
    embedder.script("matches", vec![1.0, 0.0, 0.0, 0.0]);
    embedder.script("misses a", vec![0.0, 1.0, 0.0, 0.0]);
    embedder.script("misses b", vec![0.0, 0.0, 1.0, 0.0]);
    embedder.script("misses c", vec![0.0, 0.0, 0.0, 1.0]);

    let matcher = SimilarityMatcher::new(embedder, index, config());
    let chunks = vec![
        chunk(0, "matches"),
        chunk(1, "misses a"),
        chunk(2, "misses b"),
        chunk(3, "misses c"),
    ];
    let embeddings = matcher.embed_chunks(&chunks).await.unwrap();

    let outcome = matcher.match_chunks(99, &chunks, embeddings).await.unwrap();

    assert_eq!(outcome.total_chunks, 4);
    assert_eq!(outcome.matched_chunks, 1);
    assert_eq!(outcome.overall_score, 25.0);
}

#[tokio::test]
async fn test_count_mismatch_is_rejected() {
    let index = index_with(vec![]).await;
    let embedder = Arc::new(MockEmbeddingClient::new(DIM as usize));
    let matcher = SimilarityMatcher::new(embedder, index, config());

    let err = matcher
        .match_chunks(1, &[chunk(0, "text")], vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::CountMismatch { .. }));
}

#[test]
fn test_coverage_score_of_zero_chunks_is_zero() {
    assert_eq!(MatchOutcome::coverage_score(0, 0), 0.0);
}
