use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};

use super::*;
use crate::authenticity::{
    AuthenticityEnsemble, ClassLabel, MockPerplexityModel, MockTextClassifier, Verdict,
};
use crate::chunker::Chunker;
use crate::embedding::{EmbeddingClient, MockEmbeddingClient};
use crate::matcher::{MatcherConfig, SimilarityMatcher};
use crate::vectordb::{ChunkPoint, MockVectorIndex, VectorIndexClient};

const DOC_TEXT: &str = "The quick brown fox jumps over the lazy dog near the river. \
    Seventeen wandering travelers crossed the valley at dawn.";

fn document(id: DocumentId, text: &str) -> Document {
    Document {
        id,
        owner_id: 1,
        extracted_text: text.to_string(),
        status: DocumentStatus::Indexed,
    }
}

fn ensemble() -> AuthenticityEnsemble {
    AuthenticityEnsemble::new(
        Arc::new(MockTextClassifier::returning(ClassLabel::Fake, 0.9)),
        Arc::new(MockPerplexityModel::returning(20.0)),
    )
}

fn orchestrator(
    store: Arc<MemoryScanStore>,
    embedder: Arc<MockEmbeddingClient>,
    index: MockVectorIndex,
) -> ScanOrchestrator<MockVectorIndex> {
    let matcher = SimilarityMatcher::new(embedder, index, MatcherConfig::default());
    ScanOrchestrator::new(store, Chunker::default(), matcher, ensemble(), ProgressBus::default())
}

/// Pre-indexes `text` (embedded with `embedder`) as a chunk of another
/// document, so matching against it produces a perfect-score hit.
async fn seed_foreign_chunk(
    index: &MockVectorIndex,
    embedder: &MockEmbeddingClient,
    document_id: DocumentId,
    text: &str,
) {
    let vector = embedder.embed(&[text.to_string()]).await.unwrap().remove(0);
    index
        .upsert_chunks(
            &MatcherConfig::default().collection,
            vec![ChunkPoint {
                document_id,
                chunk_index: 0,
                text: text.to_string(),
                vector,
            }],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_completed_scan_with_foreign_match() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, DOC_TEXT));
    store.insert_scan(Scan::queued(10, 1));

    let embedder = Arc::new(MockEmbeddingClient::default());
    let index = MockVectorIndex::new();
    seed_foreign_chunk(&index, &embedder, 999, DOC_TEXT).await;

    let orch = orchestrator(Arc::clone(&store), embedder, index);
    orch.run(10).await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.status, ScanStatus::Completed);
    assert_eq!(scan.progress, 100);
    assert_eq!(scan.current_step, "Completed");
    assert!(scan.completed_at.is_some());

    let Some(ScanReport::Completed(summary)) = scan.report else {
        panic!("expected a completed report, got {:?}", scan.report);
    };
    assert_eq!(summary.total_chunks, 1);
    assert_eq!(summary.matched_chunks, 1);
    assert_eq!(summary.overall_score, 100.0);
    assert_eq!(summary.matches[0].best_match.source_document_id, 999);

    // 0.6 * 90 (classifier) + 0.2 * 100 (ppl 20) + 0.2 * 100 (low CV)
    assert_eq!(summary.authenticity.ai_probability, 94.0);
    assert_eq!(summary.authenticity.label, Verdict::AiGenerated);
}

#[tokio::test]
async fn test_self_matches_leave_scan_unmatched() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, DOC_TEXT));
    store.insert_scan(Scan::queued(10, 1));

    let embedder = Arc::new(MockEmbeddingClient::default());
    let index = MockVectorIndex::new();
    // Only this document's own chunk is indexed.
    seed_foreign_chunk(&index, &embedder, 1, DOC_TEXT).await;

    let orch = orchestrator(Arc::clone(&store), embedder, index);
    orch.run(10).await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    let Some(ScanReport::Completed(summary)) = scan.report else {
        panic!("expected a completed report, got {:?}", scan.report);
    };
    assert_eq!(summary.matched_chunks, 0);
    assert_eq!(summary.overall_score, 0.0);
    assert!(summary.matches.is_empty());
}

#[tokio::test]
async fn test_empty_document_fails_scan() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, "   "));
    store.insert_scan(Scan::queued(10, 1));

    let embedder = Arc::new(MockEmbeddingClient::default());
    let index = MockVectorIndex::new();
    index.ensure_collection(&MatcherConfig::default().collection, 384).await.unwrap();

    let orch = orchestrator(Arc::clone(&store), embedder, index);
    orch.run(10).await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.status, ScanStatus::Failed);
    assert!(scan.progress < 100);
    let Some(ScanReport::Failed { error }) = scan.report else {
        panic!("expected a failed report, got {:?}", scan.report);
    };
    assert_eq!(error, "document has no text to scan");
}

#[tokio::test]
async fn test_missing_document_fails_scan() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_scan(Scan::queued(10, 42));

    let orch = orchestrator(
        Arc::clone(&store),
        Arc::new(MockEmbeddingClient::default()),
        MockVectorIndex::new(),
    );
    orch.run(10).await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.status, ScanStatus::Failed);
    let Some(ScanReport::Failed { error }) = scan.report else {
        panic!("expected a failed report, got {:?}", scan.report);
    };
    assert_eq!(error, "document 42 not found");
}

#[tokio::test]
async fn test_embedding_failure_fails_scan() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, DOC_TEXT));
    store.insert_scan(Scan::queued(10, 1));

    let embedder = Arc::new(MockEmbeddingClient::default());
    embedder.fail_requests();

    let orch = orchestrator(
        Arc::clone(&store),
        embedder,
        MockVectorIndex::new(),
    );
    orch.run(10).await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.status, ScanStatus::Failed);
    assert!(matches!(scan.report, Some(ScanReport::Failed { .. })));
}

#[tokio::test]
async fn test_unknown_scan_is_a_no_op() {
    let store = Arc::new(MemoryScanStore::new());
    let orch = orchestrator(
        Arc::clone(&store),
        Arc::new(MockEmbeddingClient::default()),
        MockVectorIndex::new(),
    );
    orch.run(777).await.unwrap();
    assert!(store.load_scan(777).await.unwrap().is_none());
}

#[tokio::test]
async fn test_progress_events_are_monotone_and_terminal() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, DOC_TEXT));
    store.insert_scan(Scan::queued(10, 1));

    let embedder = Arc::new(MockEmbeddingClient::default());
    let index = MockVectorIndex::new();
    seed_foreign_chunk(&index, &embedder, 999, DOC_TEXT).await;

    let orch = orchestrator(Arc::clone(&store), embedder, index);
    let mut rx = orch.progress_bus().subscribe();
    orch.run(10).await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert!(!events.is_empty());
    for pair in events.windows(2) {
        assert!(pair[1].progress >= pair[0].progress, "progress regressed");
    }
    let last = events.last().unwrap();
    assert_eq!(last.status, ScanStatus::Completed);
    assert_eq!(last.progress, 100);
    assert_eq!(last.step, "Completed");
}

#[tokio::test]
async fn test_failed_event_keeps_last_committed_progress() {
    let store = Arc::new(MemoryScanStore::new());
    store.insert_document(document(1, DOC_TEXT));
    store.insert_scan(Scan::queued(10, 1));

    // Embedding fails after the 30% checkpoint has been committed.
    let embedder = Arc::new(MockEmbeddingClient::default());
    embedder.fail_requests();

    let orch = orchestrator(Arc::clone(&store), embedder, MockVectorIndex::new());
    let mut rx = orch.progress_bus().subscribe();
    orch.run(10).await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    for pair in events.windows(2) {
        assert!(pair[1].progress >= pair[0].progress, "progress regressed");
    }

    let last = events.last().unwrap();
    assert_eq!(last.status, ScanStatus::Failed);
    assert_eq!(last.progress, 30);
    assert_eq!(
        last.progress,
        store.load_scan(10).await.unwrap().unwrap().progress
    );
}

#[tokio::test]
async fn test_store_clamps_progress_regression() {
    let store = MemoryScanStore::new();
    store.insert_scan(Scan::queued(10, 1));
    store.mark_scanning(10, "step").await.unwrap();
    store.update_progress(10, 50, "half").await.unwrap();
    store.update_progress(10, 30, "stale write").await.unwrap();

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.progress, 50);
    assert_eq!(scan.current_step, "stale write");
}

#[tokio::test]
async fn test_watchdog_fails_stale_scan() {
    let store = Arc::new(MemoryScanStore::new());
    let mut stale = Scan::queued(10, 1);
    stale.status = ScanStatus::Scanning;
    stale.progress = 70;
    stale.updated_at = Utc::now() - ChronoDuration::hours(1);
    store.insert_scan(stale);

    let bus = ProgressBus::default();
    let mut rx = bus.subscribe();
    ScanWatchdog::sweep(store.as_ref(), &bus, ChronoDuration::minutes(10)).await;

    let scan = store.load_scan(10).await.unwrap().unwrap();
    assert_eq!(scan.status, ScanStatus::Failed);
    let Some(ScanReport::Failed { error }) = scan.report else {
        panic!("expected a failed report, got {:?}", scan.report);
    };
    assert!(error.contains("watchdog"));

    let event = rx.try_recv().unwrap();
    assert_eq!(event.scan_id, 10);
    assert_eq!(event.status, ScanStatus::Failed);
    assert_eq!(event.progress, 70);
}

#[tokio::test]
async fn test_watchdog_leaves_live_and_terminal_scans_alone() {
    let store = Arc::new(MemoryScanStore::new());

    let mut live = Scan::queued(1, 1);
    live.status = ScanStatus::Scanning;
    store.insert_scan(live);

    let mut done = Scan::queued(2, 1);
    done.status = ScanStatus::Completed;
    done.updated_at = Utc::now() - ChronoDuration::hours(1);
    store.insert_scan(done);

    let bus = ProgressBus::default();
    ScanWatchdog::sweep(store.as_ref(), &bus, ChronoDuration::minutes(10)).await;

    assert_eq!(
        store.load_scan(1).await.unwrap().unwrap().status,
        ScanStatus::Scanning
    );
    assert_eq!(
        store.load_scan(2).await.unwrap().unwrap().status,
        ScanStatus::Completed
    );
}
