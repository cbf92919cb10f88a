use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::error::{ScanError, StoreError};
use super::progress::{ProgressBus, ProgressEvent};
use super::store::ScanStore;
use super::types::{DocumentId, ScanId, ScanReport, ScanStatus, ScanSummary};
use crate::authenticity::AuthenticityEnsemble;
use crate::chunker::Chunker;
use crate::constants::{
    PROGRESS_AUTHENTICITY, PROGRESS_CHUNKING, PROGRESS_DONE, PROGRESS_EMBEDDING, PROGRESS_INIT,
    PROGRESS_MATCHING, PROGRESS_REPORT,
};
use crate::matcher::SimilarityMatcher;
use crate::vectordb::VectorIndexClient;

/// Drives one scan through its lifecycle:
/// `Queued -> Scanning -> {Completed, Failed}`.
///
/// The orchestrator is the only writer of scan state. Every progress step
/// is committed and published independently, so clients polling or
/// subscribed mid-flight see monotone progress even when a later step
/// fails. Failed scans are never retried here; a new scan must be
/// initiated by the caller.
pub struct ScanOrchestrator<V: VectorIndexClient> {
    store: Arc<dyn ScanStore>,
    chunker: Chunker,
    matcher: SimilarityMatcher<V>,
    ensemble: AuthenticityEnsemble,
    progress: ProgressBus,
}

impl<V: VectorIndexClient> std::fmt::Debug for ScanOrchestrator<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOrchestrator")
            .field("chunker", &self.chunker)
            .field("matcher", &self.matcher)
            .field("ensemble", &self.ensemble)
            .finish_non_exhaustive()
    }
}

impl<V: VectorIndexClient> ScanOrchestrator<V> {
    pub fn new(
        store: Arc<dyn ScanStore>,
        chunker: Chunker,
        matcher: SimilarityMatcher<V>,
        ensemble: AuthenticityEnsemble,
        progress: ProgressBus,
    ) -> Self {
        Self {
            store,
            chunker,
            matcher,
            ensemble,
            progress,
        }
    }

    pub fn progress_bus(&self) -> &ProgressBus {
        &self.progress
    }

    /// Runs the scan to a terminal state.
    ///
    /// An unknown `scan_id` is logged and ignored: the record was deleted
    /// (or never committed) and there is no state left to corrupt.
    /// Store failures while recording the outcome do propagate.
    #[instrument(skip(self))]
    pub async fn run(&self, scan_id: ScanId) -> Result<(), StoreError> {
        let Some(scan) = self.store.load_scan(scan_id).await? else {
            warn!(scan_id, "Scan not found; nothing to do");
            return Ok(());
        };

        self.store
            .mark_scanning(scan_id, "Initializing scan...")
            .await?;
        self.publish(
            scan_id,
            ScanStatus::Scanning,
            PROGRESS_INIT,
            "Initializing scan...",
        );

        match self.execute(scan_id, scan.document_id).await {
            Ok(summary) => {
                info!(
                    scan_id,
                    overall_score = summary.overall_score,
                    matched_chunks = summary.matched_chunks,
                    "Scan completed"
                );
                self.store
                    .complete_scan(scan_id, ScanReport::Completed(summary))
                    .await?;
                self.publish(scan_id, ScanStatus::Completed, PROGRESS_DONE, "Completed");
                Ok(())
            }
            Err(e) => {
                error!(scan_id, error = %e, "Scan failed");
                self.store.fail_scan(scan_id, &e.to_string()).await?;
                // The store retains the last committed progress across the
                // failure transition; the bus must show the same value or
                // subscribers observe a regression the store never had.
                let progress = self
                    .store
                    .load_scan(scan_id)
                    .await?
                    .map(|s| s.progress)
                    .unwrap_or(PROGRESS_INIT);
                self.publish(scan_id, ScanStatus::Failed, progress, "Failed");
                Ok(())
            }
        }
    }

    /// Steps 3-7 of the scan sequence. Any error fails the whole scan.
    async fn execute(
        &self,
        scan_id: ScanId,
        document_id: DocumentId,
    ) -> Result<ScanSummary, ScanError> {
        let document = self
            .store
            .load_document(document_id)
            .await?
            .ok_or(ScanError::DocumentNotFound { id: document_id })?;

        if document.extracted_text.trim().is_empty() {
            return Err(ScanError::EmptyDocument);
        }

        self.step(scan_id, PROGRESS_CHUNKING, "Chunking document text")
            .await?;
        let chunks = self.chunker.chunk(&document.extracted_text);
        if chunks.is_empty() {
            return Err(ScanError::NoChunks);
        }

        self.step(scan_id, PROGRESS_EMBEDDING, "Generating embeddings")
            .await?;
        let embeddings = self.matcher.embed_chunks(&chunks).await?;

        self.step(scan_id, PROGRESS_MATCHING, "Searching for similar content")
            .await?;
        let outcome = self
            .matcher
            .match_chunks(document_id, &chunks, embeddings)
            .await?;

        self.step(scan_id, PROGRESS_AUTHENTICITY, "Analyzing authenticity signals")
            .await?;
        let authenticity = self.ensemble.assess(&document.extracted_text).await;

        self.step(scan_id, PROGRESS_REPORT, "Compiling report").await?;
        Ok(ScanSummary {
            overall_score: outcome.overall_score,
            total_chunks: outcome.total_chunks,
            matched_chunks: outcome.matched_chunks,
            matches: outcome.chunk_matches,
            authenticity,
        })
    }

    async fn step(&self, scan_id: ScanId, progress: u8, label: &str) -> Result<(), StoreError> {
        self.store.update_progress(scan_id, progress, label).await?;
        self.publish(scan_id, ScanStatus::Scanning, progress, label);
        Ok(())
    }

    fn publish(&self, scan_id: ScanId, status: ScanStatus, progress: u8, step: &str) {
        self.progress.publish(ProgressEvent {
            scan_id,
            status,
            progress,
            step: step.to_string(),
        });
    }
}
