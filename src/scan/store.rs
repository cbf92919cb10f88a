use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::warn;

use super::error::StoreError;
use super::types::{Document, DocumentId, Scan, ScanId, ScanReport, ScanStatus};

/// Persistence boundary for scans and (read-only) documents.
///
/// The orchestrator commits every progress step independently so a
/// concurrent poller sees live, monotone progress. Durable backends live
/// outside this crate behind this trait; [`MemoryScanStore`] is the
/// reference implementation.
#[async_trait]
pub trait ScanStore: Send + Sync {
    async fn load_scan(&self, id: ScanId) -> Result<Option<Scan>, StoreError>;

    async fn load_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Moves the scan into `Scanning` with the given step label.
    async fn mark_scanning(&self, id: ScanId, step: &str) -> Result<(), StoreError>;

    /// Commits a progress step. Implementations must keep progress
    /// monotone for a scan; a lower value is clamped, not applied.
    async fn update_progress(&self, id: ScanId, progress: u8, step: &str)
    -> Result<(), StoreError>;

    /// Terminal success transition.
    async fn complete_scan(&self, id: ScanId, report: ScanReport) -> Result<(), StoreError>;

    /// Terminal failure transition.
    async fn fail_scan(&self, id: ScanId, error: &str) -> Result<(), StoreError>;

    /// Ids of scans still `Scanning` whose last update is older than
    /// `cutoff`. Used by the watchdog.
    async fn stale_scans(&self, cutoff: DateTime<Utc>) -> Result<Vec<ScanId>, StoreError>;
}

/// In-memory store over per-process maps.
#[derive(Default)]
pub struct MemoryScanStore {
    scans: RwLock<HashMap<ScanId, Scan>>,
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl MemoryScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document (stands in for the ingestion pipeline).
    pub fn insert_document(&self, document: Document) {
        self.documents.write().insert(document.id, document);
    }

    /// Seeds a queued scan (stands in for the request handler).
    pub fn insert_scan(&self, scan: Scan) {
        self.scans.write().insert(scan.id, scan);
    }

    fn with_scan<T>(
        &self,
        id: ScanId,
        f: impl FnOnce(&mut Scan) -> T,
    ) -> Result<T, StoreError> {
        let mut scans = self.scans.write();
        let scan = scans.get_mut(&id).ok_or(StoreError::ScanNotFound { id })?;
        let out = f(scan);
        scan.updated_at = Utc::now();
        Ok(out)
    }
}

#[async_trait]
impl ScanStore for MemoryScanStore {
    async fn load_scan(&self, id: ScanId) -> Result<Option<Scan>, StoreError> {
        Ok(self.scans.read().get(&id).cloned())
    }

    async fn load_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.read().get(&id).cloned())
    }

    async fn mark_scanning(&self, id: ScanId, step: &str) -> Result<(), StoreError> {
        self.with_scan(id, |scan| {
            scan.status = ScanStatus::Scanning;
            scan.progress = 0;
            scan.current_step = step.to_string();
        })
    }

    async fn update_progress(
        &self,
        id: ScanId,
        progress: u8,
        step: &str,
    ) -> Result<(), StoreError> {
        self.with_scan(id, |scan| {
            if progress < scan.progress {
                warn!(
                    scan_id = id,
                    current = scan.progress,
                    requested = progress,
                    "Ignoring progress regression"
                );
            } else {
                scan.progress = progress;
            }
            scan.current_step = step.to_string();
        })
    }

    async fn complete_scan(&self, id: ScanId, report: ScanReport) -> Result<(), StoreError> {
        self.with_scan(id, |scan| {
            scan.status = ScanStatus::Completed;
            scan.progress = 100;
            scan.current_step = "Completed".to_string();
            scan.report = Some(report);
            scan.completed_at = Some(Utc::now());
        })
    }

    async fn fail_scan(&self, id: ScanId, error: &str) -> Result<(), StoreError> {
        self.with_scan(id, |scan| {
            scan.status = ScanStatus::Failed;
            scan.current_step = "Failed".to_string();
            scan.report = Some(ScanReport::Failed {
                error: error.to_string(),
            });
            scan.completed_at = Some(Utc::now());
        })
    }

    async fn stale_scans(&self, cutoff: DateTime<Utc>) -> Result<Vec<ScanId>, StoreError> {
        Ok(self
            .scans
            .read()
            .values()
            .filter(|s| s.status == ScanStatus::Scanning && s.updated_at < cutoff)
            .map(|s| s.id)
            .collect())
    }
}
