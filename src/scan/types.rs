use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::authenticity::AuthenticityReport;
use crate::matcher::ChunkMatch;

pub type ScanId = i64;
pub type DocumentId = i64;

/// Document lifecycle, owned by the ingestion pipeline. The scan engine
/// only reads documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Indexed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub owner_id: i64,
    /// Normalized text produced by extraction; empty until processed.
    pub extracted_text: String,
    pub status: DocumentStatus,
}

/// Scan lifecycle. `Queued` is set by the caller that creates the scan;
/// every later transition belongs to the orchestrator (or the watchdog,
/// which may force `Failed`). `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Queued,
    Scanning,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }
}

/// Scores and matches for a successfully completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Percentage of chunks with a cross-document match above the floor.
    pub overall_score: f64,
    pub total_chunks: usize,
    pub matched_chunks: usize,
    pub matches: Vec<ChunkMatch>,
    pub authenticity: AuthenticityReport,
}

/// Terminal scan artifact: a full summary on success, an error string on
/// failure. Present if and only if the scan reached a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ScanReport {
    Completed(ScanSummary),
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub id: ScanId,
    pub document_id: DocumentId,
    pub status: ScanStatus,
    /// 0-100, monotone non-decreasing while `Scanning`.
    pub progress: u8,
    pub current_step: String,
    pub report: Option<ScanReport>,
    pub created_at: DateTime<Utc>,
    /// Liveness timestamp: bumped on every store write for this scan.
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Scan {
    /// A freshly queued scan for `document_id`.
    pub fn queued(id: ScanId, document_id: DocumentId) -> Self {
        let now = Utc::now();
        Self {
            id,
            document_id,
            status: ScanStatus::Queued,
            progress: 0,
            current_step: String::new(),
            report: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
