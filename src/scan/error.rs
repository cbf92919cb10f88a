use thiserror::Error;

use super::types::{DocumentId, ScanId};
use crate::matcher::MatchError;

/// Errors surfaced by the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected or lost the operation.
    #[error("store operation failed: {message}")]
    Backend { message: String },

    /// Attempted to transition a scan that is not in the store.
    #[error("scan {id} not found")]
    ScanNotFound { id: ScanId },
}

/// Fatal scan-pipeline errors. Each of these fails the scan record; none
/// of them is retried automatically.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The referenced document does not exist.
    #[error("document {id} not found")]
    DocumentNotFound { id: DocumentId },

    /// The document has no extracted text to scan.
    #[error("document has no text to scan")]
    EmptyDocument,

    /// Chunking produced nothing to match.
    #[error("no chunks generated")]
    NoChunks,

    /// Embedding or index query failed.
    #[error(transparent)]
    Match(#[from] MatchError),

    /// The persistence boundary failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
