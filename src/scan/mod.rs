//! Scan orchestration: lifecycle state machine, progress pub/sub, and a
//! watchdog for scans whose worker died mid-flight.

pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod store;
pub mod types;
pub mod watchdog;

#[cfg(test)]
mod tests;

pub use error::{ScanError, StoreError};
pub use orchestrator::ScanOrchestrator;
pub use progress::{ProgressBus, ProgressEvent};
pub use store::{MemoryScanStore, ScanStore};
pub use types::{
    Document, DocumentId, DocumentStatus, Scan, ScanId, ScanReport, ScanStatus, ScanSummary,
};
pub use watchdog::ScanWatchdog;
