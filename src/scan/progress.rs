use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ScanId, ScanStatus};

/// One observed progress step of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub scan_id: ScanId,
    pub status: ScanStatus,
    pub progress: u8,
    pub step: String,
}

/// Broadcast channel for scan progress.
///
/// The orchestrator publishes every committed step; presentation layers
/// subscribe and pace themselves. Publishing never blocks the pipeline:
/// with no subscribers the event is simply dropped, and a slow subscriber
/// only lags its own receiver.
#[derive(Debug, Clone)]
pub struct ProgressBus {
    tx: broadcast::Sender<ProgressEvent>,
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ProgressBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: ProgressEvent) {
        // Err means no live receivers; not a failure.
        let _ = self.tx.send(event);
    }
}
