use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::time;
use tracing::{error, info, warn};

use super::progress::{ProgressBus, ProgressEvent};
use super::store::ScanStore;
use super::types::ScanStatus;
use crate::constants::WATCHDOG_CHECK_INTERVAL_SECS;

const STUCK_SCAN_ERROR: &str = "scan stalled and was terminated by the watchdog";

/// Fails scans that stopped making progress.
///
/// A scan is stale when it is still `Scanning` but its `updated_at` has
/// not moved for `stale_after`. That only happens when the orchestrator
/// task died without reaching a terminal transition (process kill, panic
/// swallowed by the runtime). The watchdog forces such scans to `Failed`
/// so callers are never left polling a scan that will not finish.
pub struct ScanWatchdog {
    store: Arc<dyn ScanStore>,
    progress: ProgressBus,
    stale_after: chrono::Duration,
    shutdown_initiated: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
}

impl ScanWatchdog {
    pub fn new(store: Arc<dyn ScanStore>, progress: ProgressBus, stale_after: Duration) -> Self {
        Self {
            store,
            progress,
            stale_after: chrono::Duration::from_std(stale_after)
                .unwrap_or_else(|_| chrono::Duration::seconds(i64::MAX / 1_000)),
            shutdown_initiated: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the background sweep task (no-op if already running).
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        // AcqRel: swap needs both load and store semantics to ensure only one
        // sweep task starts. Acquire sees prior stores, Release publishes ours.
        if self.running.swap(true, Ordering::AcqRel) {
            return tokio::spawn(async {});
        }

        let store = Arc::clone(&self.store);
        let progress = self.progress.clone();
        let stale_after = self.stale_after;
        let shutdown_initiated = Arc::clone(&self.shutdown_initiated);
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(WATCHDOG_CHECK_INTERVAL_SECS));
            loop {
                interval.tick().await;
                // Acquire: synchronizes with the Release store from shutdown()
                if shutdown_initiated.load(Ordering::Acquire) {
                    break;
                }
                Self::sweep(store.as_ref(), &progress, stale_after).await;
            }
            // Release: publishes the finished sweep before clearing the flag,
            // so a subsequent start() with Acquire sees the completed state
            running.store(false, Ordering::Release);
        })
    }

    /// One sweep: fail every scan whose last update is older than the cutoff.
    pub async fn sweep(store: &dyn ScanStore, progress: &ProgressBus, stale_after: chrono::Duration) {
        let cutoff = Utc::now() - stale_after;
        let stale = match store.stale_scans(cutoff).await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "Watchdog failed to list stale scans");
                return;
            }
        };

        for scan_id in stale {
            warn!(scan_id, "Failing stale scan");
            if let Err(e) = store.fail_scan(scan_id, STUCK_SCAN_ERROR).await {
                error!(scan_id, error = %e, "Watchdog failed to terminate scan");
                continue;
            }
            // Publish the progress the store retained so bus subscribers do
            // not see the value drop across the failure transition.
            let retained = match store.load_scan(scan_id).await {
                Ok(Some(scan)) => scan.progress,
                _ => 0,
            };
            progress.publish(ProgressEvent {
                scan_id,
                status: ScanStatus::Failed,
                progress: retained,
                step: "Failed".to_string(),
            });
        }
    }

    /// Stops the sweep task after its current tick (idempotent).
    pub fn shutdown(&self) {
        // Release: publishes any preceding writes to the task's Acquire load
        if !self.shutdown_initiated.swap(true, Ordering::AcqRel) {
            info!("Scan watchdog shutting down");
        }
    }

    /// Returns `true` if shutdown has been initiated.
    pub fn is_shutdown_initiated(&self) -> bool {
        self.shutdown_initiated.load(Ordering::Acquire)
    }
}
