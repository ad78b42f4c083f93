//! Periodic re-ingestion loop.
//!
//! Spawns a background task that refreshes the analysis on a fixed interval
//! and publishes every new report both into the shared [`SnapshotStore`] and
//! over an `mpsc` channel, so consumers can poll the store or await pushes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lift_data::analysis::AnalysisReport;
use tokio::sync::mpsc;

use crate::data_manager::DataManager;
use crate::snapshot::SnapshotStore;

/// Capacity of the report channel. A slow consumer only ever delays reports,
/// it cannot make the loop skip a publish into the store.
const REPORT_CHANNEL_CAPACITY: usize = 16;

/// Background refresh coordinator.
pub struct RefreshOrchestrator {
    /// Interval between ingestion passes.
    refresh_interval: Duration,
    /// Directory of per-user export files.
    storage_dir: PathBuf,
}

impl RefreshOrchestrator {
    pub fn new(refresh_interval_secs: u64, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            storage_dir: storage_dir.into(),
        }
    }

    /// Start the refresh loop.
    ///
    /// Returns the shared store, a receiver yielding every published report
    /// (beginning with an immediate initial one), and a handle that stops
    /// the loop.
    pub fn start(
        self,
    ) -> (
        Arc<SnapshotStore>,
        mpsc::Receiver<Arc<AnalysisReport>>,
        RefreshHandle,
    ) {
        let (tx, rx) = mpsc::channel(REPORT_CHANNEL_CAPACITY);

        let manager = DataManager::new(self.refresh_interval.as_secs(), self.storage_dir.clone());
        let store = manager.store();

        let handle = tokio::spawn(async move {
            self.refresh_loop(manager, tx).await;
        });

        (store, rx, RefreshHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Refresh immediately, then on every tick until the receiver goes away.
    async fn refresh_loop(self, mut manager: DataManager, tx: mpsc::Sender<Arc<AnalysisReport>>) {
        Self::refresh_and_send(&mut manager, &tx, true).await;

        let mut interval = tokio::time::interval(self.refresh_interval);
        // The first tick completes immediately; the refresh above already
        // covered it.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("report channel closed, stopping refresh loop");
                break;
            }

            Self::refresh_and_send(&mut manager, &tx, false).await;
        }
    }

    async fn refresh_and_send(
        manager: &mut DataManager,
        tx: &mpsc::Sender<Arc<AnalysisReport>>,
        force: bool,
    ) {
        let report = manager.get_data(force);

        if let Some(error) = manager.last_error() {
            tracing::debug!(error, "refresh kept the previous snapshot");
        }

        if let Err(e) = tx.send(report).await {
            tracing::warn!(error = %e, "failed to send report, receiver dropped");
        }
    }
}

/// Handle to the background refresh task.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    /// Immediately stop the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Whether the refresh task has finished or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use tokio::time::timeout;

    // ── Helpers ───────────────────────────────────────────────────────────

    const APPLE_HEADER: &str = "Date,Workout Name,Duration,Exercise Name,Set Order,Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE";

    fn write_alice_export(dir: &Path) {
        let content = format!(
            "{APPLE_HEADER}\n2023-06-15 10:30:00,Push Day,1h,Bench Press (Barbell),1,135,10,0,0,,,8\n"
        );
        let mut file = File::create(dir.join("alice")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    // ── Tests ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_start_and_abort() {
        let dir = TempDir::new().unwrap();
        let orchestrator = RefreshOrchestrator::new(60, dir.path());

        let (_store, _rx, handle) = orchestrator.start();
        handle.abort();

        // Abort is asynchronous; give the runtime a moment to settle.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_initial_report_arrives_immediately() {
        let dir = TempDir::new().unwrap();
        write_alice_export(dir.path());

        let orchestrator = RefreshOrchestrator::new(3600, dir.path());
        let (store, mut rx, handle) = orchestrator.start();

        let report = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for the initial report")
            .expect("channel closed before the initial report");

        assert_eq!(report.metadata.users_loaded, 1);
        assert!(report.users.contains_key("alice"));

        // The store saw the same publish.
        assert!(Arc::ptr_eq(&store.current(), &report));

        handle.abort();
    }

    #[tokio::test]
    async fn test_initial_report_on_bad_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let orchestrator = RefreshOrchestrator::new(3600, dir.path().join("absent"));

        let (_store, mut rx, handle) = orchestrator.start();

        let report = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for the initial report")
            .expect("channel closed before the initial report");

        assert!(report.users.is_empty());

        handle.abort();
    }
}
