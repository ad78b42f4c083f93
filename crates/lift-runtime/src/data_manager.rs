//! TTL-cached reload management.
//!
//! Wraps the full ingestion-and-aggregation pipeline with a time-to-live
//! check and publishes every fresh report into a shared [`SnapshotStore`].
//! When a reload fails the previously published snapshot stays current and
//! the failure is recorded instead of propagated.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lift_data::analysis::{analyze_storage, AnalysisReport};

use crate::snapshot::SnapshotStore;

/// Default snapshot TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// TTL-cached driver of [`analyze_storage`].
pub struct DataManager {
    /// Maximum age of the published snapshot before it is considered stale.
    cache_ttl: Duration,
    /// Directory of per-user export files.
    storage_dir: PathBuf,
    /// Where published snapshots live.
    store: Arc<SnapshotStore>,
    /// When the store was last refreshed successfully.
    last_refresh: Option<Instant>,
    /// Description of the most recent reload failure, if any.
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(cache_ttl_secs: u64, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            storage_dir: storage_dir.into(),
            store: Arc::new(SnapshotStore::new()),
            last_refresh: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Shared handle to the snapshot store, for concurrent readers.
    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// The current report, reloading first when the snapshot is stale.
    ///
    /// With `force_refresh` a reload is attempted regardless of age. A failed
    /// reload returns the previously published snapshot unchanged; the cause
    /// is available through [`DataManager::last_error`].
    pub fn get_data(&mut self, force_refresh: bool) -> Arc<AnalysisReport> {
        if !force_refresh && self.is_cache_valid() {
            tracing::debug!("returning cached analysis snapshot");
            return self.store.current();
        }

        match analyze_storage(&self.storage_dir) {
            Ok(report) => {
                tracing::debug!(
                    users = report.metadata.users_loaded,
                    sets = report.metadata.sets_loaded,
                    "analysis snapshot refreshed"
                );
                self.last_refresh = Some(Instant::now());
                self.last_error = None;
                self.store.publish(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed, keeping published snapshot");
                self.last_error = Some(e.to_string());
                self.store.current()
            }
        }
    }

    /// Mark the published snapshot stale so the next [`DataManager::get_data`]
    /// call reloads.
    pub fn invalidate_cache(&mut self) {
        self.last_refresh = None;
        tracing::debug!("analysis snapshot invalidated");
    }

    /// Age of the published snapshot, or `None` before the first successful
    /// reload.
    pub fn cache_age(&self) -> Option<Duration> {
        self.last_refresh.map(|at| at.elapsed())
    }

    /// Description of the most recent reload failure, or `None` if the last
    /// reload succeeded.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn is_cache_valid(&self) -> bool {
        self.last_refresh
            .map(|at| at.elapsed() < self.cache_ttl)
            .unwrap_or(false)
    }
}
