//! Shared read-only report snapshots.
//!
//! A [`SnapshotStore`] holds the one published [`AnalysisReport`]. Reloads
//! build the next report completely off to the side and install it with a
//! single swap; readers hold an `Arc` to whichever report was current when
//! they asked and never observe a half-built one.

use std::sync::{Arc, PoisonError, RwLock};

use lift_data::analysis::AnalysisReport;

/// Atomically replaceable handle to the current report.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<AnalysisReport>>,
}

impl SnapshotStore {
    /// A store seeded with an empty report.
    pub fn new() -> Self {
        Self::with_initial(AnalysisReport::empty())
    }

    /// A store seeded with `initial`.
    pub fn with_initial(initial: AnalysisReport) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The currently published report.
    pub fn current(&self) -> Arc<AnalysisReport> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish `report`, replacing the current snapshot in one swap.
    ///
    /// Readers holding the previous `Arc` keep their point-in-time view.
    pub fn publish(&self, report: AnalysisReport) -> Arc<AnalysisReport> {
        let next = Arc::new(report);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lift_data::analysis::AnalysisReport;

    fn report_with_counts(users_loaded: usize, sets_loaded: usize) -> AnalysisReport {
        let mut report = AnalysisReport::empty();
        report.metadata.users_loaded = users_loaded;
        report.metadata.sets_loaded = sets_loaded;
        report
    }

    #[test]
    fn test_new_store_holds_empty_report() {
        let store = SnapshotStore::new();
        assert!(store.current().users.is_empty());
    }

    #[test]
    fn test_publish_replaces_current() {
        let store = SnapshotStore::new();

        store.publish(report_with_counts(3, 120));

        assert_eq!(store.current().metadata.users_loaded, 3);
        assert_eq!(store.current().metadata.sets_loaded, 120);
    }

    #[test]
    fn test_readers_keep_their_point_in_time_view() {
        let store = SnapshotStore::with_initial(report_with_counts(1, 10));

        let before = store.current();
        store.publish(report_with_counts(2, 20));
        let after = store.current();

        assert_eq!(before.metadata.users_loaded, 1);
        assert_eq!(after.metadata.users_loaded, 2);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_current_returns_same_arc_between_publishes() {
        let store = SnapshotStore::new();

        let first = store.current();
        let second = store.current();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_publish_returns_the_published_arc() {
        let store = SnapshotStore::new();

        let published = store.publish(report_with_counts(5, 50));

        assert!(Arc::ptr_eq(&published, &store.current()));
    }
}
