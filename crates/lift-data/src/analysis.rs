//! Top-level analysis pipeline.
//!
//! Runs ingestion, then aggregates every user's sets at all four
//! granularities, producing an [`AnalysisReport`] ready for serialization.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use lift_core::error::Result;
use lift_core::models::LiftingSet;
use lift_core::time_utils::Granularity;
use serde::Serialize;

use crate::aggregator::{aggregate_series, ExerciseSeries};
use crate::reader::load_user_sets;

// ── Report types ──────────────────────────────────────────────────────────────

/// One user's series at every granularity, in the stable order
/// exact, daily, weekly, monthly.
///
/// Serializes as a four-element JSON array in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GranularitySeries {
    series: [ExerciseSeries; 4],
}

impl GranularitySeries {
    /// The series for one granularity.
    pub fn get(&self, granularity: Granularity) -> &ExerciseSeries {
        &self.series[granularity as usize]
    }

    /// Series bucketed by exact timestamp.
    pub fn exact(&self) -> &ExerciseSeries {
        self.get(Granularity::Exact)
    }

    /// Series bucketed by calendar day.
    pub fn daily(&self) -> &ExerciseSeries {
        self.get(Granularity::Daily)
    }

    /// Series bucketed by Sunday-anchored week.
    pub fn weekly(&self) -> &ExerciseSeries {
        self.get(Granularity::Weekly)
    }

    /// Series bucketed by calendar month.
    pub fn monthly(&self) -> &ExerciseSeries {
        self.get(Granularity::Monthly)
    }
}

/// Build one user's [`GranularitySeries`] from their canonical sets.
pub fn build_user_series(sets: &[LiftingSet]) -> GranularitySeries {
    GranularitySeries {
        series: Granularity::ALL.map(|granularity| aggregate_series(sets, granularity)),
    }
}

/// Bookkeeping recorded alongside each report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp of when this report was generated.
    pub generated_at: String,
    /// Users whose files loaded successfully.
    pub users_loaded: usize,
    /// Canonical sets across all users.
    pub sets_loaded: usize,
    /// Wall-clock seconds spent reading and parsing files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// Complete output of one [`analyze_storage`] run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Per-user series, keyed by user identifier.
    pub users: BTreeMap<String, GranularitySeries>,
    /// Bookkeeping for this run.
    pub metadata: AnalysisMetadata,
}

impl AnalysisReport {
    /// A report with no users, used to seed snapshot stores before the first
    /// successful run.
    pub fn empty() -> Self {
        Self {
            users: BTreeMap::new(),
            metadata: AnalysisMetadata {
                generated_at: Utc::now().to_rfc3339(),
                users_loaded: 0,
                sets_loaded: 0,
                load_time_seconds: 0.0,
                aggregate_time_seconds: 0.0,
            },
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Ingest every user file under `storage_dir`, then aggregate each user's
/// sets at all four granularities.
///
/// Per-file failures were already skipped inside the reader; the only error
/// out of here is the fatal directory-level one.
pub fn analyze_storage(storage_dir: &Path) -> Result<AnalysisReport> {
    // ── Step 1: Load per-user sets ────────────────────────────────────────
    let load_start = Instant::now();
    let user_sets = load_user_sets(storage_dir)?;
    let load_time_seconds = load_start.elapsed().as_secs_f64();

    let sets_loaded: usize = user_sets.values().map(Vec::len).sum();

    // ── Step 2: Aggregate every user at every granularity ─────────────────
    let aggregate_start = Instant::now();
    let users: BTreeMap<String, GranularitySeries> = user_sets
        .into_iter()
        .map(|(user, sets)| (user, build_user_series(&sets)))
        .collect();
    let aggregate_time_seconds = aggregate_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        users_loaded: users.len(),
        sets_loaded,
        load_time_seconds,
        aggregate_time_seconds,
    };

    Ok(AnalysisReport { users, metadata })
}
