//! Time-bucketed aggregation of canonical sets.
//!
//! Pure functions from one user's sets to per-exercise series of per-bucket
//! aggregates. Sets whose bucket starts before the analysis cutoff are
//! dropped here, uniformly for every dialect.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono_tz::Tz;
use lift_core::models::{ExerciseAggregate, LiftingSet};
use lift_core::time_utils::{analysis_cutoff, Granularity};

/// Chronologically ordered aggregates, keyed by canonical exercise name.
pub type ExerciseSeries = BTreeMap<String, Vec<ExerciseAggregate>>;

/// Aggregate `sets` at one granularity.
///
/// Accumulation is keyed (exercise, bucket instant) with get-or-insert-zero
/// at both levels; `BTreeMap` ordering guarantees every exercise's series
/// comes out ascending by bucket instant.
pub fn aggregate_series(sets: &[LiftingSet], granularity: Granularity) -> ExerciseSeries {
    let cutoff = analysis_cutoff();
    let mut buckets: BTreeMap<String, BTreeMap<DateTime<Tz>, ExerciseAggregate>> = BTreeMap::new();

    for set in sets {
        let bucket_start = granularity.bucket(set.timestamp);
        // The cutoff applies to the bucketed instant, not the raw timestamp:
        // a set recorded after the cutoff still drops out of a coarse
        // granularity when its bucket began before it.
        if bucket_start < cutoff {
            continue;
        }

        buckets
            .entry(set.exercise.clone())
            .or_default()
            .entry(bucket_start)
            .or_insert_with(|| ExerciseAggregate::new(bucket_start))
            .fold(set);
    }

    buckets
        .into_iter()
        .map(|(exercise, by_bucket)| (exercise, by_bucket.into_values().collect()))
        .collect()
}
