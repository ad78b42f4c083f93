use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::calculations::estimate_one_rep_max;

/// A single performed set, after unit conversion and name normalization.
///
/// Parsers construct these; nothing downstream mutates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiftingSet {
    /// When the set was performed, anchored to the reference zone.
    pub timestamp: DateTime<Tz>,
    /// Canonical exercise name.
    pub exercise: String,
    /// Weight lifted, in pounds.
    pub weight_lbs: f64,
    /// Repetitions performed.
    pub reps: u32,
}

impl LiftingSet {
    /// Estimated one-rep max for this set.
    ///
    /// Always derived from `weight_lbs` and `reps`; no export column is
    /// trusted for this value.
    pub fn one_rep_max(&self) -> f64 {
        estimate_one_rep_max(self.weight_lbs, self.reps)
    }

    /// Volume contributed by this set (`weight * reps`).
    pub fn volume(&self) -> f64 {
        self.weight_lbs * f64::from(self.reps)
    }
}

/// Aggregate statistics for one (exercise, time bucket) pair.
///
/// Field names serialize in camelCase; they are the wire contract of the
/// report output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAggregate {
    /// Representative instant of the bucket this aggregate covers.
    pub timestamp: DateTime<Tz>,
    /// Heaviest weight lifted in the bucket, pounds.
    pub max_weight: f64,
    /// Highest estimated one-rep max in the bucket, pounds.
    pub max_one_rep_max: f64,
    /// Sum of `weight * reps` over the bucket, pounds.
    pub total_volume: f64,
}

impl ExerciseAggregate {
    /// A zeroed aggregate for the bucket starting at `timestamp`.
    pub fn new(timestamp: DateTime<Tz>) -> Self {
        Self {
            timestamp,
            max_weight: 0.0,
            max_one_rep_max: 0.0,
            total_volume: 0.0,
        }
    }

    /// Fold one set into the running statistics.
    ///
    /// Maxima only ever rise and the volume sum is commutative, so fold
    /// order does not matter.
    pub fn fold(&mut self, set: &LiftingSet) {
        self.max_weight = self.max_weight.max(set.weight_lbs);
        self.max_one_rep_max = self.max_one_rep_max.max(set.one_rep_max());
        self.total_volume += set.volume();
    }
}

// ── Exercise-name normalization ───────────────────────────────────────────────

/// Canonicalize an exercise name from a Strong export.
///
/// Strong suffixes barbell movements with `" (Barbell)"`; the canonical
/// catalogue does not.
///
/// # Examples
///
/// ```
/// use lift_core::models::normalize_strong_exercise;
///
/// assert_eq!(normalize_strong_exercise("Bench Press (Barbell)"), "Bench Press");
/// assert_eq!(normalize_strong_exercise("Pull Up"), "Pull Up");
/// ```
pub fn normalize_strong_exercise(name: &str) -> String {
    name.strip_suffix(" (Barbell)").unwrap_or(name).to_string()
}

/// Canonicalize an exercise name from a DailyStrength export.
///
/// Strips the `"Barbell "` prefix, then remaps the few movements
/// DailyStrength spells differently from the canonical catalogue.
pub fn normalize_daily_strength_exercise(name: &str) -> String {
    let stripped = name.strip_prefix("Barbell ").unwrap_or(name);

    match stripped {
        "Deadlifts" => "Deadlift".to_string(),
        "Bent Over Barbell Row" => "Bent Over Row".to_string(),
        "Standing Barbell Military Press" => "Overhead Press".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::REFERENCE_ZONE;
    use chrono::TimeZone;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn make_set(exercise: &str, weight_lbs: f64, reps: u32) -> LiftingSet {
        LiftingSet {
            timestamp: REFERENCE_ZONE
                .with_ymd_and_hms(2023, 6, 15, 10, 30, 0)
                .unwrap(),
            exercise: exercise.to_string(),
            weight_lbs,
            reps,
        }
    }

    // ── LiftingSet ────────────────────────────────────────────────────────

    #[test]
    fn test_set_one_rep_max_uses_brzycki() {
        assert_eq!(make_set("Bench Press", 135.0, 10).one_rep_max(), 180.0);
        assert_eq!(make_set("Squat", 185.0, 5).one_rep_max(), 208.125);
    }

    #[test]
    fn test_set_volume() {
        assert_eq!(make_set("Bench Press", 135.0, 10).volume(), 1350.0);
        assert_eq!(make_set("Bench Press", 135.0, 0).volume(), 0.0);
    }

    // ── ExerciseAggregate ─────────────────────────────────────────────────

    #[test]
    fn test_aggregate_starts_zeroed() {
        let agg = ExerciseAggregate::new(make_set("x", 0.0, 0).timestamp);

        assert_eq!(agg.max_weight, 0.0);
        assert_eq!(agg.max_one_rep_max, 0.0);
        assert_eq!(agg.total_volume, 0.0);
    }

    #[test]
    fn test_fold_tracks_maxima_and_volume() {
        let light = make_set("Bench Press", 135.0, 10);
        let heavy = make_set("Bench Press", 185.0, 5);

        let mut agg = ExerciseAggregate::new(light.timestamp);
        agg.fold(&light);
        agg.fold(&heavy);

        assert_eq!(agg.max_weight, 185.0);
        assert_eq!(agg.max_one_rep_max, 208.125);
        assert_eq!(agg.total_volume, 1350.0 + 925.0);
    }

    #[test]
    fn test_fold_maxima_never_decrease() {
        let heavy = make_set("Bench Press", 185.0, 5);
        let light = make_set("Bench Press", 45.0, 2);

        let mut agg = ExerciseAggregate::new(heavy.timestamp);
        agg.fold(&heavy);
        agg.fold(&light);

        assert_eq!(agg.max_weight, 185.0);
        assert_eq!(agg.max_one_rep_max, 208.125);
    }

    #[test]
    fn test_aggregate_serializes_camel_case() {
        let mut agg = ExerciseAggregate::new(make_set("x", 0.0, 0).timestamp);
        agg.fold(&make_set("Bench Press", 135.0, 10));

        let value = serde_json::to_value(&agg).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("timestamp"));
        assert!(obj.contains_key("maxWeight"));
        assert!(obj.contains_key("maxOneRepMax"));
        assert!(obj.contains_key("totalVolume"));
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn test_timestamp_serializes_rfc3339_with_offset() {
        let agg = ExerciseAggregate::new(make_set("x", 0.0, 0).timestamp);

        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["timestamp"], "2023-06-15T10:30:00-07:00");
    }

    // ── Normalization ─────────────────────────────────────────────────────

    #[test]
    fn test_normalize_strong_strips_barbell_suffix() {
        assert_eq!(normalize_strong_exercise("Squat (Barbell)"), "Squat");
        assert_eq!(
            normalize_strong_exercise("Bench Press (Barbell)"),
            "Bench Press"
        );
    }

    #[test]
    fn test_normalize_strong_only_matches_at_end() {
        assert_eq!(
            normalize_strong_exercise("Squat (Barbell) Pause"),
            "Squat (Barbell) Pause"
        );
        assert_eq!(normalize_strong_exercise("Pull Up"), "Pull Up");
    }

    #[test]
    fn test_normalize_daily_strength_strips_barbell_prefix() {
        assert_eq!(normalize_daily_strength_exercise("Barbell Squats"), "Squats");
        assert_eq!(
            normalize_daily_strength_exercise("Barbell Bench Press"),
            "Bench Press"
        );
    }

    #[test]
    fn test_normalize_daily_strength_remaps_synonyms() {
        assert_eq!(normalize_daily_strength_exercise("Deadlifts"), "Deadlift");
        assert_eq!(
            normalize_daily_strength_exercise("Barbell Deadlifts"),
            "Deadlift"
        );
        assert_eq!(
            normalize_daily_strength_exercise("Bent Over Barbell Row"),
            "Bent Over Row"
        );
        assert_eq!(
            normalize_daily_strength_exercise("Standing Barbell Military Press"),
            "Overhead Press"
        );
    }

    #[test]
    fn test_normalize_daily_strength_passes_other_names_through() {
        assert_eq!(normalize_daily_strength_exercise("Dips"), "Dips");
        assert_eq!(
            normalize_daily_strength_exercise("Dumbbell Curl"),
            "Dumbbell Curl"
        );
    }
}
