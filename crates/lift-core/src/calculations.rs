// ── Unit conversion ───────────────────────────────────────────────────────────

/// Pounds per kilogram, at the precision the source exports use.
pub const POUNDS_PER_KILOGRAM: f64 = 2.204623;

/// Convert a weight in kilograms to pounds.
pub fn kilograms_to_pounds(kilograms: f64) -> f64 {
    kilograms * POUNDS_PER_KILOGRAM
}

// ── One-rep-max estimation ────────────────────────────────────────────────────

/// Estimate a one-rep max with the Brzycki formula,
/// `weight * (36 / (37 - reps))`.
///
/// The estimate diverges as `reps` approaches 37 and turns negative past it.
/// Values in that range are returned as computed; callers treat rep counts
/// that high as garbage data rather than a reason to fail.
pub fn estimate_one_rep_max(weight_lbs: f64, reps: u32) -> f64 {
    weight_lbs * (36.0 / (37.0 - f64::from(reps)))
}
