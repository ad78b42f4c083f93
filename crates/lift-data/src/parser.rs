//! Row parsing shared by all dialects.
//!
//! One loop drives every dialect through its [`ColumnLayout`]. Timestamps are
//! strict: a single bad one abandons the whole file. Weight and reps are
//! lenient: a malformed value becomes zero and the row survives.

use csv::StringRecord;
use lift_core::calculations::kilograms_to_pounds;
use lift_core::error::{IngestError, Result};
use lift_core::models::LiftingSet;
use lift_core::time_utils::parse_set_timestamp;
use tracing::warn;

use crate::dialect::{ColumnLayout, Dialect};

/// Unit-column value marking a metric weight.
const METRIC_UNIT: &str = "kg";

/// Convert data rows into canonical sets, preserving row order.
///
/// `source` names the file being parsed and appears only in log output. Row
/// indices count data rows from zero, header excluded.
pub fn parse_rows(dialect: Dialect, source: &str, rows: &[StringRecord]) -> Result<Vec<LiftingSet>> {
    let layout = dialect.layout();
    let mut sets = Vec::with_capacity(rows.len());

    for (row, record) in rows.iter().enumerate() {
        sets.push(parse_row(&layout, source, row, record)?);
    }

    Ok(sets)
}

fn parse_row(
    layout: &ColumnLayout,
    source: &str,
    row: usize,
    record: &StringRecord,
) -> Result<LiftingSet> {
    let raw_timestamp = field(record, layout.date);
    let timestamp =
        parse_set_timestamp(raw_timestamp).ok_or_else(|| IngestError::TimestampParse {
            row,
            value: raw_timestamp.to_string(),
        })?;

    let mut weight_lbs = parse_weight(source, row, field(record, layout.weight));
    if let Some(unit_column) = layout.unit {
        if field(record, unit_column) == METRIC_UNIT {
            weight_lbs = kilograms_to_pounds(weight_lbs);
        }
    }

    let reps = parse_reps(source, row, field(record, layout.reps));
    let exercise = (layout.normalize)(field(record, layout.exercise));

    Ok(LiftingSet {
        timestamp,
        exercise,
        weight_lbs,
        reps,
    })
}

// ── Field helpers ─────────────────────────────────────────────────────────────

/// Field at `index`, or `""` when the record is too short.
fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// Parse a weight field, substituting zero for anything unparseable.
fn parse_weight(source: &str, row: usize, raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(weight) => weight,
        Err(_) => {
            warn!(
                "Failed to parse weight {:?} at row {} in {}; using 0",
                raw, row, source
            );
            0.0
        }
    }
}

/// Parse a reps field, substituting zero for anything unparseable.
fn parse_reps(source: &str, row: usize, raw: &str) -> u32 {
    match raw.parse::<u32>() {
        Ok(reps) => reps,
        Err(_) => {
            warn!(
                "Failed to parse reps {:?} at row {} in {}; using 0",
                raw, row, source
            );
            0
        }
    }
}
