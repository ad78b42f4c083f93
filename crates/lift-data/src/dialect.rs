//! Export-format detection.
//!
//! Each supported app export is identified by its exact header line. There is
//! no fuzzy matching: a header that is not byte-for-byte identical to one of
//! the known formats rejects the whole file.

use lift_core::error::{IngestError, Result};
use lift_core::models::{normalize_daily_strength_exercise, normalize_strong_exercise};

// ── Known header lines ────────────────────────────────────────────────────────

const STRONG_APPLE_HEADER: &str =
    "Date,Workout Name,Duration,Exercise Name,Set Order,Weight,Reps,Distance,Seconds,Notes,Workout Notes,RPE";

const STRONG_ANDROID_HEADER: &str =
    "Date;Workout Name;Exercise Name;Set Order;Weight;Weight Unit;Reps;RPE;Distance;Distance Unit;Seconds;Notes;Workout Notes;Workout Duration";

const DAILY_STRENGTH_HEADER: &str = "\"Date\",\"Workout name\",\"Exercise\",\"Set\",\"Weight\",\"Reps\",\"Distance\",\"Duration\",\"Measurement unit\",\"Notes\"";

// ── Column layout ─────────────────────────────────────────────────────────────

/// Where each canonical field lives in a dialect's data rows, and how to
/// canonicalize its exercise names.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnLayout {
    pub date: usize,
    pub exercise: usize,
    pub weight: usize,
    pub reps: usize,
    /// Column holding the weight unit, for dialects that report one.
    /// Weights are taken as pounds unless that column reads `"kg"`.
    pub unit: Option<usize>,
    pub normalize: fn(&str) -> String,
}

// ── Dialect ───────────────────────────────────────────────────────────────────

/// One supported export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Strong app, iOS export.
    StrongApple,
    /// Strong app, Android export.
    StrongAndroid,
    /// DailyStrength app, Android export.
    DailyStrengthAndroid,
}

impl Dialect {
    /// Match a header line (line terminator already stripped) against the
    /// known formats.
    pub fn detect(header_line: &str) -> Result<Dialect> {
        match header_line {
            STRONG_APPLE_HEADER => Ok(Dialect::StrongApple),
            STRONG_ANDROID_HEADER => Ok(Dialect::StrongAndroid),
            DAILY_STRENGTH_HEADER => Ok(Dialect::DailyStrengthAndroid),
            other => Err(IngestError::UnknownFormat(other.to_string())),
        }
    }

    /// The exact header line this dialect is recognized by.
    pub fn header(&self) -> &'static str {
        match self {
            Dialect::StrongApple => STRONG_APPLE_HEADER,
            Dialect::StrongAndroid => STRONG_ANDROID_HEADER,
            Dialect::DailyStrengthAndroid => DAILY_STRENGTH_HEADER,
        }
    }

    /// Field delimiter of this dialect's CSV body.
    pub fn delimiter(&self) -> u8 {
        match self {
            Dialect::StrongAndroid => b';',
            Dialect::StrongApple | Dialect::DailyStrengthAndroid => b',',
        }
    }

    /// Column positions and name normalizer for this dialect.
    pub(crate) fn layout(&self) -> ColumnLayout {
        match self {
            Dialect::StrongApple => ColumnLayout {
                date: 0,
                exercise: 3,
                weight: 5,
                reps: 6,
                unit: None,
                normalize: normalize_strong_exercise,
            },
            Dialect::StrongAndroid => ColumnLayout {
                date: 0,
                exercise: 2,
                weight: 4,
                reps: 6,
                unit: Some(5),
                normalize: normalize_strong_exercise,
            },
            Dialect::DailyStrengthAndroid => ColumnLayout {
                date: 0,
                exercise: 2,
                weight: 4,
                reps: 5,
                unit: Some(8),
                normalize: normalize_daily_strength_exercise,
            },
        }
    }
}
