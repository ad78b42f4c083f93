use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

// ── Reference zone ────────────────────────────────────────────────────────────

/// The fixed zone every export is interpreted in, regardless of where the
/// device that produced it was set.
pub const REFERENCE_ZONE: Tz = Tz::America__Los_Angeles;

/// Wall-clock pattern shared by all supported export formats.
const SET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an export timestamp as wall-clock time in [`REFERENCE_ZONE`].
///
/// The match is exact: no trimming, no alternate patterns. Ambiguous local
/// times (the repeated hour when DST ends) resolve to the earlier instant;
/// nonexistent local times (the skipped hour when DST starts) normalize
/// forward by the width of the gap, so an export stamped inside it still
/// parses rather than discarding the file.
pub fn parse_set_timestamp(raw: &str) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::parse_from_str(raw, SET_TIMESTAMP_FORMAT).ok()?;
    match REFERENCE_ZONE.from_local_datetime(&naive) {
        LocalResult::Single(ts) => Some(ts),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // DST gaps in the reference zone are one hour wide.
        LocalResult::None => REFERENCE_ZONE
            .from_local_datetime(&(naive + TimeDelta::hours(1)))
            .earliest(),
    }
}

/// Oldest bucket instant the aggregation keeps.
///
/// Records whose *bucketed* timestamp falls strictly before this instant are
/// dropped, so a set recorded just after the cutoff can still vanish from a
/// coarse granularity when its bucket starts before it.
pub fn analysis_cutoff() -> DateTime<Tz> {
    REFERENCE_ZONE
        .with_ymd_and_hms(2021, 1, 1, 0, 0, 0)
        .earliest()
        .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC.with_timezone(&REFERENCE_ZONE))
}

// ── Bucket boundaries ─────────────────────────────────────────────────────────

/// Midnight of `date` in the reference zone, or `fallback` if that midnight
/// does not exist on the local calendar.
fn zone_midnight(date: NaiveDate, fallback: DateTime<Tz>) -> DateTime<Tz> {
    REFERENCE_ZONE
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .unwrap_or(fallback)
}

/// Midnight of the calendar day containing `ts`.
pub fn start_of_day(ts: DateTime<Tz>) -> DateTime<Tz> {
    zone_midnight(ts.date_naive(), ts)
}

/// Midnight of the Sunday beginning the week that contains `ts`.
pub fn start_of_week(ts: DateTime<Tz>) -> DateTime<Tz> {
    let back = TimeDelta::days(i64::from(ts.weekday().num_days_from_sunday()));
    zone_midnight(ts.date_naive() - back, ts)
}

/// Midnight of the first day of the month containing `ts`.
pub fn start_of_month(ts: DateTime<Tz>) -> DateTime<Tz> {
    let first = ts.date_naive().with_day(1).unwrap_or(ts.date_naive());
    zone_midnight(first, ts)
}

// ── Granularity ───────────────────────────────────────────────────────────────

/// One time-bucketing resolution of the aggregation pipeline.
///
/// Declaration order is the stable output order of every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// No bucketing; every distinct timestamp is its own bucket.
    Exact,
    /// Buckets aligned to midnight of the calendar day.
    Daily,
    /// Buckets aligned to midnight of the week's Sunday.
    Weekly,
    /// Buckets aligned to midnight of the first of the month.
    Monthly,
}

impl Granularity {
    /// Every granularity, in output order.
    pub const ALL: [Granularity; 4] = [
        Granularity::Exact,
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
    ];

    /// Map `ts` to the representative instant of its bucket.
    pub fn bucket(&self, ts: DateTime<Tz>) -> DateTime<Tz> {
        match self {
            Granularity::Exact => ts,
            Granularity::Daily => start_of_day(ts),
            Granularity::Weekly => start_of_week(ts),
            Granularity::Monthly => start_of_month(ts),
        }
    }
}
