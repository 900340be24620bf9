//! Time utilities: timestamp storage format, local/UTC conversion,
//! formatting milliseconds as HH:MM:SS.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Storage format for all timestamps: UTC, second precision, sortable as text.
const TS_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn fmt_ts(t: DateTime<Utc>) -> String {
    t.format(TS_FORMAT).to_string()
}

pub fn parse_ts(s: &str) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .map_err(|_| AppError::InvalidTime(s.to_string()))?;
    Ok(naive.and_utc())
}

/// Resolve a wall-clock datetime in the given zone to a UTC instant.
/// A datetime skipped by a DST transition is shifted forward one hour.
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> AppResult<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Ok(dt.with_timezone(&Utc));
    }
    let shifted = naive + chrono::Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(naive.to_string()))
}

/// Parse a "YYYY-MM-DD HH:MM" wall-clock datetime (admin input).
pub fn parse_local_datetime(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

pub fn format_ms(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let total_secs = ms.abs() / 1000;
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
