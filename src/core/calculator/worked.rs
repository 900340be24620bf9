//! Daily worked-time aggregation. A segment belongs to the calendar day
//! its start falls on in the deployment's zone; a still-open segment is
//! measured against `now`.

use crate::db::segments;
use crate::errors::AppResult;
use crate::models::segment::WorkSegment;
use crate::utils::time::local_to_utc;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;

/// UTC instant of local midnight opening the given calendar day.
pub fn day_start_utc(day: NaiveDate, tz: Tz) -> AppResult<DateTime<Utc>> {
    local_to_utc(day.and_hms_opt(0, 0, 0).unwrap(), tz)
}

/// All segments whose start time falls on `day` local time, oldest first.
pub fn segments_for_day(
    conn: &Connection,
    user_id: i64,
    day: NaiveDate,
    tz: Tz,
) -> AppResult<Vec<WorkSegment>> {
    let from = day_start_utc(day, tz)?;
    let to = day_start_utc(day.succ_opt().unwrap(), tz)?;
    Ok(segments::segments_started_between(conn, user_id, from, to)?)
}

/// Total worked milliseconds on one calendar day.
pub fn daily_worked_ms(
    conn: &Connection,
    user_id: i64,
    day: NaiveDate,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    let total = segments_for_day(conn, user_id, day, tz)?
        .iter()
        .map(|s| s.duration_ms(now))
        .sum();
    Ok(total)
}
