//! Supervisor path: manual corrections that bypass the minimum-duration
//! check and the lifecycle lock, but never the single-open-segment
//! invariant (the partial unique index rejects a second open row) and
//! never the immutability of cut-off markers.

use crate::config::Config;
use crate::db::{DbPool, absences, audit, segments, users};
use crate::errors::{AppError, AppResult};
use crate::models::absence::AbsenceKind;
use crate::utils::time::{fmt_ts, local_to_utc};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Record an absence range. `start > end` is rejected.
pub fn create_absence(
    pool: &mut DbPool,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    kind: AbsenceKind,
    description: &str,
) -> AppResult<i64> {
    if start > end {
        return Err(AppError::InvalidDate(format!(
            "absence ends ({end}) before it starts ({start})"
        )));
    }
    let conn = &pool.conn;
    users::get_user(conn, user_id)?.ok_or(AppError::NotFound("user", user_id))?;
    let id = absences::insert_absence(conn, user_id, start, end, kind, description)?;
    audit::record(
        conn,
        "absence_add",
        &id.to_string(),
        &format!("user {user_id}: {} {start}..{end}", kind.to_db_str()),
    )?;
    Ok(id)
}

/// Delete an absence, scoped to the user it was recorded for.
pub fn delete_absence(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<()> {
    let conn = &pool.conn;
    let record = absences::get_absence(conn, id)?.ok_or(AppError::NotFound("absence", id))?;
    if record.user_id != user_id {
        return Err(AppError::Forbidden(id));
    }
    absences::delete_absence(conn, id)?;
    audit::record(
        conn,
        "absence_del",
        &id.to_string(),
        &format!("removed absence {id} of user {user_id}"),
    )?;
    Ok(())
}

/// Insert a segment with explicit wall-clock times. An `end` earlier than
/// `start` is rolled over to the next day; omitting `end` creates an open
/// segment, which the unique index rejects when one is already running.
pub fn add_segment(
    pool: &mut DbPool,
    cfg: &Config,
    user_id: i64,
    start_local: NaiveDateTime,
    end_local: Option<NaiveDateTime>,
    note: &str,
) -> AppResult<i64> {
    let tz = cfg.tz()?;
    let conn = &pool.conn;
    users::get_user(conn, user_id)?.ok_or(AppError::NotFound("user", user_id))?;

    let start = local_to_utc(start_local, tz)?;
    let end = match end_local {
        Some(e) => Some(rollover_end(start, local_to_utc(e, tz)?)),
        None => None,
    };
    let id = segments::insert_segment(conn, user_id, start, end, note).map_err(|e| {
        if segments::is_open_conflict(&e) {
            AppError::AlreadyActive
        } else {
            e.into()
        }
    })?;
    audit::record(
        conn,
        "admin_add",
        &id.to_string(),
        &format!("inserted segment {id} for user {user_id} at {}", fmt_ts(start)),
    )?;
    Ok(id)
}

/// Correct a segment's times and/or note. The expected owner guards
/// against cross-user edits; markers are immutable.
pub fn edit_segment(
    pool: &mut DbPool,
    cfg: &Config,
    user_id: i64,
    id: i64,
    new_start: Option<NaiveDateTime>,
    new_end: Option<NaiveDateTime>,
    new_note: Option<&str>,
) -> AppResult<()> {
    let tz = cfg.tz()?;
    let conn = &pool.conn;
    let segment = segments::get_segment(conn, id)?.ok_or(AppError::NotFound("segment", id))?;
    if segment.user_id != user_id {
        return Err(AppError::Forbidden(id));
    }
    if segment.is_cutoff_marker(tz) {
        return Err(AppError::MarkerImmutable(id));
    }

    let start = match new_start {
        Some(s) => local_to_utc(s, tz)?,
        None => segment.start_time,
    };
    let end = match new_end {
        Some(e) => Some(rollover_end(start, local_to_utc(e, tz)?)),
        None => segment.end_time.map(|e| rollover_end(start, e)),
    };
    segments::update_times(conn, id, start, end)?;
    if let Some(note) = new_note {
        segments::update_note(conn, id, note)?;
    }
    audit::record(
        conn,
        "admin_edit",
        &id.to_string(),
        &format!("edited segment {id} of user {user_id}"),
    )?;
    Ok(())
}

/// Remove a segment outright (admin correction, no minimum-duration rules).
pub fn delete_segment(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<()> {
    let conn = &pool.conn;
    let segment = segments::get_segment(conn, id)?.ok_or(AppError::NotFound("segment", id))?;
    if segment.user_id != user_id {
        return Err(AppError::Forbidden(id));
    }
    segments::delete_segment(conn, id)?;
    audit::record(
        conn,
        "admin_del",
        &id.to_string(),
        &format!("deleted segment {id} of user {user_id}"),
    )?;
    Ok(())
}

pub fn set_vacation_allowance(pool: &mut DbPool, user_id: i64, days: i64) -> AppResult<()> {
    let conn = &pool.conn;
    if users::set_vacation_days(conn, user_id, days)? == 0 {
        return Err(AppError::NotFound("user", user_id));
    }
    audit::record(
        conn,
        "allowance",
        &user_id.to_string(),
        &format!("vacation allowance of user {user_id} set to {days} days"),
    )?;
    Ok(())
}

/// Keep `end >= start` by rolling a wrapped end time over local midnight.
fn rollover_end(start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    if end < start { end + Duration::days(1) } else { end }
}
