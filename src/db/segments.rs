//! Segment store: every read and write of `segments` rows goes through
//! here. Callers that mutate lifecycle state are expected to hold an
//! IMMEDIATE transaction; the partial unique index backstops the
//! single-open-segment invariant either way.

use crate::models::segment::WorkSegment;
use crate::utils::time::fmt_ts;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, params};

const SELECT_COLS: &str = "id, user_id, start_time, end_time, note";

fn parse_col_ts(idx: usize, s: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
        .map(|n| n.and_utc())
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

pub(crate) fn row_to_segment(row: &rusqlite::Row) -> Result<WorkSegment> {
    let start: String = row.get(2)?;
    let end: Option<String> = row.get(3)?;
    Ok(WorkSegment {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_time: parse_col_ts(2, &start)?,
        end_time: match end {
            Some(s) => Some(parse_col_ts(3, &s)?),
            None => None,
        },
        note: row.get(4)?,
    })
}

/// True when an INSERT/UPDATE bounced off the one-open-segment index.
pub fn is_open_conflict(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

/// Find the user's currently open segment, if any.
pub fn find_open_segment(conn: &Connection, user_id: i64) -> Result<Option<WorkSegment>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SELECT_COLS} FROM segments WHERE user_id = ?1 AND end_time IS NULL"
    ))?;
    stmt.query_row([user_id], row_to_segment).optional()
}

/// Insert a segment; `end = None` creates it open.
pub fn insert_segment(
    conn: &Connection,
    user_id: i64,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    note: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO segments (user_id, start_time, end_time, note) VALUES (?1, ?2, ?3, ?4)",
        params![user_id, fmt_ts(start), end.map(fmt_ts), note],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn close_segment(conn: &Connection, id: i64, end: DateTime<Utc>, note: &str) -> Result<usize> {
    conn.execute(
        "UPDATE segments SET end_time = ?1, note = ?2 WHERE id = ?3",
        params![fmt_ts(end), note, id],
    )
}

pub fn delete_segment(conn: &Connection, id: i64) -> Result<usize> {
    // a pending cut-off notice for the row goes with it
    conn.execute("DELETE FROM cutoff_notices WHERE segment_id = ?1", [id])?;
    conn.execute("DELETE FROM segments WHERE id = ?1", [id])
}

pub fn get_segment(conn: &Connection, id: i64) -> Result<Option<WorkSegment>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {SELECT_COLS} FROM segments WHERE id = ?1"))?;
    stmt.query_row([id], row_to_segment).optional()
}

pub fn update_times(
    conn: &Connection,
    id: i64,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> Result<usize> {
    conn.execute(
        "UPDATE segments SET start_time = ?1, end_time = ?2 WHERE id = ?3",
        params![fmt_ts(start), end.map(fmt_ts), id],
    )
}

pub fn update_note(conn: &Connection, id: i64, note: &str) -> Result<usize> {
    conn.execute(
        "UPDATE segments SET note = ?1 WHERE id = ?2",
        params![note, id],
    )
}

/// All of a user's segments with `from <= start_time < to`, oldest first.
pub fn segments_started_between(
    conn: &Connection,
    user_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<WorkSegment>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SELECT_COLS} FROM segments \
         WHERE user_id = ?1 AND start_time >= ?2 AND start_time < ?3 \
         ORDER BY start_time ASC, id ASC"
    ))?;
    let rows = stmt.query_map(params![user_id, fmt_ts(from), fmt_ts(to)], row_to_segment)?;
    rows.collect()
}
