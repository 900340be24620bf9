//! Midnight cut-off reconciliation.
//!
//! A segment left open past local midnight is settled before any lifecycle
//! operation touches the store: it gets closed at 23:59:00 local time on
//! the day it started (so the hours land on the day the work happened),
//! and a zero-duration marker segment plus a one-shot notice row record
//! the event. Always runs inside the caller's transaction so a failure
//! rolls the whole operation back instead of leaving a half-applied close.

use crate::db::{audit, segments};
use crate::errors::AppResult;
use crate::models::segment::{CUTOFF_NOTE, WorkSegment};
use crate::utils::time::{fmt_ts, local_to_utc, parse_ts};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone)]
pub struct CutoffNotice {
    pub segment_id: i64,
    pub cutoff_time: DateTime<Utc>,
}

/// Settle the user's open segment if its local start day has passed.
/// Returns the notice when a cut-off was performed, `None` when nothing
/// was stale. Idempotent: a reconciled segment is closed, so a second
/// call finds no open segment and does nothing.
pub fn reconcile(
    conn: &Connection,
    user_id: i64,
    tz: Tz,
    now: DateTime<Utc>,
) -> AppResult<Option<CutoffNotice>> {
    let Some(open) = segments::find_open_segment(conn, user_id)? else {
        return Ok(None);
    };
    if !is_stale(&open, tz, now) {
        return Ok(None);
    }

    let start_day = open.start_time.with_timezone(&tz).date_naive();
    // 23:59:00 on the day the segment started, never before the start itself
    let cutoff = local_to_utc(start_day.and_hms_opt(23, 59, 0).unwrap(), tz)?
        .max(open.start_time);

    segments::close_segment(conn, open.id, cutoff, &open.note)?;
    segments::insert_segment(conn, user_id, cutoff, Some(cutoff), CUTOFF_NOTE)?;
    conn.execute(
        "INSERT OR IGNORE INTO cutoff_notices (segment_id, cutoff_time, delivered) \
         VALUES (?1, ?2, 0)",
        params![open.id, fmt_ts(cutoff)],
    )?;
    audit::record(
        conn,
        "cutoff",
        &open.id.to_string(),
        &format!(
            "closed stale segment {} of user {} at {}",
            open.id,
            user_id,
            fmt_ts(cutoff)
        ),
    )?;

    Ok(Some(CutoffNotice {
        segment_id: open.id,
        cutoff_time: cutoff,
    }))
}

/// Open and started on an earlier local calendar day than `now`.
fn is_stale(segment: &WorkSegment, tz: Tz, now: DateTime<Utc>) -> bool {
    segment.is_open()
        && segment.start_time.with_timezone(&tz).date_naive() < now.with_timezone(&tz).date_naive()
}

/// Pop the oldest undelivered cut-off notice for the user, marking it
/// delivered in the same step. This is the persisted one-shot flag behind
/// `status`'s "auto cut-off just happened" answer.
pub fn take_pending_notice(conn: &Connection, user_id: i64) -> AppResult<Option<CutoffNotice>> {
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT n.segment_id, n.cutoff_time FROM cutoff_notices n \
             JOIN segments s ON s.id = n.segment_id \
             WHERE s.user_id = ?1 AND n.delivered = 0 \
             ORDER BY n.segment_id ASC LIMIT 1",
            [user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

    let Some((segment_id, raw_time)) = row else {
        return Ok(None);
    };
    conn.execute(
        "UPDATE cutoff_notices SET delivered = 1 WHERE segment_id = ?1",
        [segment_id],
    )?;
    Ok(Some(CutoffNotice {
        segment_id,
        cutoff_time: parse_ts(&raw_time)?,
    }))
}
