//! Segment lifecycle controller: start / pause / end_workday / status.
//!
//! Every operation runs as one IMMEDIATE transaction so concurrent calls
//! for the same user serialize on the database write lock; the row is the
//! single source of truth, there is no in-process timer state. The
//! reconciler runs first inside the same transaction, so an error anywhere
//! rolls back reconciliation writes together with the operation's own.
//!
//! Callers pass `now` explicitly; the CLI hands in `Utc::now()` and tests
//! hand in fixed instants.

use crate::config::Config;
use crate::core::calculator::worked;
use crate::core::reconciler;
use crate::db::{DbPool, audit, segments, users};
use crate::errors::{AppError, AppResult};
use crate::models::report::{EndOutcome, PauseOutcome, StatusReport};
use crate::models::segment::CUTOFF_NOTE;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior};

fn ensure_user(conn: &Connection, user_id: i64) -> AppResult<()> {
    users::get_user(conn, user_id)?
        .map(|_| ())
        .ok_or(AppError::NotFound("user", user_id))
}

/// Open a new segment. Fails with `AlreadyActive` when one is already
/// running after reconciliation.
pub fn start(pool: &mut DbPool, cfg: &Config, user_id: i64, now: DateTime<Utc>) -> AppResult<i64> {
    let tz = cfg.tz()?;
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    ensure_user(&tx, user_id)?;
    reconciler::reconcile(&tx, user_id, tz, now)?;
    if segments::find_open_segment(&tx, user_id)?.is_some() {
        return Err(AppError::AlreadyActive);
    }
    let id = segments::insert_segment(&tx, user_id, now, None, "")?;
    audit::record(
        &tx,
        "start",
        &id.to_string(),
        &format!("user {user_id} started segment {id}"),
    )?;

    tx.commit()?;
    Ok(id)
}

/// Close the running segment with the given note. A close under the
/// minimum duration deletes the segment instead and reports the discard
/// as a soft outcome, not an error.
pub fn pause(
    pool: &mut DbPool,
    cfg: &Config,
    user_id: i64,
    note: &str,
    now: DateTime<Utc>,
) -> AppResult<PauseOutcome> {
    let tz = cfg.tz()?;
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    ensure_user(&tx, user_id)?;
    reconciler::reconcile(&tx, user_id, tz, now)?;
    let open = segments::find_open_segment(&tx, user_id)?.ok_or(AppError::NoActiveSegment)?;

    let duration_ms = (now - open.start_time).num_milliseconds();
    let outcome = if duration_ms < cfg.min_segment_ms() {
        segments::delete_segment(&tx, open.id)?;
        audit::record(
            &tx,
            "pause",
            &open.id.to_string(),
            &format!(
                "discarded segment {} of user {} after {} ms (below {} s minimum)",
                open.id, user_id, duration_ms, cfg.min_segment_secs
            ),
        )?;
        PauseOutcome {
            discarded: true,
            short_seconds: Some(duration_ms / 1000),
            closed_id: None,
        }
    } else {
        segments::close_segment(&tx, open.id, now, note)?;
        audit::record(
            &tx,
            "pause",
            &open.id.to_string(),
            &format!("user {} closed segment {}", user_id, open.id),
        )?;
        PauseOutcome {
            discarded: false,
            short_seconds: None,
            closed_id: Some(open.id),
        }
    };

    tx.commit()?;
    Ok(outcome)
}

/// Close the day. Any running segment is settled like `pause`; the answer
/// carries today's total against the nominal workday. Falling short is a
/// soft outcome — the data is persisted regardless — and a day with no
/// segments at all is flagged separately.
pub fn end_workday(
    pool: &mut DbPool,
    cfg: &Config,
    user_id: i64,
    note: &str,
    now: DateTime<Utc>,
) -> AppResult<EndOutcome> {
    let tz = cfg.tz()?;
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    ensure_user(&tx, user_id)?;
    reconciler::reconcile(&tx, user_id, tz, now)?;

    if let Some(open) = segments::find_open_segment(&tx, user_id)? {
        let duration_ms = (now - open.start_time).num_milliseconds();
        if duration_ms < cfg.min_segment_ms() {
            segments::delete_segment(&tx, open.id)?;
            audit::record(
                &tx,
                "end",
                &open.id.to_string(),
                &format!(
                    "discarded segment {} of user {} after {} ms (below {} s minimum)",
                    open.id, user_id, duration_ms, cfg.min_segment_secs
                ),
            )?;
        } else {
            segments::close_segment(&tx, open.id, now, note)?;
            audit::record(
                &tx,
                "end",
                &open.id.to_string(),
                &format!("user {} closed segment {} at end of day", user_id, open.id),
            )?;
        }
    }

    let today = now.with_timezone(&tz).date_naive();
    let day_segments = worked::segments_for_day(&tx, user_id, today, tz)?;
    let worked_ms: i64 = day_segments.iter().map(|s| s.duration_ms(now)).sum();
    let outcome = EndOutcome {
        worked_ms,
        remaining_ms: cfg.workday_ms() - worked_ms,
        nothing_logged: day_segments.is_empty(),
    };
    audit::record(
        &tx,
        "end",
        &user_id.to_string(),
        &format!("user {} ended the day with {} ms worked", user_id, worked_ms),
    )?;

    tx.commit()?;
    Ok(outcome)
}

/// Today's totals and the one-shot auto-cutoff notification. The client
/// timer is advisory only and resynchronizes against this answer.
pub fn status(
    pool: &mut DbPool,
    cfg: &Config,
    user_id: i64,
    now: DateTime<Utc>,
) -> AppResult<StatusReport> {
    let tz = cfg.tz()?;
    let tx = pool
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)?;

    ensure_user(&tx, user_id)?;
    reconciler::reconcile(&tx, user_id, tz, now)?;
    let notice = reconciler::take_pending_notice(&tx, user_id)?;

    let today = now.with_timezone(&tz).date_naive();
    let worked_today_ms = worked::daily_worked_ms(&tx, user_id, today, tz, now)?;
    let open = segments::find_open_segment(&tx, user_id)?;

    tx.commit()?;
    Ok(StatusReport {
        worked_today_ms,
        open_segment_start: open.map(|s| s.start_time),
        auto_cutoff_just_happened: notice.is_some(),
        cutoff_message: notice.map(|_| CUTOFF_NOTE.to_string()),
    })
}
