//! Result shapes returned by the lifecycle controller and the aggregator.
//! Soft outcomes (too-short discard, quota not met, nothing logged) live
//! here as data; only genuine failures travel as AppError.

use crate::models::segment::WorkSegment;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Answer to `status`: today's total, the running segment if any, and the
/// one-shot auto-cutoff notification.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub worked_today_ms: i64,
    pub open_segment_start: Option<DateTime<Utc>>,
    pub auto_cutoff_just_happened: bool,
    pub cutoff_message: Option<String>,
}

/// Answer to `pause`. A segment shorter than the minimum duration is
/// deleted, not closed; `discarded` reports that outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PauseOutcome {
    pub discarded: bool,
    pub short_seconds: Option<i64>,
    pub closed_id: Option<i64>,
}

/// Answer to `end_workday`. `remaining_ms <= 0` means the daily quota is
/// met; the day's data is persisted either way.
#[derive(Debug, Clone, Serialize)]
pub struct EndOutcome {
    pub worked_ms: i64,
    pub remaining_ms: i64,
    pub nothing_logged: bool,
}

impl EndOutcome {
    pub fn quota_met(&self) -> bool {
        self.remaining_ms <= 0
    }
}

/// One consolidated report line: all of a calendar day's segments folded
/// into a single entry, vacation-day equivalents alongside. The individual
/// segments stay attached for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub date: NaiveDate,
    pub worked_ms: i64,
    pub vacation_hours: i64,
    pub segments: Vec<WorkSegment>,
}
