use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Fixed note carried by the zero-duration marker segment the reconciler
/// inserts when it settles a segment left open across midnight.
pub const CUTOFF_NOTE: &str =
    "Auto cut-off: segment was automatically closed at 23:59 of the previous day";

/// A contiguous span of tracked work time.
/// `end_time = None` marks the segment as currently running; for any given
/// user at most one such row exists (enforced by a partial unique index).
#[derive(Debug, Clone, Serialize)]
pub struct WorkSegment {
    pub id: i64,
    pub user_id: i64,
    pub start_time: DateTime<Utc>,  // ⇔ segments.start_time (TEXT, UTC)
    pub end_time: Option<DateTime<Utc>>, // ⇔ segments.end_time (TEXT, NULL while open)
    pub note: String,
}

impl WorkSegment {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Worked span in milliseconds; a still-open segment is measured
    /// against `now`. Never negative.
    pub fn duration_ms(&self, now: DateTime<Utc>) -> i64 {
        let end = self.end_time.unwrap_or(now);
        (end - self.start_time).num_milliseconds().max(0)
    }

    /// A reconciliation marker is a closed segment ending at exactly
    /// 23:59:00 local time and carrying the fixed cut-off note.
    pub fn is_cutoff_marker(&self, tz: Tz) -> bool {
        let Some(end) = self.end_time else {
            return false;
        };
        let cutoff = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        end.with_timezone(&tz).time() == cutoff && self.note == CUTOFF_NOTE
    }
}
