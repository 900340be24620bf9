//! Period reports: segment durations and vacation-day equivalents merged
//! into one chronological list, one entry per calendar day.

use crate::core::calculator::worked::day_start_utc;
use crate::db::{absences, segments};
use crate::errors::AppResult;
use crate::models::absence::AbsenceKind;
use crate::models::report::ReportEntry;
use crate::utils::date::{days_inclusive, is_weekday};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;
use std::collections::BTreeMap;

/// Consolidated entries for [from, to] inclusive, sorted by date.
/// Multiple segments on one day fold into a single entry but stay attached
/// for detail views; vacation weekdays contribute their hour equivalent.
pub fn period_report(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    tz: Tz,
    hours_per_vacation_day: i64,
    now: DateTime<Utc>,
) -> AppResult<Vec<ReportEntry>> {
    let mut by_day: BTreeMap<NaiveDate, ReportEntry> = BTreeMap::new();
    fn entry(map: &mut BTreeMap<NaiveDate, ReportEntry>, date: NaiveDate) -> &mut ReportEntry {
        map.entry(date).or_insert_with(move || ReportEntry {
            date,
            worked_ms: 0,
            vacation_hours: 0,
            segments: Vec::new(),
        })
    }

    let range_start = day_start_utc(from, tz)?;
    let range_end = day_start_utc(to.succ_opt().unwrap(), tz)?;
    for segment in segments::segments_started_between(conn, user_id, range_start, range_end)? {
        let day = segment.start_time.with_timezone(&tz).date_naive();
        let e = entry(&mut by_day, day);
        e.worked_ms += segment.duration_ms(now);
        e.segments.push(segment);
    }

    for absence in absences::overlapping(conn, user_id, from, to, AbsenceKind::Vacation)? {
        let lo = absence.start_date.max(from);
        let hi = absence.end_date.min(to);
        for day in days_inclusive(lo, hi).into_iter().filter(|d| is_weekday(*d)) {
            entry(&mut by_day, day).vacation_hours += hours_per_vacation_day;
        }
    }

    Ok(by_day.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::TimeZone;

    fn berlin() -> Tz {
        "Europe/Berlin".parse().unwrap()
    }

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_db(&conn).unwrap();
        conn.execute(
            "INSERT INTO users (name, vacation_days) VALUES ('intern', 25)",
            [],
        )
        .unwrap();
        conn
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_segments_consolidate_into_one_entry() {
        let conn = mem_db();
        let tz = berlin();
        let now = Utc.with_ymd_and_hms(2026, 4, 30, 12, 0, 0).unwrap();

        // two segments on April 7th, one on April 8th
        for (h_start, h_end) in [(9, 12), (13, 17)] {
            let s = tz
                .with_ymd_and_hms(2026, 4, 7, h_start, 0, 0)
                .unwrap()
                .with_timezone(&Utc);
            let e = tz
                .with_ymd_and_hms(2026, 4, 7, h_end, 0, 0)
                .unwrap()
                .with_timezone(&Utc);
            segments::insert_segment(&conn, 1, s, Some(e), "").unwrap();
        }
        let s = tz
            .with_ymd_and_hms(2026, 4, 8, 8, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        segments::insert_segment(&conn, 1, s, Some(s + chrono::Duration::hours(4)), "").unwrap();

        let entries =
            period_report(&conn, 1, d(2026, 4, 1), d(2026, 4, 30), tz, 8, now).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, d(2026, 4, 7));
        assert_eq!(entries[0].worked_ms, 7 * 3_600_000);
        assert_eq!(entries[0].segments.len(), 2);
        assert_eq!(entries[1].date, d(2026, 4, 8));
        assert_eq!(entries[1].worked_ms, 4 * 3_600_000);
    }

    #[test]
    fn vacation_days_appear_as_hour_equivalents() {
        let conn = mem_db();
        let tz = berlin();
        let now = Utc.with_ymd_and_hms(2026, 4, 30, 12, 0, 0).unwrap();
        // Thu 2026-04-09 .. Mon 2026-04-13
        absences::insert_absence(
            &conn,
            1,
            d(2026, 4, 9),
            d(2026, 4, 13),
            AbsenceKind::Vacation,
            "spring break",
        )
        .unwrap();

        let entries =
            period_report(&conn, 1, d(2026, 4, 1), d(2026, 4, 30), tz, 8, now).unwrap();
        // Thu, Fri, Mon — the weekend contributes nothing
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.vacation_hours == 8));
        assert!(entries.iter().all(|e| e.worked_ms == 0));
        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2026, 4, 9), d(2026, 4, 10), d(2026, 4, 13)]);
    }
}
