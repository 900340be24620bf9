//! Vacation accounting: absences are folded into workload hours at a
//! fixed rate per weekday. Day counting iterates plain calendar dates,
//! deliberately free of any zone or DST arithmetic.

use crate::db::{absences, users};
use crate::errors::{AppError, AppResult};
use crate::models::absence::AbsenceKind;
use crate::utils::date::{days_inclusive, is_weekday, year_bounds};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Work-hour credit for vacation weekdays inside [from, to]. Weekend days
/// and days outside the requested period never count, even when the
/// absence record covers them.
pub fn vacation_hours_for_period(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    hours_per_day: i64,
) -> AppResult<i64> {
    let mut hours = 0;
    for absence in absences::overlapping(conn, user_id, from, to, AbsenceKind::Vacation)? {
        let lo = absence.start_date.max(from);
        let hi = absence.end_date.min(to);
        hours += days_inclusive(lo, hi)
            .into_iter()
            .filter(|d| is_weekday(*d))
            .count() as i64
            * hours_per_day;
    }
    Ok(hours)
}

/// Annual allowance minus vacation days already taken, floored at zero.
pub fn remaining_vacation_days(
    conn: &Connection,
    user_id: i64,
    year: i32,
    hours_per_day: i64,
) -> AppResult<f64> {
    let user = users::get_user(conn, user_id)?.ok_or(AppError::NotFound("user", user_id))?;
    let (jan1, dec31) = year_bounds(year);
    let used_hours = vacation_hours_for_period(conn, user_id, jan1, dec31, hours_per_day)?;
    let used_days = used_hours as f64 / hours_per_day as f64;
    Ok((user.vacation_days as f64 - used_days).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

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
    fn full_workweek_counts_forty_hours() {
        let conn = mem_db();
        // Mon 2026-03-02 .. Fri 2026-03-06
        absences::insert_absence(&conn, 1, d(2026, 3, 2), d(2026, 3, 6), AbsenceKind::Vacation, "")
            .unwrap();
        let hours =
            vacation_hours_for_period(&conn, 1, d(2026, 3, 1), d(2026, 3, 31), 8).unwrap();
        assert_eq!(hours, 40);
    }

    #[test]
    fn weekends_inside_the_absence_are_skipped() {
        let conn = mem_db();
        // Fri 2026-03-06 .. Mon 2026-03-09 spans a weekend
        absences::insert_absence(&conn, 1, d(2026, 3, 6), d(2026, 3, 9), AbsenceKind::Vacation, "")
            .unwrap();
        let hours =
            vacation_hours_for_period(&conn, 1, d(2026, 3, 1), d(2026, 3, 31), 8).unwrap();
        assert_eq!(hours, 16); // Friday and Monday only
    }

    #[test]
    fn period_clips_the_absence_range() {
        let conn = mem_db();
        // two full workweeks
        absences::insert_absence(
            &conn,
            1,
            d(2026, 3, 2),
            d(2026, 3, 13),
            AbsenceKind::Vacation,
            "",
        )
        .unwrap();
        // only the first week falls inside the queried period
        let hours = vacation_hours_for_period(&conn, 1, d(2026, 3, 1), d(2026, 3, 8), 8).unwrap();
        assert_eq!(hours, 40);
    }

    #[test]
    fn sick_days_do_not_consume_allowance() {
        let conn = mem_db();
        absences::insert_absence(&conn, 1, d(2026, 3, 2), d(2026, 3, 6), AbsenceKind::Sick, "")
            .unwrap();
        let hours =
            vacation_hours_for_period(&conn, 1, d(2026, 3, 1), d(2026, 3, 31), 8).unwrap();
        assert_eq!(hours, 0);
        assert_eq!(remaining_vacation_days(&conn, 1, 2026, 8).unwrap(), 25.0);
    }

    #[test]
    fn remaining_allowance_floors_at_zero() {
        let conn = mem_db();
        conn.execute("UPDATE users SET vacation_days = 3 WHERE id = 1", [])
            .unwrap();
        absences::insert_absence(
            &conn,
            1,
            d(2026, 3, 2),
            d(2026, 3, 13),
            AbsenceKind::Vacation,
            "",
        )
        .unwrap();
        // 10 vacation days taken against an allowance of 3
        assert_eq!(remaining_vacation_days(&conn, 1, 2026, 8).unwrap(), 0.0);
    }
}
