//! End-to-end lifecycle scenarios against an in-memory database with
//! fixed clock instants.

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use stechuhr::config::Config;
use stechuhr::core::calculator::worked;
use stechuhr::core::lifecycle;
use stechuhr::db::{self, DbPool};
use stechuhr::errors::AppError;

fn setup() -> (DbPool, Config) {
    let pool = DbPool::new(":memory:").unwrap();
    db::init_db(&pool.conn).unwrap();
    db::users::ensure_default_user(&pool.conn).unwrap();
    let cfg = Config {
        database: ":memory:".to_string(),
        ..Config::default()
    };
    (pool, cfg)
}

fn berlin() -> Tz {
    "Europe/Berlin".parse().unwrap()
}

#[test]
fn short_roundtrip_keeps_a_45_second_segment() {
    let (mut pool, cfg) = setup();
    let tz = berlin();
    let start = tz
        .with_ymd_and_hms(2026, 2, 2, 13, 5, 0)
        .unwrap()
        .with_timezone(&Utc);

    lifecycle::start(&mut pool, &cfg, 1, start).unwrap();
    let outcome = lifecycle::pause(&mut pool, &cfg, 1, "", start + Duration::seconds(45)).unwrap();
    assert!(!outcome.discarded);

    let day = start.with_timezone(&tz).date_naive();
    let worked = worked::daily_worked_ms(&pool.conn, 1, day, tz, start + Duration::hours(1)).unwrap();
    assert_eq!(worked, 45_000);
}

#[test]
fn sub_minimum_segment_is_discarded_without_error() {
    let (mut pool, cfg) = setup();
    let tz = berlin();
    let start = tz
        .with_ymd_and_hms(2026, 2, 2, 9, 0, 0)
        .unwrap()
        .with_timezone(&Utc);

    lifecycle::start(&mut pool, &cfg, 1, start).unwrap();
    let outcome = lifecycle::pause(&mut pool, &cfg, 1, "", start + Duration::seconds(12)).unwrap();
    assert!(outcome.discarded);
    assert_eq!(outcome.short_seconds, Some(12));
    assert!(outcome.closed_id.is_none());

    // the discard leaves no trace in the day's total
    let day = start.with_timezone(&tz).date_naive();
    let worked = worked::daily_worked_ms(&pool.conn, 1, day, tz, start + Duration::hours(1)).unwrap();
    assert_eq!(worked, 0);
}

#[test]
fn exactly_thirty_seconds_is_kept() {
    let (mut pool, cfg) = setup();
    let start = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();

    lifecycle::start(&mut pool, &cfg, 1, start).unwrap();
    let outcome = lifecycle::pause(&mut pool, &cfg, 1, "", start + Duration::seconds(30)).unwrap();
    assert!(!outcome.discarded);
    assert!(outcome.closed_id.is_some());
}

#[test]
fn double_start_reports_already_active() {
    let (mut pool, cfg) = setup();
    let start = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();

    lifecycle::start(&mut pool, &cfg, 1, start).unwrap();
    let err = lifecycle::start(&mut pool, &cfg, 1, start + Duration::minutes(5)).unwrap_err();
    assert!(matches!(err, AppError::AlreadyActive));
}

#[test]
fn pause_without_running_segment_reports_no_active_segment() {
    let (mut pool, cfg) = setup();
    let now = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();
    let err = lifecycle::pause(&mut pool, &cfg, 1, "", now).unwrap_err();
    assert!(matches!(err, AppError::NoActiveSegment));
}

#[test]
fn quota_is_met_at_exactly_eight_hours() {
    let (mut pool, cfg) = setup();
    let tz = berlin();
    let morning = tz
        .with_ymd_and_hms(2026, 2, 2, 8, 0, 0)
        .unwrap()
        .with_timezone(&Utc);

    // 8:00..12:00 and 13:00..17:00, exactly the nominal workday
    lifecycle::start(&mut pool, &cfg, 1, morning).unwrap();
    lifecycle::pause(&mut pool, &cfg, 1, "am", morning + Duration::hours(4)).unwrap();
    lifecycle::start(&mut pool, &cfg, 1, morning + Duration::hours(5)).unwrap();
    let outcome =
        lifecycle::end_workday(&mut pool, &cfg, 1, "pm", morning + Duration::hours(9)).unwrap();

    assert_eq!(outcome.worked_ms, 8 * 3_600_000);
    assert_eq!(outcome.remaining_ms, 0);
    assert!(outcome.quota_met());
    assert!(!outcome.nothing_logged);
}

#[test]
fn falling_short_of_the_quota_is_a_soft_outcome() {
    let (mut pool, cfg) = setup();
    let start = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();

    lifecycle::start(&mut pool, &cfg, 1, start).unwrap();
    let outcome =
        lifecycle::end_workday(&mut pool, &cfg, 1, "", start + Duration::hours(3)).unwrap();

    assert_eq!(outcome.worked_ms, 3 * 3_600_000);
    assert_eq!(outcome.remaining_ms, 5 * 3_600_000);
    assert!(!outcome.quota_met());
}

#[test]
fn ending_an_empty_day_flags_nothing_logged() {
    let (mut pool, cfg) = setup();
    let now = Utc.with_ymd_and_hms(2026, 2, 2, 18, 0, 0).unwrap();
    let outcome = lifecycle::end_workday(&mut pool, &cfg, 1, "", now).unwrap();
    assert!(outcome.nothing_logged);
    assert_eq!(outcome.worked_ms, 0);
}

#[test]
fn forgotten_segment_is_cut_off_and_notified_once() {
    let (mut pool, cfg) = setup();
    let tz = berlin();

    // left running at 23:30, checked the next morning
    let evening = tz
        .with_ymd_and_hms(2026, 2, 2, 23, 30, 0)
        .unwrap()
        .with_timezone(&Utc);
    lifecycle::start(&mut pool, &cfg, 1, evening).unwrap();

    let next_morning = tz
        .with_ymd_and_hms(2026, 2, 3, 8, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    let report = lifecycle::status(&mut pool, &cfg, 1, next_morning).unwrap();
    assert!(report.auto_cutoff_just_happened);
    assert!(report.cutoff_message.is_some());
    assert!(report.open_segment_start.is_none());

    // the notification is one-shot
    let again = lifecycle::status(&mut pool, &cfg, 1, next_morning).unwrap();
    assert!(!again.auto_cutoff_just_happened);
    assert!(again.cutoff_message.is_none());

    // 23:30..23:59 lands on the day the work happened
    let worked = worked::daily_worked_ms(
        &pool.conn,
        1,
        evening.with_timezone(&tz).date_naive(),
        tz,
        next_morning,
    )
    .unwrap();
    assert_eq!(worked, 29 * 60 * 1000);
}

#[test]
fn start_after_a_cutoff_opens_a_fresh_segment() {
    let (mut pool, cfg) = setup();
    let tz = berlin();
    let evening = tz
        .with_ymd_and_hms(2026, 2, 2, 22, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    lifecycle::start(&mut pool, &cfg, 1, evening).unwrap();

    // the stale segment never blocks the next day's start
    let next_morning = tz
        .with_ymd_and_hms(2026, 2, 3, 9, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    let id = lifecycle::start(&mut pool, &cfg, 1, next_morning).unwrap();
    let report = lifecycle::status(&mut pool, &cfg, 1, next_morning + Duration::minutes(1)).unwrap();
    assert_eq!(report.open_segment_start, Some(next_morning));
    assert!(id > 0);
}

#[test]
fn unknown_user_is_rejected_up_front() {
    let (mut pool, cfg) = setup();
    let now = Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap();
    let err = lifecycle::start(&mut pool, &cfg, 99, now).unwrap_err();
    assert!(matches!(err, AppError::NotFound("user", 99)));
}
