use predicates::str::contains;

mod common;
use common::{init_db, setup_test_db, stw};

#[test]
fn test_init_creates_schema_and_default_user() {
    let db_path = setup_test_db("init");

    stw()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database:"));

    stw()
        .args(["--db", &db_path, "user", "list"])
        .assert()
        .success()
        .stdout(contains("intern"));
}

#[test]
fn test_start_and_immediate_pause_is_discarded() {
    let db_path = setup_test_db("short_pause");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "start"])
        .assert()
        .success()
        .stdout(contains("started"));

    // pausing right away is below the 30 s minimum
    stw()
        .args(["--db", &db_path, "pause"])
        .assert()
        .success()
        .stdout(contains("discarded"));

    stw()
        .args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Worked today: 00:00:00"));
}

#[test]
fn test_pause_without_start_fails() {
    let db_path = setup_test_db("pause_no_start");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "pause"])
        .assert()
        .failure()
        .stderr(contains("No work segment is currently running"));
}

#[test]
fn test_double_start_fails() {
    let db_path = setup_test_db("double_start");
    init_db(&db_path);

    stw().args(["--db", &db_path, "start"]).assert().success();
    stw()
        .args(["--db", &db_path, "start"])
        .assert()
        .failure()
        .stderr(contains("already running"));
}

#[test]
fn test_status_json_output() {
    let db_path = setup_test_db("status_json");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "status", "--json"])
        .assert()
        .success()
        .stdout(contains("worked_today_ms"))
        .stdout(contains("auto_cutoff_just_happened"));
}

#[test]
fn test_admin_segment_appears_in_report() {
    let db_path = setup_test_db("admin_report");
    init_db(&db_path);

    stw()
        .args([
            "--db",
            &db_path,
            "segment",
            "add",
            "2026-04-07 09:00",
            "--end",
            "2026-04-07 12:30",
            "--note",
            "onboarding",
        ])
        .assert()
        .success()
        .stdout(contains("inserted"));

    stw()
        .args(["--db", &db_path, "report", "--day", "2026-04-07"])
        .assert()
        .success()
        .stdout(contains("2026-04-07"))
        .stdout(contains("03:30:00"));

    stw()
        .args(["--db", &db_path, "segment", "list", "2026-04-07"])
        .assert()
        .success()
        .stdout(contains("onboarding"));
}

#[test]
fn test_absence_add_and_vacation_balance() {
    let db_path = setup_test_db("vacation");
    init_db(&db_path);

    // Mon 2026-06-01 .. Fri 2026-06-05: five vacation days
    stw()
        .args(["--db", &db_path, "absence", "add", "2026-06-01", "2026-06-05"])
        .assert()
        .success()
        .stdout(contains("recorded"));

    stw()
        .args(["--db", &db_path, "absence", "list"])
        .assert()
        .success()
        .stdout(contains("vacation"));

    stw()
        .args(["--db", &db_path, "vacation", "--year", "2026"])
        .assert()
        .success()
        .stdout(contains("20.0"));
}

#[test]
fn test_vacation_days_show_up_in_the_month_report() {
    let db_path = setup_test_db("vacation_report");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "absence", "add", "2026-06-01", "2026-06-02"])
        .assert()
        .success();

    stw()
        .args(["--db", &db_path, "report", "--month", "2026-06"])
        .assert()
        .success()
        .stdout(contains("2026-06-01"))
        .stdout(contains("vacation"));
}

#[test]
fn test_segment_edit_and_delete() {
    let db_path = setup_test_db("segment_edit");
    init_db(&db_path);

    stw()
        .args([
            "--db",
            &db_path,
            "segment",
            "add",
            "2026-04-07 09:00",
            "--end",
            "2026-04-07 10:00",
        ])
        .assert()
        .success();

    stw()
        .args([
            "--db",
            &db_path,
            "segment",
            "edit",
            "1",
            "--end",
            "2026-04-07 11:00",
        ])
        .assert()
        .success()
        .stdout(contains("updated"));

    stw()
        .args(["--db", &db_path, "report", "--day", "2026-04-07"])
        .assert()
        .success()
        .stdout(contains("02:00:00"));

    stw()
        .args(["--db", &db_path, "segment", "del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    stw()
        .args(["--db", &db_path, "report", "--day", "2026-04-07"])
        .assert()
        .success()
        .stdout(contains("No entries"));
}

#[test]
fn test_allowance_update() {
    let db_path = setup_test_db("allowance");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "user", "allowance", "30"])
        .assert()
        .success()
        .stdout(contains("30"));

    stw()
        .args(["--db", &db_path, "vacation", "--year", "2026"])
        .assert()
        .success()
        .stdout(contains("30.0"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    init_db(&db_path);

    stw()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Schema version"))
        .stdout(contains("segments"));

    stw()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log");
    init_db(&db_path);

    stw().args(["--db", &db_path, "start"]).assert().success();

    stw()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("start"));
}
