#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn stw() -> Command {
    cargo_bin_cmd!("stechuhr")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_stechuhr.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB schema and the default user via the CLI
pub fn init_db(db_path: &str) {
    stw()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
