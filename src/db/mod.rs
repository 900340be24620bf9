//! SQLite persistence: schema, row mappers, and the per-table query modules.

use rusqlite::{Connection, Result};

pub mod absences;
pub mod audit;
pub mod migrate;
pub mod pool;
pub mod segments;
pub mod users;

pub use migrate::run_pending_migrations;
pub use pool::DbPool;

/// Initialize the database schema.
///
/// The partial unique index on `segments` is the store-level guarantee that
/// a user never holds two unterminated segments, independent of any
/// transaction discipline in the callers.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            vacation_days INTEGER NOT NULL DEFAULT 25
        );

        CREATE TABLE IF NOT EXISTS segments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id),
            start_time TEXT NOT NULL,          -- UTC, YYYY-MM-DDTHH:MM:SSZ
            end_time   TEXT,                   -- NULL while the segment runs
            note       TEXT NOT NULL DEFAULT ''
        );

        CREATE UNIQUE INDEX IF NOT EXISTS one_open_segment_per_user
            ON segments(user_id) WHERE end_time IS NULL;
        CREATE INDEX IF NOT EXISTS segments_by_user_start
            ON segments(user_id, start_time);

        CREATE TABLE IF NOT EXISTS absences (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            start_date  TEXT NOT NULL,         -- YYYY-MM-DD, inclusive
            end_date    TEXT NOT NULL,         -- YYYY-MM-DD, inclusive
            kind        TEXT NOT NULL CHECK (kind IN ('vacation','sick')),
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS cutoff_notices (
            segment_id  INTEGER PRIMARY KEY REFERENCES segments(id),
            cutoff_time TEXT NOT NULL,
            delivered   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        ",
    )?;
    run_pending_migrations(conn)?;
    Ok(())
}

/// Open a connection, apply pragmas, and ensure the schema exists.
pub fn open(path: &str) -> Result<DbPool> {
    let pool = DbPool::new(path)?;
    pool.conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )?;
    init_db(&pool.conn)?;
    Ok(pool)
}
