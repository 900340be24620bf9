//! Schema migrations, tracked through SQLite's `user_version` pragma.
//! Each step is idempotent and runs inside its own transaction.

use crate::ui::messages::success;
use rusqlite::{Connection, Result};

/// Current schema version. Bump together with a new entry in `MIGRATIONS`.
const SCHEMA_VERSION: i64 = 1;

/// Ordered list of (target version, batch) pairs applied on top of the
/// base schema from `init_db`.
const MIGRATIONS: &[(i64, &str)] = &[(
    // v1: one-shot delivery flag for cut-off notices. Databases created
    // before the flag existed treat every stored notice as delivered so
    // old rows never fire a surprise notification.
    1,
    "UPDATE cutoff_notices SET delivered = 1 WHERE delivered NOT IN (0, 1);",
)];

pub fn schema_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Apply every migration newer than the database's recorded version.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;

    for (version, batch) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        conn.execute_batch("BEGIN")?;
        match conn.execute_batch(batch) {
            Ok(()) => {
                conn.execute_batch(&format!("PRAGMA user_version = {version}"))?;
                conn.execute_batch("COMMIT")?;
                success(format!("Applied schema migration v{version}"));
            }
            Err(e) => {
                conn.execute_batch("ROLLBACK")?;
                return Err(e);
            }
        }
    }

    if current < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    }
    Ok(())
}
