use crate::models::user::User;
use rusqlite::{Connection, OptionalExtension, Result, params};

fn row_to_user(row: &rusqlite::Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        vacation_days: row.get(2)?,
    })
}

pub fn insert_user(conn: &Connection, name: &str, vacation_days: i64) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (name, vacation_days) VALUES (?1, ?2)",
        params![name, vacation_days],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, vacation_days FROM users WHERE id = ?1")?;
    stmt.query_row([id], row_to_user).optional()
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, vacation_days FROM users ORDER BY id ASC")?;
    let rows = stmt.query_map([], row_to_user)?;
    rows.collect()
}

pub fn set_vacation_days(conn: &Connection, id: i64, days: i64) -> Result<usize> {
    conn.execute(
        "UPDATE users SET vacation_days = ?1 WHERE id = ?2",
        params![days, id],
    )
}

/// Create the first user on a fresh database so the lifecycle commands
/// work right after `init`.
pub fn ensure_default_user(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))?;
    if count == 0 {
        insert_user(conn, "intern", 25)?;
    }
    Ok(())
}
