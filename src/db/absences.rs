//! Absence records: plain CRUD plus the overlap query the aggregator needs.

use crate::models::absence::{AbsenceKind, AbsenceRecord};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, params};

const SELECT_COLS: &str = "id, user_id, start_date, end_date, kind, description";

fn parse_col_date(idx: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_absence(row: &rusqlite::Row) -> Result<AbsenceRecord> {
    let start: String = row.get(2)?;
    let end: String = row.get(3)?;
    let kind: String = row.get(4)?;
    Ok(AbsenceRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        start_date: parse_col_date(2, &start)?,
        end_date: parse_col_date(3, &end)?,
        kind: AbsenceKind::from_db_str(&kind).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown absence kind '{kind}'").into(),
            )
        })?,
        description: row.get(5)?,
    })
}

pub fn insert_absence(
    conn: &Connection,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    kind: AbsenceKind,
    description: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO absences (user_id, start_date, end_date, kind, description) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
            kind.to_db_str(),
            description
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_absence(conn: &Connection, id: i64) -> Result<Option<AbsenceRecord>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {SELECT_COLS} FROM absences WHERE id = ?1"))?;
    stmt.query_row([id], row_to_absence).optional()
}

pub fn delete_absence(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM absences WHERE id = ?1", [id])
}

pub fn list_absences(conn: &Connection, user_id: i64) -> Result<Vec<AbsenceRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SELECT_COLS} FROM absences WHERE user_id = ?1 ORDER BY start_date ASC"
    ))?;
    let rows = stmt.query_map([user_id], row_to_absence)?;
    rows.collect()
}

/// Absences of one kind whose inclusive date range intersects [from, to].
pub fn overlapping(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    kind: AbsenceKind,
) -> Result<Vec<AbsenceRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {SELECT_COLS} FROM absences \
         WHERE user_id = ?1 AND kind = ?2 AND start_date <= ?3 AND end_date >= ?4 \
         ORDER BY start_date ASC"
    ))?;
    let rows = stmt.query_map(
        params![
            user_id,
            kind.to_db_str(),
            to.format("%Y-%m-%d").to_string(),
            from.format("%Y-%m-%d").to_string()
        ],
        row_to_absence,
    )?;
    rows.collect()
}
