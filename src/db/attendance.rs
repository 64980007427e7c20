use crate::db::now_timestamp;
use crate::errors::AppResult;
use crate::models::attendance::Attendance;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_attendance(row: &Row) -> Result<Attendance> {
    Ok(Attendance {
        id: row.get("id")?,
        member_id: row.get("member_id")?,
        checked_in_at: row.get("checked_in_at")?,
        checked_out_at: row.get("checked_out_at")?,
        source: row.get("source")?,
        notes: row.get("notes")?,
    })
}

/// Check-in write: `{member_id, checked_in_at}` plus the source tag.
pub fn insert_attendance(conn: &Connection, member_id: i64, source: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance (member_id, checked_in_at, source) VALUES (?1, ?2, ?3)",
        params![member_id, now_timestamp(), source],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent attendance row without a check-out.
pub fn latest_open(conn: &Connection, member_id: i64) -> AppResult<Option<Attendance>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM attendance
         WHERE member_id = ?1 AND checked_out_at IS NULL
         ORDER BY checked_in_at DESC, id DESC
         LIMIT 1",
    )?;
    Ok(stmt.query_row([member_id], map_attendance).optional()?)
}

pub fn close_attendance(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE attendance SET checked_out_at = ?1 WHERE id = ?2",
        params![now_timestamp(), id],
    )?;
    Ok(())
}

/// Check-ins with `from <= checked_in_at < to`; bounds are stored-format
/// UTC timestamps.
pub fn count_between(conn: &Connection, from: &str, to: &str) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE checked_in_at >= ?1 AND checked_in_at < ?2",
        [from, to],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn recent_for_client(conn: &Connection, member_id: i64, limit: usize) -> AppResult<Vec<Attendance>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance WHERE member_id = ?1
         ORDER BY checked_in_at DESC, id DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![member_id, limit as i64], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
