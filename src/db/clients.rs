use crate::db::memberships::map_membership_view;
use crate::db::now_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::client::{Client, ClientUpdate, ClientWithLatestMembership, NewClient};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Clients joined to their latest membership (greatest `created_at`, ties
/// broken by id) and its plan.
const CLIENTS_WITH_LATEST: &str = r#"
    SELECT c.id, c.national_id, c.first_name, c.last_name, c.phone, c.email,
           c.birth_date, c.emergency_contact, c.emergency_phone, c.notes, c.created_at,
           m.id          AS m_id,
           m.member_id   AS m_member_id,
           m.plan_id     AS m_plan_id,
           m.start_date  AS m_start_date,
           m.end_date    AS m_end_date,
           m.status      AS m_status,
           m.payments    AS m_payments,
           m.created_at  AS m_created_at,
           p.name        AS p_name,
           p.price_cents AS p_price_cents
    FROM clients c
    LEFT JOIN memberships m ON m.id = (
        SELECT id FROM memberships
        WHERE member_id = c.id
        ORDER BY created_at DESC, id DESC
        LIMIT 1
    )
    LEFT JOIN membership_plans p ON p.id = m.plan_id
"#;

pub fn map_client(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        national_id: row.get("national_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        birth_date: row.get("birth_date")?,
        emergency_contact: row.get("emergency_contact")?,
        emergency_phone: row.get("emergency_phone")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

fn map_client_with_latest(row: &Row) -> Result<ClientWithLatestMembership> {
    Ok(ClientWithLatestMembership {
        client: map_client(row)?,
        latest: map_membership_view(row)?,
    })
}

pub fn insert_client(conn: &Connection, c: &NewClient) -> AppResult<i64> {
    if find_by_national_id(conn, &c.national_id)?.is_some() {
        return Err(AppError::DuplicateNationalId(c.national_id.clone()));
    }

    conn.execute(
        "INSERT INTO clients (national_id, first_name, last_name, phone, email, birth_date,
                              emergency_contact, emergency_phone, notes, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 'active', ?10)",
        params![
            c.national_id,
            c.first_name,
            c.last_name,
            c.phone,
            c.email,
            c.birth_date,
            c.emergency_contact,
            c.emergency_phone,
            c.notes,
            now_timestamp(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn find_by_national_id(conn: &Connection, national_id: &str) -> AppResult<Option<Client>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM clients WHERE national_id = ?1")?;
    let client = stmt.query_row([national_id.trim()], map_client).optional()?;
    Ok(client)
}

/// Lookup that turns "no row" into `ClientNotFound`.
pub fn require_by_national_id(conn: &Connection, national_id: &str) -> AppResult<Client> {
    find_by_national_id(conn, national_id)?
        .ok_or_else(|| AppError::ClientNotFound(national_id.trim().to_string()))
}

/// Update only the fields present in `upd`.
pub fn update_client(conn: &Connection, id: i64, upd: &ClientUpdate) -> AppResult<()> {
    conn.execute(
        "UPDATE clients
         SET first_name        = COALESCE(?1, first_name),
             last_name         = COALESCE(?2, last_name),
             phone             = COALESCE(?3, phone),
             email             = COALESCE(?4, email),
             birth_date        = COALESCE(?5, birth_date),
             emergency_contact = COALESCE(?6, emergency_contact),
             emergency_phone   = COALESCE(?7, emergency_phone),
             notes             = COALESCE(?8, notes),
             updated_at        = ?9
         WHERE id = ?10",
        params![
            upd.first_name,
            upd.last_name,
            upd.phone,
            upd.email,
            upd.birth_date,
            upd.emergency_contact,
            upd.emergency_phone,
            upd.notes,
            now_timestamp(),
            id,
        ],
    )?;
    Ok(())
}

/// Delete a client; memberships and attendance go with it (ON DELETE CASCADE).
pub fn delete_client(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
    Ok(())
}

pub fn load_clients_with_latest(conn: &Connection) -> AppResult<Vec<ClientWithLatestMembership>> {
    let sql = format!("{CLIENTS_WITH_LATEST} ORDER BY c.last_name ASC, c.first_name ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_client_with_latest)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_client_with_latest(
    conn: &Connection,
    national_id: &str,
) -> AppResult<Option<ClientWithLatestMembership>> {
    let sql = format!("{CLIENTS_WITH_LATEST} WHERE c.national_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row([national_id.trim()], map_client_with_latest)
        .optional()?;
    Ok(found)
}

/// Case-insensitive name search: a client matches when any token is a
/// substring of its first or last name.
pub fn search_clients(
    conn: &Connection,
    term: &str,
    limit: usize,
) -> AppResult<Vec<ClientWithLatestMembership>> {
    let tokens: Vec<String> = term
        .split_whitespace()
        .map(|t| format!("%{}%", escape_like(t)))
        .collect();

    if tokens.is_empty() {
        return Err(AppError::EmptySearch);
    }

    // One (first_name LIKE ? OR last_name LIKE ?) group per token
    let filters = (1..=tokens.len())
        .map(|i| {
            format!(
                "c.first_name LIKE ?{i} ESCAPE '\\' OR c.last_name LIKE ?{i} ESCAPE '\\'"
            )
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    let sql = format!(
        "{CLIENTS_WITH_LATEST} WHERE {filters} ORDER BY c.last_name ASC, c.first_name ASC LIMIT {limit}"
    );

    let params: Vec<&dyn rusqlite::ToSql> =
        tokens.iter().map(|s| s as &dyn rusqlite::ToSql).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_client_with_latest)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn escape_like(token: &str) -> String {
    token
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
