use crate::core::membership::calendar::format_calendar_date;
use crate::db::now_timestamp;
use crate::errors::AppResult;
use crate::models::membership::{Membership, MembershipView, NewMembership, PlanRef, RevenueRow};
use crate::models::membership_status::MembershipStatus;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Map the `m_*` / `p_*` columns of a joined row; `None` when the LEFT JOIN
/// found no membership.
pub fn map_membership_view(row: &Row) -> Result<Option<MembershipView>> {
    let id: Option<i64> = row.get("m_id")?;
    let Some(id) = id else {
        return Ok(None);
    };

    let status: Option<String> = row.get("m_status")?;
    let membership = Membership {
        id,
        member_id: row.get("m_member_id")?,
        plan_id: row.get("m_plan_id")?,
        start_date: row.get("m_start_date")?,
        end_date: row.get("m_end_date")?,
        status: status.as_deref().and_then(MembershipStatus::from_db_str),
        payments: row.get("m_payments")?,
        created_at: row.get("m_created_at")?,
    };

    let plan_name: Option<String> = row.get("p_name")?;
    let plan = match plan_name {
        Some(name) => Some(PlanRef {
            name,
            price_cents: row.get("p_price_cents")?,
        }),
        None => None,
    };

    Ok(Some(MembershipView { membership, plan }))
}

const VIEW_COLUMNS: &str = r#"
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
"#;

/// Insert a membership term created now.
pub fn insert_membership(conn: &Connection, m: &NewMembership) -> AppResult<i64> {
    insert_membership_at(conn, m, &now_timestamp())
}

/// Insert with an explicit `created_at` (UTC RFC 3339).
pub fn insert_membership_at(conn: &Connection, m: &NewMembership, created_at: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO memberships (member_id, plan_id, start_date, end_date, status, payments, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            m.member_id,
            m.plan_id,
            format_calendar_date(m.start_date),
            format_calendar_date(m.end_date),
            m.status.to_db_str(),
            m.payments.to_db_str(),
            created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Lazy reconciliation write. Unguarded: concurrent corrections of the same
/// row all write the same value.
pub fn mark_expired(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE memberships SET status = 'expired', updated_at = ?1 WHERE id = ?2",
        params![now_timestamp(), id],
    )?;
    Ok(())
}

pub fn latest_for_client(conn: &Connection, member_id: i64) -> AppResult<Option<MembershipView>> {
    let sql = format!(
        "SELECT {VIEW_COLUMNS}
         FROM memberships m
         LEFT JOIN membership_plans p ON p.id = m.plan_id
         WHERE m.member_id = ?1
         ORDER BY m.created_at DESC, m.id DESC
         LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let view = stmt
        .query_row([member_id], map_membership_view)
        .optional()?
        .flatten();
    Ok(view)
}

/// Every term of a client, newest first.
pub fn history_for_client(conn: &Connection, member_id: i64) -> AppResult<Vec<MembershipView>> {
    let sql = format!(
        "SELECT {VIEW_COLUMNS}
         FROM memberships m
         LEFT JOIN membership_plans p ON p.id = m.plan_id
         WHERE m.member_id = ?1
         ORDER BY m.created_at DESC, m.id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([member_id], map_membership_view)?;

    let mut out = Vec::new();
    for r in rows {
        if let Some(v) = r? {
            out.push(v);
        }
    }
    Ok(out)
}

/// Membership sales with client name and plan price, oldest first.
/// Date filtering happens in the revenue engine.
pub fn load_revenue_rows(conn: &Connection) -> AppResult<Vec<RevenueRow>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.created_at, m.payments,
                c.first_name || ' ' || c.last_name AS client_name,
                p.name, p.price_cents
         FROM memberships m
         JOIN clients c ON c.id = m.member_id
         LEFT JOIN membership_plans p ON p.id = m.plan_id
         ORDER BY m.created_at ASC, m.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(RevenueRow {
            membership_id: row.get(0)?,
            created_at: row.get(1)?,
            payments: row.get(2)?,
            client_name: row.get(3)?,
            plan_name: row.get(4)?,
            price_cents: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
