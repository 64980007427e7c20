use crate::core::membership::plan::PlanFamily;
use crate::db::now_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::plan::{NewPlan, Plan, PlanUpdate};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

pub fn map_plan(row: &Row) -> Result<Plan> {
    let family: Option<String> = row.get("family")?;
    let status: String = row.get("status")?;

    Ok(Plan {
        id: row.get("id")?,
        code: row.get("code")?,
        name: row.get("name")?,
        description: row.get("description")?,
        duration_days: row.get("duration_days")?,
        price_cents: row.get("price_cents")?,
        family: family.as_deref().and_then(PlanFamily::from_db_str),
        active: status == "active",
    })
}

pub fn insert_plan(conn: &Connection, p: &NewPlan) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO membership_plans (code, name, description, duration_days, price_cents, family, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            p.code,
            p.name,
            p.description,
            p.duration_days,
            p.price_cents,
            p.family.map(|f| f.to_db_str()),
            if p.active { "active" } else { "inactive" },
            now_timestamp(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_plan(conn: &Connection, id: i64, upd: &PlanUpdate) -> AppResult<()> {
    conn.execute(
        "UPDATE membership_plans
         SET name          = COALESCE(?1, name),
             description   = COALESCE(?2, description),
             duration_days = COALESCE(?3, duration_days),
             price_cents   = COALESCE(?4, price_cents),
             family        = CASE WHEN ?5 THEN ?6 ELSE family END,
             status        = COALESCE(?7, status),
             updated_at    = ?8
         WHERE id = ?9",
        params![
            upd.name,
            upd.description,
            upd.duration_days,
            upd.price_cents,
            upd.family.is_some(),
            upd.family.flatten().map(|f| f.to_db_str()),
            upd.active.map(|a| if a { "active" } else { "inactive" }),
            now_timestamp(),
            id,
        ],
    )?;
    Ok(())
}

pub fn list_plans(conn: &Connection, only_active: bool) -> AppResult<Vec<Plan>> {
    let sql = if only_active {
        "SELECT * FROM membership_plans WHERE status = 'active' ORDER BY price_cents ASC, name ASC"
    } else {
        "SELECT * FROM membership_plans ORDER BY price_cents ASC, name ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_plan)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_plan_by_code(conn: &Connection, code: &str) -> AppResult<Option<Plan>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM membership_plans WHERE code = ?1 COLLATE NOCASE")?;
    Ok(stmt.query_row([code.trim()], map_plan).optional()?)
}

pub fn find_plan_by_id(conn: &Connection, id: i64) -> AppResult<Option<Plan>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM membership_plans WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_plan).optional()?)
}

/// Resolve a user-typed key: code first (case-insensitive), then numeric id.
pub fn find_plan(conn: &Connection, key: &str) -> AppResult<Option<Plan>> {
    let key = key.trim();

    if let Some(plan) = find_plan_by_code(conn, key)? {
        return Ok(Some(plan));
    }

    match key.parse::<i64>() {
        Ok(id) => find_plan_by_id(conn, id),
        Err(_) => Ok(None),
    }
}

/// Delete a plan row. Plans referenced by a membership stay: the foreign
/// key refuses the delete and it surfaces as `PlanInUse`.
pub fn delete_plan(conn: &Connection, plan: &Plan) -> AppResult<()> {
    match conn.execute("DELETE FROM membership_plans WHERE id = ?1", [plan.id]) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(AppError::PlanInUse(plan.code.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Plan usable for a new sale: must exist and be active.
pub fn require_active_plan(conn: &Connection, key: &str) -> AppResult<Plan> {
    let plan = find_plan(conn, key)?.ok_or_else(|| AppError::PlanNotFound(key.to_string()))?;
    if !plan.active {
        return Err(AppError::PlanInactive(plan.name));
    }
    Ok(plan)
}
