use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

const CREATE_CORE_TABLES: &str = "20250901_0001_create_core_tables";
const ADD_PLAN_FAMILY: &str = "20250915_0002_add_plan_family";
const ADD_ATTENDANCE_INDEXES: &str = "20251002_0003_attendance_indexes";

/// Ensure that the `log` table exists. Migrations record themselves there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// clients / membership_plans / memberships / attendance.
fn create_core_tables(conn: &Connection) -> Result<()> {
    if is_applied(conn, CREATE_CORE_TABLES)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            national_id       TEXT NOT NULL UNIQUE,
            first_name        TEXT NOT NULL,
            last_name         TEXT NOT NULL,
            phone             TEXT,
            email             TEXT,
            birth_date        TEXT,
            emergency_contact TEXT,
            emergency_phone   TEXT,
            notes             TEXT,
            status            TEXT DEFAULT 'active',
            created_at        TEXT NOT NULL,
            updated_at        TEXT
        );

        CREATE TABLE IF NOT EXISTS membership_plans (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            code          TEXT NOT NULL UNIQUE,
            name          TEXT NOT NULL,
            description   TEXT,
            duration_days INTEGER NOT NULL DEFAULT 30,
            price_cents   INTEGER NOT NULL DEFAULT 0,
            status        TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','inactive')),
            created_at    TEXT NOT NULL,
            updated_at    TEXT
        );

        CREATE TABLE IF NOT EXISTS memberships (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id   INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            plan_id     INTEGER NOT NULL REFERENCES membership_plans(id),
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            status      TEXT DEFAULT 'active',
            payments    TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_memberships_member_created
            ON memberships(member_id, created_at);

        CREATE TABLE IF NOT EXISTS attendance (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id      INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            checked_in_at  TEXT NOT NULL,
            checked_out_at TEXT,
            source         TEXT DEFAULT 'kiosk',
            notes          TEXT
        );
        "#,
    )?;

    mark_applied(conn, CREATE_CORE_TABLES, "created clients, plans, memberships and attendance")
}

/// Explicit plan family; NULL keeps inferring it from the plan name.
fn add_plan_family(conn: &Connection) -> Result<()> {
    if is_applied(conn, ADD_PLAN_FAMILY)? {
        return Ok(());
    }

    if !table_has_column(conn, "membership_plans", "family")? {
        conn.execute(
            "ALTER TABLE membership_plans ADD COLUMN family TEXT
             CHECK(family IS NULL OR family IN ('monthly','biweekly','weekly','session','custom'))",
            [],
        )?;
    }

    mark_applied(conn, ADD_PLAN_FAMILY, "added 'family' to membership_plans")
}

fn add_attendance_indexes(conn: &Connection) -> Result<()> {
    if is_applied(conn, ADD_ATTENDANCE_INDEXES)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_attendance_member_in
            ON attendance(member_id, checked_in_at);
        CREATE INDEX IF NOT EXISTS idx_attendance_in
            ON attendance(checked_in_at);
        "#,
    )?;

    mark_applied(conn, ADD_ATTENDANCE_INDEXES, "indexed attendance check-ins")
}

/// Public entry point: run all pending migrations in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_core_tables(conn)?;
    add_plan_family(conn)?;
    add_attendance_indexes(conn)?;
    Ok(())
}

/// Versions already recorded in `log`, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
