use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Clients", "clients"),
        ("Plans", "membership_plans"),
        ("Memberships", "memberships"),
        ("Check-ins", "attendance"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    let stale: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM memberships
         WHERE status = 'active' AND end_date < date('now', 'localtime')",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Stale 'active' memberships:{} {}",
        CYAN, RESET, stale
    );

    //
    // 3) MEMBERSHIP DATE SPAN
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(start_date) FROM memberships", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(end_date) FROM memberships", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Membership span:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
