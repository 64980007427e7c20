#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use gymdesk::core::membership::calendar::format_calendar_date;
use gymdesk::models::client::{Client, ClientWithLatestMembership};
use gymdesk::models::membership::{Membership, MembershipView, PlanRef};
use gymdesk::models::membership_status::MembershipStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn gd() -> Command {
    cargo_bin_cmd!("gymdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gymdesk.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and add the plans most tests sell
pub fn init_db_with_plans(db_path: &str) {
    gd().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (code, name, price) in [
        ("MENS", "Mensual", "20000"),
        ("QUIN", "Quincenal", "12000"),
        ("SES", "Sesión", "2500"),
    ] {
        gd().args([
            "--db", db_path, "plan", "add", code, "--name", name, "--price", price,
        ])
        .assert()
        .success();
    }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn client(id: i64, first: &str, last: &str) -> Client {
    Client {
        id,
        national_id: format!("1-{:04}-0000", id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: None,
        email: None,
        birth_date: None,
        emergency_contact: None,
        emergency_phone: None,
        notes: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn membership(id: i64, end: &str, status: Option<MembershipStatus>) -> Membership {
    Membership {
        id,
        member_id: id,
        plan_id: 1,
        start_date: "2024-01-01".to_string(),
        end_date: end.to_string(),
        status,
        payments: Some("cash".to_string()),
        created_at: "2024-01-01T12:00:00Z".to_string(),
    }
}

pub fn membership_ending(id: i64, end: NaiveDate, status: Option<MembershipStatus>) -> Membership {
    membership(id, &format_calendar_date(end), status)
}

pub fn record(id: i64, latest: Option<Membership>) -> ClientWithLatestMembership {
    ClientWithLatestMembership {
        client: client(id, &format!("Client{}", id), "Test"),
        latest: latest.map(|membership| MembershipView {
            membership,
            plan: Some(PlanRef {
                name: "Mensual".to_string(),
                price_cents: 2_000_000,
            }),
        }),
    }
}
