use chrono::Datelike;
use gymdesk::core::membership::calendar::{add_days, format_calendar_date, today};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{gd, init_db_with_plans, setup_test_db, temp_out};

fn register(db_path: &str, nid: &str, first: &str, last: &str, plan: Option<&str>) {
    let mut args = vec![
        "--db", db_path, "client", "register", nid, "--first", first, "--last", last,
    ];
    if let Some(p) = plan {
        args.extend(["--plan", p, "--pay", "card"]);
    }
    gd().args(&args).assert().success();
}

#[test]
fn init_creates_schema_in_test_mode() {
    let db_path = setup_test_db("cli_init");

    gd().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    gd().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn commands_require_an_initialized_database() {
    let db_path = setup_test_db("cli_missing_db");

    gd().args(["--db", &db_path, "summary"])
        .assert()
        .failure()
        .stderr(contains("gymdesk init"));
}

#[test]
fn plans_are_listed_with_prices() {
    let db_path = setup_test_db("cli_plan_list");
    init_db_with_plans(&db_path);

    gd().args(["--db", &db_path, "plan", "list"])
        .assert()
        .success()
        .stdout(contains("MENS"))
        .stdout(contains("₡20,000.00"))
        .stdout(contains("session"));

    gd().args([
        "--db", &db_path, "plan", "add", "MENS", "--name", "Otro", "--price", "1",
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));
}

#[test]
fn plan_delete_and_family_auto() {
    let db_path = setup_test_db("cli_plan_delete");
    init_db_with_plans(&db_path);
    register(&db_path, "20", "Ivan", "Rojas", Some("MENS"));

    gd().args([
        "--db", &db_path, "plan", "add", "PROMO", "--name", "Mensual promo", "--price", "9000",
        "--family", "weekly",
    ])
    .assert()
    .success()
    .stdout(contains("weekly"));

    gd().args(["--db", &db_path, "plan", "edit", "PROMO", "--family", "auto"])
        .assert()
        .success()
        .stdout(contains("updated"));

    gd().args(["--db", &db_path, "plan", "delete", "PROMO", "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    gd().args(["--db", &db_path, "plan", "delete", "MENS", "-y"])
        .assert()
        .failure()
        .stderr(contains("deactivate it instead"));

    gd().args(["--db", &db_path, "plan", "edit", "SES", "--family", "yearly"])
        .assert()
        .failure()
        .stderr(contains("Invalid plan family"));
}

#[test]
fn register_with_plan_then_check_in() {
    let db_path = setup_test_db("cli_register_checkin");
    init_db_with_plans(&db_path);

    register(&db_path, "1-1111-1111", "Ana", "Mora", Some("MENS"));

    gd().args(["--db", &db_path, "checkin", "1-1111-1111"])
        .assert()
        .success()
        .stdout(contains("Welcome Ana Mora"))
        .stdout(contains("Membership active, expires on"))
        .stdout(contains("Check-in recorded"));

    gd().args(["--db", &db_path, "checkout", "1-1111-1111"])
        .assert()
        .success()
        .stdout(contains("check-out recorded"));
}

#[test]
fn session_plan_expires_today() {
    let db_path = setup_test_db("cli_session_today");
    init_db_with_plans(&db_path);

    register(&db_path, "2-2222-2222", "Luis", "Vargas", Some("SES"));

    gd().args(["--db", &db_path, "checkin", "2-2222-2222"])
        .assert()
        .success()
        .stdout(contains("Membership expires today"));

    gd().args(["--db", &db_path, "expirations"])
        .assert()
        .success()
        .stdout(contains("expires today"))
        .stdout(contains("critical (≤1 day): 1"));
}

#[test]
fn stale_active_membership_is_reconciled_and_denied() {
    let db_path = setup_test_db("cli_stale_active");
    init_db_with_plans(&db_path);

    register(&db_path, "3-3333-3333", "Eva", "Solis", Some("MENS"));

    // Age the membership: ended yesterday, status still 'active'
    let yesterday = format_calendar_date(add_days(today(), -1));
    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute("UPDATE memberships SET end_date = ?1", [&yesterday])
        .expect("age membership");
    drop(conn);

    gd().args(["--db", &db_path, "checkin", "3-3333-3333"])
        .assert()
        .success()
        .stdout(contains("Hello Eva Solis"))
        .stdout(contains("please renew"))
        .stdout(contains("Check-in not recorded"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let status: String = conn
        .query_row("SELECT status FROM memberships", [], |r| r.get(0))
        .expect("status");
    let checkins: i64 = conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |r| r.get(0))
        .expect("count");
    assert_eq!(status, "expired");
    assert_eq!(checkins, 0);

    gd().args(["--db", &db_path, "client", "list"])
        .assert()
        .success()
        .stdout(contains("ACTIVE CLIENTS (0)"))
        .stdout(contains("INACTIVE CLIENTS (1)"));
}

#[test]
fn renewal_restores_access() {
    let db_path = setup_test_db("cli_renew");
    init_db_with_plans(&db_path);

    register(&db_path, "4-4444-4444", "Sara", "Quesada", None);

    gd().args(["--db", &db_path, "checkin", "4-4444-4444"])
        .assert()
        .success()
        .stdout(contains("No membership registered"));

    gd().args([
        "--db", &db_path, "renew", "4-4444-4444", "--plan", "QUIN", "--pay", "sinpe",
    ])
    .assert()
    .success()
    .stdout(contains("Membership renewed for Sara Quesada"));

    gd().args(["--db", &db_path, "checkin", "4-4444-4444"])
        .assert()
        .success()
        .stdout(contains("Welcome Sara Quesada"));

    gd().args(["--db", &db_path, "renew", "4-4444-4444", "--plan", "XYZ"])
        .assert()
        .failure()
        .stderr(contains("plan not found"));
}

#[test]
fn unknown_client_and_duplicates_are_errors() {
    let db_path = setup_test_db("cli_client_errors");
    init_db_with_plans(&db_path);

    gd().args(["--db", &db_path, "checkin", "9-9999-9999"])
        .assert()
        .failure()
        .stderr(contains("No client found"));

    register(&db_path, "5-5555-5555", "Pedro", "Castro", None);

    gd().args([
        "--db", &db_path, "client", "register", "5-5555-5555", "--first", "Otro", "--last",
        "Cliente",
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));

    gd().args([
        "--db", &db_path, "client", "register", "6", "--first", "Bad", "--last", "Date",
        "--birth", "01/02/1990",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid date"));
}

#[test]
fn search_requires_a_term() {
    let db_path = setup_test_db("cli_search");
    init_db_with_plans(&db_path);

    register(&db_path, "7", "María", "Rojas", None);
    register(&db_path, "8", "Jorge", "Mora", None);

    gd().args(["--db", &db_path, "client", "search"])
        .assert()
        .failure()
        .stderr(contains("Please enter a first or last name"));

    gd().args(["--db", &db_path, "client", "search", "mora"])
        .assert()
        .success()
        .stdout(contains("Jorge Mora"))
        .stdout(contains("María Rojas").not());
}

#[test]
fn edit_show_and_delete_client() {
    let db_path = setup_test_db("cli_edit_delete");
    init_db_with_plans(&db_path);

    register(&db_path, "10", "Carla", "Jimenez", Some("MENS"));

    gd().args(["--db", &db_path, "client", "edit", "10", "--phone", "8888-0000"])
        .assert()
        .success();

    gd().args(["--db", &db_path, "client", "show", "10"])
        .assert()
        .success()
        .stdout(contains("8888-0000"))
        .stdout(contains("Mensual"))
        .stdout(contains("Membership history"));

    gd().args(["--db", &db_path, "client", "delete", "10", "--yes"])
        .assert()
        .success();

    gd().args(["--db", &db_path, "client", "show", "10"])
        .assert()
        .failure()
        .stderr(contains("No client found"));
}

#[test]
fn report_exports_csv_with_fixed_header() {
    let db_path = setup_test_db("cli_report_csv");
    init_db_with_plans(&db_path);
    register(&db_path, "11", "Ana", "Mora", Some("MENS"));
    register(&db_path, "12", "Luis", "Vargas", Some("SES"));

    let t = today();
    let month = format!("{:04}-{:02}", t.year(), t.month());
    let out = temp_out("cli_report_csv", "csv");

    gd().args([
        "--db", &db_path, "report", "--range", &month, "--export", &out, "--format", "csv",
        "--force",
    ])
    .assert()
    .success()
    .stdout(contains("₡22,500.00"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Fecha,Cliente,Membresia,Metodo de Pago,Monto")
    );
    assert!(content.contains("\"Ana Mora\""));
    assert!(content.contains("20000.00"));
    assert!(content.contains("2500.00"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn report_exports_json() {
    let db_path = setup_test_db("cli_report_json");
    init_db_with_plans(&db_path);
    register(&db_path, "13", "Eva", "Solis", Some("QUIN"));

    let out = temp_out("cli_report_json", "json");

    gd().args([
        "--db", &db_path, "report", "--export", &out, "--format", "json", "--force",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read json");
    let v: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(v["total"], "12000.00");
    assert_eq!(v["card"], "12000.00");
    assert_eq!(v["rows"][0]["client"], "Eva Solis");
}

#[test]
fn report_rejects_bad_ranges() {
    let db_path = setup_test_db("cli_report_range");
    init_db_with_plans(&db_path);

    gd().args(["--db", &db_path, "report", "--range", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid range"));

    gd().args(["--db", &db_path, "report", "--range", "2024-05:2024-01"])
        .assert()
        .failure()
        .stderr(contains("start is after end"));
}

#[test]
fn summary_and_log_reflect_activity() {
    let db_path = setup_test_db("cli_summary_log");
    init_db_with_plans(&db_path);
    register(&db_path, "14", "Jorge", "Mora", Some("MENS"));

    gd().args(["--db", &db_path, "checkin", "14"])
        .assert()
        .success();

    gd().args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("Active clients:"))
        .stdout(contains("Check-ins today:"));

    gd().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("register"))
        .stdout(contains("checkin"))
        .stdout(contains("plan_add"));
}
