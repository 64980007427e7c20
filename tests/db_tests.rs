use chrono::{Duration, Utc};
use gymdesk::core::membership::calendar::today;
use gymdesk::core::membership::plan::PlanFamily;
use gymdesk::core::membership::validity::days_remaining_on;
use gymdesk::core::plans::{MAX_DURATION_DAYS, PlanLogic};
use gymdesk::db::clients::{
    find_by_national_id, insert_client, load_client_with_latest, load_clients_with_latest,
    search_clients,
};
use gymdesk::db::initialize::init_db;
use gymdesk::db::memberships::{insert_membership_at, latest_for_client, mark_expired};
use gymdesk::db::plans::{find_plan, insert_plan, require_active_plan};
use gymdesk::db::pool::DbPool;
use gymdesk::db::timestamp;
use gymdesk::errors::AppError;
use gymdesk::models::client::NewClient;
use gymdesk::models::membership::NewMembership;
use gymdesk::models::membership_status::MembershipStatus;
use gymdesk::models::payment_method::PaymentMethod;
use gymdesk::models::plan::{NewPlan, PlanUpdate};

mod common;
use common::{setup_test_db, ymd};

fn open(name: &str) -> DbPool {
    let path = setup_test_db(name);
    let pool = DbPool::new(&path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

fn new_client(nid: &str, first: &str, last: &str) -> NewClient {
    NewClient {
        national_id: nid.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

fn plan(code: &str, name: &str, family: Option<PlanFamily>, active: bool) -> NewPlan {
    NewPlan {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        duration_days: 30,
        price_cents: 2_000_000,
        family,
        active,
    }
}

fn sale(member_id: i64, plan_id: i64, end_offset: i64) -> NewMembership {
    let t = today();
    NewMembership {
        member_id,
        plan_id,
        start_date: t,
        end_date: gymdesk::core::membership::calendar::add_days(t, end_offset),
        status: MembershipStatus::Active,
        payments: PaymentMethod::Cash,
    }
}

#[test]
fn migrations_are_idempotent() {
    let pool = open("db_migrations_idempotent");
    init_db(&pool.conn).expect("second run");

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(applied, 3);
}

#[test]
fn duplicate_national_id_is_rejected() {
    let pool = open("db_duplicate_nid");
    insert_client(&pool.conn, &new_client("1-1111-1111", "Ana", "Mora")).expect("insert");

    let err = insert_client(&pool.conn, &new_client("1-1111-1111", "Otra", "Persona"));
    assert!(matches!(err, Err(AppError::DuplicateNationalId(_))));
}

#[test]
fn latest_membership_is_the_newest_sale() {
    let pool = open("db_latest_membership");
    let cid = insert_client(&pool.conn, &new_client("1-2222-2222", "Luis", "Vargas")).expect("client");
    let pid = insert_plan(&pool.conn, &plan("MENS", "Mensual", None, true)).expect("plan");

    let older = timestamp(Utc::now() - Duration::days(40));
    let newer = timestamp(Utc::now() - Duration::days(1));

    insert_membership_at(&pool.conn, &sale(cid, pid, 20), &older).expect("older");
    let newest = insert_membership_at(&pool.conn, &sale(cid, pid, -1), &newer).expect("newer");

    let latest = latest_for_client(&pool.conn, cid).expect("query").expect("some");
    assert_eq!(latest.membership.id, newest);
    assert_eq!(latest.plan_name(), "Mensual");

    let all = load_clients_with_latest(&pool.conn).expect("load");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].latest.as_ref().map(|v| v.membership.id), Some(newest));
}

#[test]
fn mark_expired_updates_status() {
    let pool = open("db_mark_expired");
    let cid = insert_client(&pool.conn, &new_client("1-3333-3333", "Eva", "Solis")).expect("client");
    let pid = insert_plan(&pool.conn, &plan("MENS", "Mensual", None, true)).expect("plan");
    let mid = insert_membership_at(
        &pool.conn,
        &sale(cid, pid, -1),
        &timestamp(Utc::now()),
    )
    .expect("sale");

    mark_expired(&pool.conn, mid).expect("update");
    mark_expired(&pool.conn, mid).expect("idempotent");

    let rec = load_client_with_latest(&pool.conn, "1-3333-3333")
        .expect("query")
        .expect("found");
    let m = rec.latest.expect("membership").membership;
    assert_eq!(m.status, Some(MembershipStatus::Expired));
    assert_eq!(m.end().map(|e| days_remaining_on(e, today())), Some(-1));
}

#[test]
fn search_matches_any_token_in_either_name() {
    let pool = open("db_search_tokens");
    insert_client(&pool.conn, &new_client("1", "María", "Rojas")).expect("c1");
    insert_client(&pool.conn, &new_client("2", "Jorge", "Mora")).expect("c2");
    insert_client(&pool.conn, &new_client("3", "Pedro", "Castro")).expect("c3");

    let found = search_clients(&pool.conn, "mora rojas", 20).expect("search");
    let mut ids: Vec<String> = found.iter().map(|c| c.client.national_id.clone()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);

    let found = search_clients(&pool.conn, "PED", 20).expect("search");
    assert_eq!(found.len(), 1);

    // LIKE wildcards are literal
    assert!(search_clients(&pool.conn, "%", 20).expect("search").is_empty());

    assert!(matches!(
        search_clients(&pool.conn, "   ", 20),
        Err(AppError::EmptySearch)
    ));
}

#[test]
fn plans_resolve_by_code_or_id_and_must_be_active() {
    let pool = open("db_plan_lookup");
    let id = insert_plan(&pool.conn, &plan("SES", "Sesión", None, true)).expect("plan");
    insert_plan(&pool.conn, &plan("OLD", "Mensual 2019", None, false)).expect("old plan");
    insert_plan(&pool.conn, &plan("PROMO", "Promo", Some(PlanFamily::Weekly), true)).expect("promo");

    let by_code = find_plan(&pool.conn, "ses").expect("query").expect("found");
    assert_eq!(by_code.id, id);
    assert_eq!(by_code.end_date_from(ymd(2024, 6, 1)), ymd(2024, 6, 1));

    let by_id = find_plan(&pool.conn, &id.to_string()).expect("query").expect("found");
    assert_eq!(by_id.code, "SES");

    let promo = require_active_plan(&pool.conn, "PROMO").expect("active");
    assert_eq!(promo.end_date_from(ymd(2024, 6, 1)), ymd(2024, 6, 8));

    assert!(matches!(
        require_active_plan(&pool.conn, "OLD"),
        Err(AppError::PlanInactive(_))
    ));
    assert!(matches!(
        require_active_plan(&pool.conn, "NOPE"),
        Err(AppError::PlanNotFound(_))
    ));
}

#[test]
fn deleting_a_client_cascades() {
    let pool = open("db_delete_cascade");
    let cid = insert_client(&pool.conn, &new_client("9", "Sara", "Quesada")).expect("client");
    let pid = insert_plan(&pool.conn, &plan("MENS", "Mensual", None, true)).expect("plan");
    insert_membership_at(&pool.conn, &sale(cid, pid, 10), &timestamp(Utc::now())).expect("sale");
    gymdesk::db::attendance::insert_attendance(&pool.conn, cid, "kiosk").expect("attendance");

    gymdesk::db::clients::delete_client(&pool.conn, cid).expect("delete");

    assert!(find_by_national_id(&pool.conn, "9").expect("query").is_none());
    let left: i64 = pool
        .conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM memberships) + (SELECT COUNT(*) FROM attendance)",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(left, 0);
}

#[test]
fn numeric_plan_codes_are_not_confused_with_ids() {
    let mut pool = open("db_plan_numeric_codes");
    let mens = PlanLogic::add(&mut pool, plan("MENS", "Mensual", None, true)).expect("MENS");
    assert_eq!(mens.id, 1);

    let three = PlanLogic::add(&mut pool, plan("3", "Tres", None, true)).expect("code 3");
    assert_eq!(three.id, 2);

    // Gets id 3, the same text as the code of the plan above.
    let zz = PlanLogic::add(&mut pool, plan("ZZ", "Zeta", None, true)).expect("ZZ");
    assert_eq!(zz.id, 3);
    assert_eq!(zz.code, "ZZ");
    assert_eq!(zz.name, "Zeta");

    // Code "1" is free even though plan id 1 exists.
    let one = PlanLogic::add(&mut pool, plan("1", "Uno", None, true)).expect("code 1 is free");
    assert_eq!(one.code, "1");
    assert_eq!(one.name, "Uno");

    let edited = PlanLogic::edit(
        &mut pool,
        "ZZ",
        PlanUpdate {
            name: Some("Zeta Plus".into()),
            ..Default::default()
        },
    )
    .expect("edit");
    assert_eq!(edited.id, zz.id);
    assert_eq!(edited.name, "Zeta Plus");

    // "3" is typed as a key: the code wins over the id.
    assert_eq!(PlanLogic::require(&mut pool, "3").expect("by code").id, three.id);

    assert!(matches!(
        PlanLogic::add(&mut pool, plan("mens", "Otro", None, true)),
        Err(AppError::DuplicatePlanCode(_))
    ));
}

#[test]
fn only_unsold_plans_can_be_deleted() {
    let mut pool = open("db_plan_delete");
    let cid = insert_client(&pool.conn, &new_client("5", "Rita", "Campos")).expect("client");
    let sold = PlanLogic::add(&mut pool, plan("MENS", "Mensual", None, true)).expect("MENS");
    PlanLogic::add(&mut pool, plan("TMP", "Temporal", None, true)).expect("TMP");
    insert_membership_at(&pool.conn, &sale(cid, sold.id, 10), &timestamp(Utc::now())).expect("sale");

    let gone = PlanLogic::delete(&mut pool, "tmp").expect("unsold plan");
    assert_eq!(gone.code, "TMP");
    assert!(find_plan(&pool.conn, "TMP").expect("query").is_none());

    assert!(matches!(
        PlanLogic::delete(&mut pool, "MENS"),
        Err(AppError::PlanInUse(code)) if code == "MENS"
    ));
    assert!(find_plan(&pool.conn, "MENS").expect("query").is_some());

    let audited: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'plan_delete' AND target = 'TMP'",
            [],
            |r| r.get(0),
        )
        .expect("count");
    assert_eq!(audited, 1);
}

#[test]
fn plan_duration_is_capped() {
    let mut pool = open("db_plan_duration_cap");

    let mut huge = plan("LARGO", "Largo", Some(PlanFamily::Custom), true);
    huge.duration_days = 100_000;
    assert!(matches!(
        PlanLogic::add(&mut pool, huge),
        Err(AppError::InvalidAmount(_))
    ));

    let mut decade = plan("DIEZ", "Diez años", Some(PlanFamily::Custom), true);
    decade.duration_days = MAX_DURATION_DAYS;
    let decade = PlanLogic::add(&mut pool, decade).expect("ten years");
    let end = decade.end_date_from(today());
    assert_eq!(
        gymdesk::core::membership::calendar::parse_calendar_date(
            &gymdesk::core::membership::calendar::format_calendar_date(end)
        ),
        Some(end)
    );

    assert!(matches!(
        PlanLogic::edit(
            &mut pool,
            "DIEZ",
            PlanUpdate {
                duration_days: Some(MAX_DURATION_DAYS + 1),
                ..Default::default()
            },
        ),
        Err(AppError::InvalidAmount(_))
    ));
}

#[test]
fn plan_family_can_be_reset_to_name_inference() {
    let mut pool = open("db_plan_family_reset");
    PlanLogic::add(&mut pool, plan("PROMO", "Mensual promo", Some(PlanFamily::Weekly), true))
        .expect("promo");

    let kept = PlanLogic::edit(
        &mut pool,
        "PROMO",
        PlanUpdate {
            price_cents: Some(1_500_000),
            ..Default::default()
        },
    )
    .expect("price only");
    assert_eq!(kept.family, Some(PlanFamily::Weekly));

    let auto = PlanLogic::edit(
        &mut pool,
        "PROMO",
        PlanUpdate {
            family: Some(None),
            ..Default::default()
        },
    )
    .expect("auto");
    assert_eq!(auto.family, None);
    assert_eq!(auto.family(), PlanFamily::Monthly);
}

#[test]
fn broken_schema_reports_a_migration_error() {
    let path = setup_test_db("db_broken_log_table");
    let pool = DbPool::new(&path).expect("open db");
    pool.conn
        .execute_batch("CREATE TABLE log (id INTEGER PRIMARY KEY);")
        .expect("foreign log table");

    assert!(matches!(init_db(&pool.conn), Err(AppError::Migration(_))));
}
