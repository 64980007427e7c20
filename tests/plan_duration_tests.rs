use gymdesk::core::membership::plan::{PlanFamily, compute_end_date, normalize_name};

mod common;
use common::ymd;

#[test]
fn monthly_plan_adds_a_calendar_month() {
    assert_eq!(compute_end_date(ymd(2024, 1, 31), "Mensual", None), ymd(2024, 2, 29));
    assert_eq!(compute_end_date(ymd(2024, 5, 10), "Plan Familiar", None), ymd(2024, 6, 10));
}

#[test]
fn biweekly_and_weekly_add_fixed_days() {
    assert_eq!(compute_end_date(ymd(2024, 3, 15), "Quincenal", None), ymd(2024, 3, 29));
    assert_eq!(compute_end_date(ymd(2024, 3, 15), "Semanal", None), ymd(2024, 3, 22));
}

#[test]
fn session_plan_ends_the_same_day() {
    assert_eq!(compute_end_date(ymd(2024, 6, 1), "Sesion", None), ymd(2024, 6, 1));
    assert_eq!(compute_end_date(ymd(2024, 6, 1), "Sesión diaria", Some(30)), ymd(2024, 6, 1));
}

#[test]
fn names_are_matched_without_case_or_accents() {
    assert_eq!(normalize_name("SESIÓN"), "sesion");
    assert_eq!(PlanFamily::from_name("MENSUAL Estudiante"), PlanFamily::Monthly);
    assert_eq!(PlanFamily::from_name("quincenal"), PlanFamily::Biweekly);
}

#[test]
fn first_matching_keyword_wins() {
    // "mensual" is checked before "semanal"
    assert_eq!(PlanFamily::from_name("Mensual o Semanal"), PlanFamily::Monthly);
}

#[test]
fn unknown_names_use_the_fallback_duration() {
    assert_eq!(compute_end_date(ymd(2024, 1, 1), "Trimestral", Some(90)), ymd(2024, 3, 31));
    assert_eq!(compute_end_date(ymd(2024, 1, 1), "Promo", None), ymd(2024, 1, 31));
    assert_eq!(compute_end_date(ymd(2024, 1, 1), "Promo", Some(0)), ymd(2024, 1, 31));
    assert_eq!(compute_end_date(ymd(2024, 1, 1), "Promo", Some(-5)), ymd(2024, 1, 31));
}

#[test]
fn explicit_family_round_trips_through_storage_tags() {
    for f in [
        PlanFamily::Monthly,
        PlanFamily::Biweekly,
        PlanFamily::Weekly,
        PlanFamily::Session,
        PlanFamily::Custom,
    ] {
        assert_eq!(PlanFamily::from_db_str(f.to_db_str()), Some(f));
    }
    assert_eq!(PlanFamily::from_db_str("yearly"), None);
}
