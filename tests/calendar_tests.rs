use gymdesk::core::membership::calendar::{
    add_calendar_months, add_days, compare_calendar_date, days_between, display_date,
    format_calendar_date, parse_calendar_date,
};

mod common;
use common::ymd;

#[test]
fn parse_accepts_strict_dates_only() {
    assert_eq!(parse_calendar_date("2024-08-01"), Some(ymd(2024, 8, 1)));
    assert_eq!(parse_calendar_date("2024-8-1"), None);
    assert_eq!(parse_calendar_date("2024-08-01T00:00:00Z"), None);
    assert_eq!(parse_calendar_date("2024-02-30"), None);
    assert_eq!(parse_calendar_date("01/08/2024"), None);
    assert_eq!(parse_calendar_date(""), None);
    assert_eq!(parse_calendar_date("+024-08-01"), None);
}

#[test]
fn format_is_zero_padded_and_parses_back() {
    let d = ymd(2025, 3, 7);
    assert_eq!(format_calendar_date(d), "2025-03-07");
    assert_eq!(parse_calendar_date(&format_calendar_date(d)), Some(d));
    assert_eq!(display_date(d), "07/03/2025");
}

#[test]
fn compare_returns_sign() {
    assert_eq!(compare_calendar_date(ymd(2024, 1, 1), ymd(2024, 1, 2)), -1);
    assert_eq!(compare_calendar_date(ymd(2024, 1, 2), ymd(2024, 1, 2)), 0);
    assert_eq!(compare_calendar_date(ymd(2024, 2, 1), ymd(2024, 1, 31)), 1);
}

#[test]
fn month_addition_clamps_to_last_day() {
    assert_eq!(add_calendar_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
    assert_eq!(add_calendar_months(ymd(2023, 1, 31), 1), ymd(2023, 2, 28));
    assert_eq!(add_calendar_months(ymd(2024, 3, 31), 1), ymd(2024, 4, 30));
    assert_eq!(add_calendar_months(ymd(2024, 12, 15), 1), ymd(2025, 1, 15));
    assert_eq!(add_calendar_months(ymd(2024, 3, 31), -1), ymd(2024, 2, 29));
}

#[test]
fn day_arithmetic_crosses_months_and_years() {
    assert_eq!(add_days(ymd(2024, 2, 28), 1), ymd(2024, 2, 29));
    assert_eq!(add_days(ymd(2024, 12, 31), 1), ymd(2025, 1, 1));
    assert_eq!(add_days(ymd(2024, 3, 1), -1), ymd(2024, 2, 29));
    assert_eq!(days_between(ymd(2024, 8, 1), ymd(2024, 8, 11)), 10);
    assert_eq!(days_between(ymd(2024, 8, 11), ymd(2024, 8, 1)), -10);
}
