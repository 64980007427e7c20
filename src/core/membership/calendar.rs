//! Calendar-date handling for membership fields.
//!
//! `start_date` / `end_date` are plain `YYYY-MM-DD` days in the gym's local
//! civil calendar. They are never routed through a timestamp parser, so no
//! timezone offset can shift them by a day.

use chrono::{Days, Local, Months, NaiveDate};
use std::cmp::Ordering;

const DATE_FMT: &str = "%Y-%m-%d";

/// Current day in the process' local calendar (not UTC).
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Strict `YYYY-MM-DD` parser.
///
/// Anything else returns `None`, including full timestamps such as
/// `2024-08-01T00:00:00Z`: truncating those would depend on the offset.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }

    let digits_ok = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveDate::parse_from_str(s, DATE_FMT).ok()
}

pub fn format_calendar_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Human display used in check-in and listing messages (DD/MM/YYYY).
pub fn display_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

pub fn compare_calendar_date(a: NaiveDate, b: NaiveDate) -> i8 {
    match a.cmp(&b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Shift by `n` days (negative goes back). Saturates at chrono's date bounds.
pub fn add_days(d: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        d.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        d.checked_sub_days(Days::new(n.unsigned_abs()))
    };

    shifted.unwrap_or(if n >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Shift by `n` calendar months.
///
/// A day-of-month missing in the target month clamps to that month's last
/// day: 2024-01-31 + 1 month = 2024-02-29.
pub fn add_calendar_months(d: NaiveDate, n: i32) -> NaiveDate {
    let months = Months::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        d.checked_add_months(months)
    } else {
        d.checked_sub_months(months)
    };

    shifted.unwrap_or(if n >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Signed whole-day distance `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
