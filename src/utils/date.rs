//! Period parsing for report ranges.

use crate::core::membership::calendar::{add_calendar_months, add_days, parse_calendar_date, today};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// First and last day of a single period:
/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    let invalid = || AppError::InvalidRange(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        // YYYY-MM
        7 => {
            let first = parse_calendar_date(&format!("{}-01", p)).ok_or_else(invalid)?;
            Ok((first, last_day_of_month(first)))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_calendar_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse `--range`: a single period, or `start:end` where both sides have
/// the same shape. The result spans from the first day of `start` to the
/// last day of `end`.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(AppError::InvalidRange(format!(
                    "{}: start and end must have the same format",
                    r
                )));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r)?,
    };

    if start > end {
        return Err(AppError::InvalidRange(format!("{}: start is after end", r)));
    }

    Ok((start, end))
}

pub fn last_day_of_month(d: NaiveDate) -> NaiveDate {
    let first = d.with_day(1).unwrap_or(d);
    add_days(add_calendar_months(first, 1), -1)
}

/// First and last day of the current month.
pub fn current_month() -> (NaiveDate, NaiveDate) {
    let t = today();
    let first = t.with_day(1).unwrap_or(t);
    (first, last_day_of_month(first))
}
