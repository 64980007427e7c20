//! Revenue aggregation per payment method.

use super::calendar::add_days;
use crate::models::membership::RevenueRow;
use crate::models::payment_method::PaymentMethod;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;

/// Sales whose `created_at` falls in the window, with per-method totals.
/// Amounts are cents; a row without a plan counts as 0.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RevenueSummary {
    pub total: i64,
    pub cash: i64,
    pub card: i64,
    pub transfer: i64,
    pub sinpe: i64,
    /// Missing or unknown payment tag.
    pub other: i64,
    pub rows: Vec<RevenueRow>,
}

impl RevenueSummary {
    pub fn by_method(&self, method: PaymentMethod) -> i64 {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Transfer => self.transfer,
            PaymentMethod::Sinpe => self.sinpe,
        }
    }

    fn add(&mut self, row: RevenueRow) {
        let amount = row.price_cents.unwrap_or(0);

        match row.payments.as_deref().and_then(PaymentMethod::from_db_str) {
            Some(PaymentMethod::Cash) => self.cash += amount,
            Some(PaymentMethod::Card) => self.card += amount,
            Some(PaymentMethod::Transfer) => self.transfer += amount,
            Some(PaymentMethod::Sinpe) => self.sinpe += amount,
            None => self.other += amount,
        }

        self.total += amount;
        self.rows.push(row);
    }
}

/// Local-midnight bounds `[start 00:00, end+1 00:00)` covering whole days.
pub fn local_day_window(start: NaiveDate, end: NaiveDate) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let from = local_midnight(start)?;
    let to = local_midnight(add_days(end, 1))?;
    Some((from, to))
}

/// First instant of `day` in local time (DST gaps resolve to the earliest
/// valid instant).
fn local_midnight(day: NaiveDate) -> Option<DateTime<Local>> {
    let naive = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + chrono::Duration::hours(1))).earliest())
}

/// Parse a stored RFC 3339 timestamp into local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Sum plan prices per payment method for sales created within
/// `[start, end]` (whole local days). Rows with an unreadable
/// `created_at` cannot be placed in the window and are skipped.
pub fn aggregate_revenue(rows: Vec<RevenueRow>, start: NaiveDate, end: NaiveDate) -> RevenueSummary {
    let mut out = RevenueSummary::default();

    let Some((from, to)) = local_day_window(start, end) else {
        return out;
    };

    let mut in_range: Vec<(DateTime<Local>, RevenueRow)> = rows
        .into_iter()
        .filter_map(|r| parse_timestamp(&r.created_at).map(|ts| (ts, r)))
        .filter(|(ts, _)| *ts >= from && *ts < to)
        .collect();

    in_range.sort_by_key(|(ts, r)| (*ts, r.membership_id));

    for (_, row) in in_range {
        out.add(row);
    }

    out
}
