// src/export/model.rs

use crate::core::membership::calendar::format_calendar_date;
use crate::core::membership::revenue::{RevenueSummary, parse_timestamp};
use crate::models::payment_method::label_for;
use crate::utils::formatting::format_amount;
use chrono::NaiveDate;
use serde::Serialize;

/// CSV header row, in the staff's language.
pub const CSV_HEADERS: [&str; 5] = ["Fecha", "Cliente", "Membresia", "Metodo de Pago", "Monto"];

/// One sale, flattened for export. `amount` carries two decimals.
#[derive(Serialize, Clone, Debug)]
pub struct ReportRowExport {
    pub date: String,
    pub client: String,
    pub membership: String,
    pub payment_method: String,
    pub amount: String,
}

impl ReportRowExport {
    pub(crate) fn to_record(&self) -> [&str; 5] {
        [
            self.date.as_str(),
            self.client.as_str(),
            self.membership.as_str(),
            self.payment_method.as_str(),
            self.amount.as_str(),
        ]
    }
}

/// JSON document: the rows plus the totals of the period.
#[derive(Serialize, Clone, Debug)]
pub struct ReportExport {
    pub start: String,
    pub end: String,
    pub total: String,
    pub cash: String,
    pub card: String,
    pub transfer: String,
    pub sinpe: String,
    pub other: String,
    pub rows: Vec<ReportRowExport>,
}

impl ReportExport {
    pub fn from_summary(summary: &RevenueSummary, start: NaiveDate, end: NaiveDate) -> Self {
        let rows = summary
            .rows
            .iter()
            .map(|r| ReportRowExport {
                date: parse_timestamp(&r.created_at)
                    .map(|ts| format_calendar_date(ts.date_naive()))
                    .unwrap_or_else(|| r.created_at.clone()),
                client: r.client_name.clone(),
                membership: r
                    .plan_name
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                payment_method: label_for(r.payments.as_deref()).to_string(),
                amount: format_amount(r.price_cents.unwrap_or(0)),
            })
            .collect();

        Self {
            start: format_calendar_date(start),
            end: format_calendar_date(end),
            total: format_amount(summary.total),
            cash: format_amount(summary.cash),
            card: format_amount(summary.card),
            transfer: format_amount(summary.transfer),
            sinpe: format_amount(summary.sinpe),
            other: format_amount(summary.other),
            rows,
        }
    }
}
