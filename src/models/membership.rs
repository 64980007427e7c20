use super::membership_status::MembershipStatus;
use super::payment_method::PaymentMethod;
use crate::core::membership::calendar::parse_calendar_date;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Membership {
    pub id: i64,
    pub member_id: i64,
    pub plan_id: i64,
    pub start_date: String,                // ⇔ memberships.start_date (TEXT "YYYY-MM-DD")
    pub end_date: String,                  // ⇔ memberships.end_date (TEXT "YYYY-MM-DD")
    pub status: Option<MembershipStatus>,  // ⇔ memberships.status (NULL / unknown → None)
    pub payments: Option<String>,          // ⇔ memberships.payments (method tag)
    pub created_at: String,                // ⇔ memberships.created_at (UTC RFC 3339)
}

impl Membership {
    /// Dates stay raw in the row; a malformed value reads as `None`.
    pub fn start(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.start_date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.end_date)
    }

    pub fn is_stored_active(&self) -> bool {
        self.status.is_some_and(|s| s.is_active())
    }
}

/// Plan columns joined onto a membership row.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRef {
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipView {
    pub membership: Membership,
    pub plan: Option<PlanRef>,
}

impl MembershipView {
    pub fn plan_name(&self) -> &str {
        self.plan
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("plan not specified")
    }
}

/// Payload of a membership insert (signup or renewal).
#[derive(Debug, Clone)]
pub struct NewMembership {
    pub member_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: MembershipStatus,
    pub payments: PaymentMethod,
}

/// A membership sale as seen by the revenue report.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueRow {
    pub membership_id: i64,
    pub created_at: String,
    pub client_name: String,
    pub plan_name: Option<String>,
    pub price_cents: Option<i64>,
    pub payments: Option<String>,
}
