use crate::core::membership::plan::PlanFamily;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: i64,
    pub price_cents: i64,
    pub family: Option<PlanFamily>, // ⇔ membership_plans.family (NULL = infer from name)
    pub active: bool,               // ⇔ membership_plans.status ('active' | 'inactive')
}

impl Plan {
    /// Explicit family if stored, otherwise inferred from the name.
    pub fn family(&self) -> PlanFamily {
        self.family
            .unwrap_or_else(|| PlanFamily::from_name(&self.name))
    }

    pub fn end_date_from(&self, start: NaiveDate) -> NaiveDate {
        self.family().end_date(start, Some(self.duration_days))
    }

    pub fn status_str(&self) -> &'static str {
        if self.active { "active" } else { "inactive" }
    }
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_days: i64,
    pub price_cents: i64,
    pub family: Option<PlanFamily>,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i64>,
    pub price_cents: Option<i64>,
    /// `Some(None)` clears the family back to name inference.
    pub family: Option<Option<PlanFamily>>,
    pub active: Option<bool>,
}
