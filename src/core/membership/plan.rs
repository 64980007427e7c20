//! Plan duration resolver: the single place that turns a plan into an end date.

use super::calendar::{add_calendar_months, add_days};
use chrono::NaiveDate;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Days granted when a custom plan carries no usable `duration_days`.
pub const DEFAULT_DURATION_DAYS: i64 = 30;

/// Duration family of a membership plan.
///
/// Plans may store their family explicitly; older rows only have a free-text
/// name, in which case [`PlanFamily::from_name`] infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanFamily {
    /// Mensual / Familiar: one calendar month.
    Monthly,
    /// Quincenal: 14 days.
    Biweekly,
    /// Semanal: 7 days.
    Weekly,
    /// Sesion: valid on the start day only.
    Session,
    /// Anything else: `duration_days`, or 30 days.
    Custom,
}

impl PlanFamily {
    /// Infer the family from a plan name, first match wins.
    pub fn from_name(name: &str) -> Self {
        let n = normalize_name(name);

        if n.contains("mensual") || n.contains("familiar") {
            PlanFamily::Monthly
        } else if n.contains("quincenal") {
            PlanFamily::Biweekly
        } else if n.contains("semanal") {
            PlanFamily::Weekly
        } else if n.contains("sesion") {
            PlanFamily::Session
        } else {
            PlanFamily::Custom
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlanFamily::Monthly => "monthly",
            PlanFamily::Biweekly => "biweekly",
            PlanFamily::Weekly => "weekly",
            PlanFamily::Session => "session",
            PlanFamily::Custom => "custom",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(PlanFamily::Monthly),
            "biweekly" => Some(PlanFamily::Biweekly),
            "weekly" => Some(PlanFamily::Weekly),
            "session" => Some(PlanFamily::Session),
            "custom" => Some(PlanFamily::Custom),
            _ => None,
        }
    }

    /// End date of a term of this family starting on `start` (inclusive).
    pub fn end_date(&self, start: NaiveDate, fallback_duration_days: Option<i64>) -> NaiveDate {
        match self {
            PlanFamily::Monthly => add_calendar_months(start, 1),
            PlanFamily::Biweekly => add_days(start, 14),
            PlanFamily::Weekly => add_days(start, 7),
            PlanFamily::Session => start,
            PlanFamily::Custom => match fallback_duration_days {
                Some(days) if days > 0 => add_days(start, days),
                _ => add_days(start, DEFAULT_DURATION_DAYS),
            },
        }
    }
}

/// Lowercase and strip diacritics ("Sesión" -> "sesion").
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// End date for a plan known only by name, with an optional
/// `duration_days` fallback for names outside the known families.
pub fn compute_end_date(
    start: NaiveDate,
    plan_name: &str,
    fallback_duration_days: Option<i64>,
) -> NaiveDate {
    PlanFamily::from_name(plan_name).end_date(start, fallback_duration_days)
}
