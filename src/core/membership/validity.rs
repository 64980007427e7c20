//! Validity & status engine.
//!
//! `end_date` is ground truth, `status` is a cached hint. A membership is
//! valid through its last day inclusive; missing or malformed end dates fail
//! closed (never valid, always expired).

use super::calendar::{days_between, display_date, today};
use crate::models::client::ClientWithLatestMembership;
use crate::models::membership::Membership;
use crate::models::membership_status::MembershipStatus;
use chrono::NaiveDate;
use serde::Serialize;

pub fn is_valid_on(end: Option<NaiveDate>, today: NaiveDate) -> bool {
    matches!(end, Some(e) if today <= e)
}

pub fn is_expired_by_date_on(end: Option<NaiveDate>, today: NaiveDate) -> bool {
    !is_valid_on(end, today)
}

/// `end - today`; negative values are days past expiry.
pub fn days_remaining_on(end: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, end)
}

pub fn is_valid(end: Option<NaiveDate>) -> bool {
    is_valid_on(end, today())
}

pub fn is_expired_by_date(end: Option<NaiveDate>) -> bool {
    is_expired_by_date_on(end, today())
}

pub fn days_remaining(end: NaiveDate) -> i64 {
    days_remaining_on(end, today())
}

/// Status derived from the record, regardless of what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectiveStatus {
    Active,
    Expired,
    Cancelled,
}

pub fn effective_status_on(m: &Membership, today: NaiveDate) -> EffectiveStatus {
    if m.status == Some(MembershipStatus::Cancelled) {
        EffectiveStatus::Cancelled
    } else if is_valid_on(m.end(), today) {
        EffectiveStatus::Active
    } else {
        EffectiveStatus::Expired
    }
}

/// Outcome of the lazy `active -> expired` correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Noop,
    /// Caller should persist `status = 'expired'` for this row.
    CorrectedToExpired { membership_id: i64 },
}

/// Decide whether the stored status needs correcting.
///
/// Fires for lapsed rows whose status is neither `expired` nor `cancelled`
/// (a NULL status counts as stale). Idempotent: a second call on the same
/// lapsed row yields the same target state.
pub fn reconcile_status_on(m: &Membership, today: NaiveDate) -> Reconciliation {
    let already_final = matches!(
        m.status,
        Some(MembershipStatus::Expired) | Some(MembershipStatus::Cancelled)
    );

    if !already_final && is_expired_by_date_on(m.end(), today) {
        Reconciliation::CorrectedToExpired {
            membership_id: m.id,
        }
    } else {
        Reconciliation::Noop
    }
}

pub fn reconcile_status(m: &Membership) -> Reconciliation {
    reconcile_status_on(m, today())
}

/// Reconcile in memory as well: the returned instruction is for the store,
/// the record itself already reflects date-derived truth whether or not the
/// write later succeeds.
pub fn apply_reconciliation(m: &mut Membership, today: NaiveDate) -> Reconciliation {
    let outcome = reconcile_status_on(m, today);
    if let Reconciliation::CorrectedToExpired { .. } = outcome {
        m.status = Some(MembershipStatus::Expired);
    }
    outcome
}

/// Reconcile the latest membership of every client; returns the ids that
/// must be written as `expired`.
pub fn reconcile_latest_on(clients: &mut [ClientWithLatestMembership], today: NaiveDate) -> Vec<i64> {
    clients
        .iter_mut()
        .filter_map(|c| c.latest.as_mut())
        .filter_map(|view| match apply_reconciliation(&mut view.membership, today) {
            Reconciliation::CorrectedToExpired { membership_id } => Some(membership_id),
            Reconciliation::Noop => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Feedback shown at the front desk after a check-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckInNotice {
    NoMembership,
    InvalidEndDate,
    Cancelled,
    Expired { end: NaiveDate },
    ExpiresToday { end: NaiveDate },
    ExpiresTomorrow { end: NaiveDate },
    ExpiresSoon { days: i64, end: NaiveDate },
    Active { end: NaiveDate },
}

impl CheckInNotice {
    /// Tier by days remaining: <0 expired, 0 today, 1 tomorrow, 2..=3 soon.
    pub fn for_days_remaining(days: i64, end: NaiveDate) -> Self {
        match days {
            d if d < 0 => CheckInNotice::Expired { end },
            0 => CheckInNotice::ExpiresToday { end },
            1 => CheckInNotice::ExpiresTomorrow { end },
            2..=3 => CheckInNotice::ExpiresSoon { days, end },
            _ => CheckInNotice::Active { end },
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CheckInNotice::NoMembership
            | CheckInNotice::InvalidEndDate
            | CheckInNotice::Cancelled
            | CheckInNotice::Expired { .. } => Severity::Error,
            CheckInNotice::ExpiresToday { .. }
            | CheckInNotice::ExpiresTomorrow { .. }
            | CheckInNotice::ExpiresSoon { .. } => Severity::Warning,
            CheckInNotice::Active { .. } => Severity::Success,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CheckInNotice::NoMembership => "No membership registered for this client.".to_string(),
            CheckInNotice::InvalidEndDate => {
                "The membership has no valid expiration date.".to_string()
            }
            CheckInNotice::Cancelled => "The membership has been cancelled.".to_string(),
            CheckInNotice::Expired { end } => format!(
                "Membership expired ({}), please renew to get access.",
                display_date(*end)
            ),
            CheckInNotice::ExpiresToday { end } => {
                format!("Membership expires today ({}).", display_date(*end))
            }
            CheckInNotice::ExpiresTomorrow { end } => {
                format!("Membership expires tomorrow ({}).", display_date(*end))
            }
            CheckInNotice::ExpiresSoon { days, end } => format!(
                "Membership expires in {} days ({}).",
                days,
                display_date(*end)
            ),
            CheckInNotice::Active { end } => {
                format!("Membership active, expires on {}.", display_date(*end))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInDecision {
    pub allowed: bool,
    pub notice: CheckInNotice,
    pub days_remaining: Option<i64>,
}

/// Check-in permission for a client's latest membership.
///
/// Allowed when `is_valid(end) || status == active`, the OR tolerating a
/// status not yet corrected. Denied outright with no membership, a malformed
/// end date, a cancelled membership, or a negative day count.
pub fn check_in_decision_on(latest: Option<&Membership>, today: NaiveDate) -> CheckInDecision {
    let Some(m) = latest else {
        return CheckInDecision {
            allowed: false,
            notice: CheckInNotice::NoMembership,
            days_remaining: None,
        };
    };

    let Some(end) = m.end() else {
        return CheckInDecision {
            allowed: false,
            notice: CheckInNotice::InvalidEndDate,
            days_remaining: None,
        };
    };

    let days = days_remaining_on(end, today);

    if m.status == Some(MembershipStatus::Cancelled) {
        return CheckInDecision {
            allowed: false,
            notice: CheckInNotice::Cancelled,
            days_remaining: Some(days),
        };
    }

    let notice = CheckInNotice::for_days_remaining(days, end);
    let permitted = is_valid_on(Some(end), today) || m.is_stored_active();

    CheckInDecision {
        allowed: permitted && days >= 0,
        notice,
        days_remaining: Some(days),
    }
}

pub fn check_in_decision(latest: Option<&Membership>) -> CheckInDecision {
    check_in_decision_on(latest, today())
}
