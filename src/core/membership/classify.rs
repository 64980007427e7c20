//! Client classification and expiration buckets.

use super::calendar::today;
use super::validity::{days_remaining_on, is_valid_on};
use crate::models::client::{Client, ClientWithLatestMembership};
use crate::models::membership::{Membership, MembershipView};
use crate::models::membership_status::MembershipStatus;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Upper bound (inclusive) of the expiring-soon window, in days.
pub const EXPIRING_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    pub active: Vec<ClientWithLatestMembership>,
    pub inactive: Vec<ClientWithLatestMembership>,
}

/// `is_valid(end) || status == active`, applied literally to the record
/// given. Callers reconcile first when they want stale `active` rows gone.
/// A cancelled membership never counts as active.
pub fn is_active_on(latest: Option<&Membership>, today: NaiveDate) -> bool {
    match latest {
        None => false,
        Some(m) if m.status == Some(MembershipStatus::Cancelled) => false,
        Some(m) => is_valid_on(m.end(), today) || m.is_stored_active(),
    }
}

pub fn classify_on(clients: Vec<ClientWithLatestMembership>, today: NaiveDate) -> Classification {
    let mut out = Classification::default();

    for c in clients {
        let active = is_active_on(c.latest.as_ref().map(|v| &v.membership), today);
        if active {
            out.active.push(c);
        } else {
            out.inactive.push(c);
        }
    }

    out
}

pub fn classify(clients: Vec<ClientWithLatestMembership>) -> Classification {
    classify_on(clients, today())
}

/// One row of the expirations dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ExpirationEntry {
    pub client: Client,
    pub view: MembershipView,
    /// `None` when the end date cannot be read.
    pub days_remaining: Option<i64>,
}

impl ExpirationEntry {
    pub fn badge(&self) -> String {
        match self.days_remaining {
            None => "expired".to_string(),
            Some(0) => "expires today".to_string(),
            Some(1) => "expires tomorrow".to_string(),
            Some(-1) => "expired yesterday".to_string(),
            Some(d) if d < 0 => format!("expired {} days ago", d.abs()),
            Some(d) => format!("expires in {} days", d),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpirationBuckets {
    /// `0..=7` days left, soonest first.
    pub expiring_soon: Vec<ExpirationEntry>,
    /// Past end date (or unreadable), most recently expired first.
    pub expired: Vec<ExpirationEntry>,
}

impl ExpirationBuckets {
    /// Expiring today or tomorrow.
    pub fn critical_count(&self) -> usize {
        self.expiring_soon
            .iter()
            .filter(|e| e.days_remaining.is_some_and(|d| d <= 1))
            .count()
    }

    /// Expiring in 2 or 3 days.
    pub fn warning_count(&self) -> usize {
        self.expiring_soon
            .iter()
            .filter(|e| e.days_remaining.is_some_and(|d| (2..=3).contains(&d)))
            .count()
    }
}

/// Split latest memberships into expiring-soon and expired.
///
/// Clients without a membership and memberships more than
/// [`EXPIRING_SOON_DAYS`] away appear in neither list. Cancelled
/// memberships are left out as well.
pub fn bucket_expirations_on(records: Vec<ClientWithLatestMembership>, today: NaiveDate) -> ExpirationBuckets {
    let mut out = ExpirationBuckets::default();

    for rec in records {
        let Some(view) = rec.latest else {
            continue;
        };

        if view.membership.status == Some(MembershipStatus::Cancelled) {
            continue;
        }

        let days = view.membership.end().map(|end| days_remaining_on(end, today));
        let entry = ExpirationEntry {
            client: rec.client,
            view,
            days_remaining: days,
        };

        match days {
            Some(d) if (0..=EXPIRING_SOON_DAYS).contains(&d) => out.expiring_soon.push(entry),
            Some(d) if d < 0 => out.expired.push(entry),
            None => out.expired.push(entry),
            Some(_) => {}
        }
    }

    out.expiring_soon.sort_by_key(|e| e.days_remaining);
    out.expired
        .sort_by(|a, b| descending_unknown_last(a.days_remaining, b.days_remaining));

    out
}

pub fn bucket_expirations(records: Vec<ClientWithLatestMembership>) -> ExpirationBuckets {
    bucket_expirations_on(records, today())
}

fn descending_unknown_last(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
