use serde::Serialize;

/// Stored `memberships.status` value.
///
/// Only a hint: `end_date` is the ground truth and the engine lazily
/// corrects `Active` rows whose end date has passed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MembershipStatus {
    Active,
    Expired,
    Cancelled,
}

impl MembershipStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expired => "expired",
            MembershipStatus::Cancelled => "cancelled",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(MembershipStatus::Active),
            "expired" => Some(MembershipStatus::Expired),
            "cancelled" => Some(MembershipStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, MembershipStatus::Active)
    }
}
