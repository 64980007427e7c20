pub mod attendance;
pub mod clients;
pub mod initialize;
pub mod log;
pub mod memberships;
pub mod migrate;
pub mod plans;
pub mod pool;
pub mod stats;

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamps are stored as UTC RFC 3339 with a `Z` suffix, so text order
/// equals chronological order.
pub fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn now_timestamp() -> String {
    timestamp(Utc::now())
}
