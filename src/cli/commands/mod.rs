pub mod checkin;
pub mod client;
pub mod config;
pub mod db;
pub mod expirations;
pub mod init;
pub mod log;
pub mod plan;
pub mod renew;
pub mod report;
pub mod summary;

use crate::config::Config;
use crate::core::membership::calendar::{display_date, today};
use crate::core::membership::validity::days_remaining_on;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::membership::MembershipView;
use crate::models::payment_method::PaymentMethod;
use crate::utils::colors::{color_for_days_remaining, colorize};
use std::path::Path;

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(AppError::Config(format!(
            "database not found: {} (run `gymdesk init`)",
            cfg.database
        )));
    }

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// `--pay` value, or the configured default.
pub(crate) fn payment_or_default(pay: Option<&str>, cfg: &Config) -> AppResult<PaymentMethod> {
    match pay {
        Some(p) => PaymentMethod::from_code(p).ok_or_else(|| AppError::InvalidPaymentMethod(p.to_string())),
        None => cfg.default_payment(),
    }
}

/// End date and colored days-remaining cells of a latest membership.
pub(crate) fn validity_cells(view: Option<&MembershipView>) -> (String, String) {
    let Some(view) = view else {
        return ("--".to_string(), colorize("--", ""));
    };

    match view.membership.end() {
        Some(end) => {
            let days = days_remaining_on(end, today());
            (
                display_date(end),
                colorize(&days.to_string(), color_for_days_remaining(Some(days))),
            )
        }
        None => (
            view.membership.end_date.clone(),
            colorize("invalid", color_for_days_remaining(None)),
        ),
    }
}
