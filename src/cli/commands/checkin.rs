use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, notice, success};

pub fn handle_checkin(national_id: &str, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let outcome = CheckInLogic::check_in(&mut pool, national_id, &cfg.checkin_source)?;

    notice(
        outcome.decision.notice.severity(),
        outcome.title(),
        outcome.decision.notice.message(),
    );

    if let Some(view) = &outcome.latest {
        info(format!("Plan: {}", view.plan_name()));
    }

    if outcome.attendance_id.is_some() {
        success("Check-in recorded.");
    } else {
        info("Check-in not recorded.");
    }

    Ok(())
}

pub fn handle_checkout(national_id: &str, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match CheckInLogic::check_out(&mut pool, national_id)? {
        Some((client, _)) => success(format!("Goodbye {}, check-out recorded.", client.full_name())),
        None => info("No open check-in from today for this client."),
    }

    Ok(())
}
