use crate::cli::commands::{open_pool, payment_or_default};
use crate::config::Config;
use crate::core::membership::calendar::display_date;
use crate::core::renew::RenewLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_money;

pub fn handle(national_id: &str, plan: &str, pay: Option<&str>, cfg: &Config) -> AppResult<()> {
    let payment = payment_or_default(pay, cfg)?;
    let mut pool = open_pool(cfg)?;

    let r = RenewLogic::apply(&mut pool, national_id, plan, payment)?;

    success(format!(
        "Membership renewed for {}: {} from {} to {} ({}, {})",
        r.client.full_name(),
        r.plan.name,
        display_date(r.start),
        display_date(r.end),
        format_money(r.plan.price_cents, &cfg.currency_symbol),
        r.payment.label()
    ));

    Ok(())
}
