use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::membership::calendar::{display_date, today};
use crate::core::membership::classify::EXPIRING_SOON_DAYS;
use crate::core::summary::SummaryLogic;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::formatting::format_money;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let s = SummaryLogic::build(&mut pool)?;

    header(format!("FRONT DESK {}", display_date(today())));

    println!(
        "{}• Active clients:{} {}{}{} of {}",
        CYAN, RESET, GREEN, s.active_clients, RESET, s.total_clients
    );
    println!(
        "{}• Revenue this month:{} {}",
        CYAN,
        RESET,
        format_money(s.month_revenue_cents, &cfg.currency_symbol)
    );
    println!(
        "{}• Expiring in {} days:{} {}{}{}",
        CYAN, EXPIRING_SOON_DAYS, RESET, YELLOW, s.expiring_soon, RESET
    );
    println!("{}• Check-ins today:{} {}", CYAN, RESET, s.checkins_today);
    println!();

    Ok(())
}
