use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::expirations::ExpirationsLogic;
use crate::core::membership::calendar::display_date;
use crate::core::membership::classify::{EXPIRING_SOON_DAYS, ExpirationEntry};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{MAGENTA, RESET, YELLOW, color_for_days_remaining, colorize};
use crate::utils::table::{Column, Table};

pub fn handle(limit: Option<usize>, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let dash = ExpirationsLogic::dashboard(&mut pool)?;
    let limit = limit.unwrap_or(cfg.list_limit);

    let b = &dash.buckets;
    println!(
        "Active clients: {} of {}   {}critical (≤1 day): {}{}   {}warning (2–3 days): {}{}\n",
        dash.active_clients,
        dash.total_clients,
        MAGENTA,
        b.critical_count(),
        RESET,
        YELLOW,
        b.warning_count(),
        RESET
    );

    header(format!(
        "EXPIRING WITHIN {} DAYS ({})",
        EXPIRING_SOON_DAYS,
        b.expiring_soon.len()
    ));
    print_entries(&b.expiring_soon, limit);

    header(format!("EXPIRED ({})", b.expired.len()));
    print_entries(&b.expired, limit);

    Ok(())
}

fn print_entries(entries: &[ExpirationEntry], limit: usize) {
    if entries.is_empty() {
        println!("  (none)\n");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("NATIONAL ID"),
        Column::left("NAME"),
        Column::left("PHONE"),
        Column::left("PLAN"),
        Column::left("ENDS"),
        Column::left(""),
    ]);

    for e in entries.iter().take(limit) {
        table.add_row(vec![
            e.client.national_id.clone(),
            e.client.full_name(),
            e.client.phone.clone().unwrap_or_else(|| "--".into()),
            e.view.plan_name().to_string(),
            e.view
                .membership
                .end()
                .map(display_date)
                .unwrap_or_else(|| e.view.membership.end_date.clone()),
            colorize(&e.badge(), color_for_days_remaining(e.days_remaining)),
        ]);
    }

    println!("{}", table.render());

    if entries.len() > limit {
        println!("  … {} more\n", entries.len() - limit);
    }
}
