use crate::cli::commands::open_pool;
use crate::config::Config;
use crate::core::membership::calendar::display_date;
use crate::core::membership::revenue::{RevenueSummary, parse_timestamp};
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::models::payment_method::{PaymentMethod, label_for};
use crate::ui::messages::{header, info};
use crate::utils::date::{current_month, parse_range};
use crate::utils::formatting::{bold, format_money};
use crate::utils::table::{Column, Table};

pub fn handle(
    range: Option<&str>,
    export: Option<&str>,
    format: ExportFormat,
    force: bool,
    cfg: &Config,
) -> AppResult<()> {
    let (start, end) = match range {
        Some(r) => parse_range(r)?,
        None => current_month(),
    };

    let mut pool = open_pool(cfg)?;
    let summary = ReportLogic::revenue(&mut pool, start, end)?;

    header(format!("REVENUE {} → {}", display_date(start), display_date(end)));
    print_summary(&summary, cfg);

    if let Some(file) = export {
        ExportLogic::export_report(&mut pool, &summary, start, end, format, file, force)?;
    }

    Ok(())
}

fn print_summary(s: &RevenueSummary, cfg: &Config) {
    let money = |c: i64| format_money(c, &cfg.currency_symbol);

    if s.rows.is_empty() {
        info("No sales in this period.");
    } else {
        let mut table = Table::new(vec![
            Column::left("DATE"),
            Column::left("CLIENT"),
            Column::left("PLAN"),
            Column::left("PAYMENT"),
            Column::right("AMOUNT"),
        ]);

        for r in &s.rows {
            table.add_row(vec![
                parse_timestamp(&r.created_at)
                    .map(|ts| display_date(ts.date_naive()))
                    .unwrap_or_else(|| r.created_at.clone()),
                r.client_name.clone(),
                r.plan_name.clone().unwrap_or_else(|| "N/A".into()),
                label_for(r.payments.as_deref()).to_string(),
                money(r.price_cents.unwrap_or(0)),
            ]);
        }

        println!("{}", table.render());
    }

    let mut totals = Table::new(vec![Column::left("METHOD"), Column::right("TOTAL")]);
    for m in PaymentMethod::ALL {
        totals.add_row(vec![m.label().to_string(), money(s.by_method(m))]);
    }
    if s.other != 0 {
        totals.add_row(vec!["N/A".to_string(), money(s.other)]);
    }

    println!("{}", totals.render());
    println!("{} {}\n", bold("Total:"), money(s.total));
}
