use crate::cli::commands::{open_pool, payment_or_default, validity_cells};
use crate::cli::parser::{ClientCommand, ClientEditArgs, RegisterArgs};
use crate::config::Config;
use crate::core::clients::{ClientDetails, ClientsLogic};
use crate::core::membership::calendar::{display_date, today};
use crate::core::membership::revenue::parse_timestamp;
use crate::core::membership::validity::{EffectiveStatus, effective_status_on};
use crate::core::register::{InitialMembership, RegisterLogic};
use crate::errors::AppResult;
use crate::models::client::{ClientUpdate, ClientWithLatestMembership, NewClient};
use crate::models::payment_method::label_for;
use crate::ui::messages::{header, info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::formatting::{bold, format_money};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &ClientCommand, cfg: &Config) -> AppResult<()> {
    match cmd {
        ClientCommand::Register(args) => register(args, cfg),
        ClientCommand::Edit(args) => edit(args, cfg),
        ClientCommand::Delete { national_id, yes } => delete(national_id, *yes, cfg),
        ClientCommand::List { inactive } => list(*inactive, cfg),
        ClientCommand::Search { terms, limit } => search(&terms.join(" "), *limit, cfg),
        ClientCommand::Show { national_id } => show(national_id, cfg),
    }
}

fn register(args: &RegisterArgs, cfg: &Config) -> AppResult<()> {
    let initial = match &args.plan {
        Some(plan) => Some(InitialMembership {
            plan_key: plan.clone(),
            payment: payment_or_default(args.pay.as_deref(), cfg)?,
        }),
        None => None,
    };

    let client = NewClient {
        national_id: args.national_id.clone(),
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        birth_date: args.birth_date.clone(),
        emergency_contact: args.emergency_contact.clone(),
        emergency_phone: args.emergency_phone.clone(),
        notes: args.notes.clone(),
    };

    let mut pool = open_pool(cfg)?;
    let reg = RegisterLogic::apply(&mut pool, client, initial)?;

    success(format!(
        "Client {} {} registered (id {}).",
        args.first_name.trim(),
        args.last_name.trim(),
        reg.client_id
    ));
    if let (Some(plan), Some(end)) = (&reg.plan_name, reg.end_date) {
        success(format!("Membership {} active until {}.", plan, display_date(end)));
    }

    Ok(())
}

fn edit(args: &ClientEditArgs, cfg: &Config) -> AppResult<()> {
    let upd = ClientUpdate {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        phone: args.phone.clone(),
        email: args.email.clone(),
        birth_date: args.birth_date.clone(),
        emergency_contact: args.emergency_contact.clone(),
        emergency_phone: args.emergency_phone.clone(),
        notes: args.notes.clone(),
    };

    let mut pool = open_pool(cfg)?;
    let client = ClientsLogic::edit(&mut pool, &args.national_id, upd)?;
    success(format!("Client {} updated.", client.full_name()));
    Ok(())
}

fn delete(national_id: &str, yes: bool, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    if !yes {
        warning("Deleting a client also deletes their memberships and check-ins.");
        if !confirm(&format!("Delete client {}?", national_id.trim()))? {
            info("Nothing deleted.");
            return Ok(());
        }
    }

    let client = ClientsLogic::delete(&mut pool, national_id)?;
    success(format!("Client {} deleted.", client.full_name()));
    Ok(())
}

fn list(only_inactive: bool, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let classes = ClientsLogic::list(&mut pool)?;

    if !only_inactive {
        header(format!("ACTIVE CLIENTS ({})", classes.active.len()));
        print_clients(&classes.active);
    }

    header(format!("INACTIVE CLIENTS ({})", classes.inactive.len()));
    print_clients(&classes.inactive);

    Ok(())
}

fn search(term: &str, limit: Option<usize>, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let found = ClientsLogic::search(&mut pool, term, limit.unwrap_or(cfg.list_limit))?;

    if found.is_empty() {
        info(format!("No clients match '{}'.", term.trim()));
        return Ok(());
    }

    header(format!("SEARCH RESULTS ({})", found.len()));
    print_clients(&found);
    Ok(())
}

fn print_clients(clients: &[ClientWithLatestMembership]) {
    if clients.is_empty() {
        println!("  (none)\n");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("NATIONAL ID"),
        Column::left("NAME"),
        Column::left("PHONE"),
        Column::left("PLAN"),
        Column::left("ENDS"),
        Column::right("DAYS"),
    ]);

    for c in clients {
        let (ends, days) = validity_cells(c.latest.as_ref());
        table.add_row(vec![
            c.client.national_id.clone(),
            c.client.full_name(),
            c.client.phone.clone().unwrap_or_else(|| "--".into()),
            c.latest
                .as_ref()
                .map(|v| v.plan_name().to_string())
                .unwrap_or_else(|| "no membership".into()),
            ends,
            days,
        ]);
    }

    println!("{}", table.render());
}

fn show(national_id: &str, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let details = ClientsLogic::show(&mut pool, national_id, cfg.list_limit)?;
    print_details(&details, cfg);
    Ok(())
}

fn print_details(d: &ClientDetails, cfg: &Config) {
    let c = &d.record.client;
    let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "--".into());

    header(c.full_name());
    println!("{} {}", bold("National id:"), c.national_id);
    println!("{} {}", bold("Phone:      "), dash(&c.phone));
    println!("{} {}", bold("Email:      "), dash(&c.email));
    println!("{} {}", bold("Birth date: "), dash(&c.birth_date));
    println!(
        "{} {} {}",
        bold("Emergency:  "),
        dash(&c.emergency_contact),
        dash(&c.emergency_phone)
    );
    if let Some(notes) = &c.notes {
        println!("{} {}", bold("Notes:      "), notes);
    }
    println!();

    match &d.record.latest {
        None => warning("No membership registered."),
        Some(view) => {
            let status = match effective_status_on(&view.membership, today()) {
                EffectiveStatus::Active => "active",
                EffectiveStatus::Expired => "expired",
                EffectiveStatus::Cancelled => "cancelled",
            };
            let (ends, days) = validity_cells(Some(view));
            println!("{} {}", bold("Plan:       "), view.plan_name());
            println!("{} {}", bold("Status:     "), status);
            println!("{} {}", bold("Ends:       "), ends);
            println!("{} {}", bold("Days left:  "), days);
        }
    }
    println!();

    if !d.history.is_empty() {
        let mut table = Table::new(vec![
            Column::left("SOLD"),
            Column::left("PLAN"),
            Column::left("START"),
            Column::left("END"),
            Column::left("STATUS"),
            Column::left("PAYMENT"),
            Column::right("PRICE"),
        ]);
        for v in &d.history {
            let m = &v.membership;
            table.add_row(vec![
                parse_timestamp(&m.created_at)
                    .map(|ts| display_date(ts.date_naive()))
                    .unwrap_or_else(|| m.created_at.clone()),
                v.plan_name().to_string(),
                m.start().map(display_date).unwrap_or_else(|| m.start_date.clone()),
                m.end().map(display_date).unwrap_or_else(|| m.end_date.clone()),
                m.status.map(|s| s.to_db_str()).unwrap_or("--").to_string(),
                label_for(m.payments.as_deref()).to_string(),
                v.plan
                    .as_ref()
                    .map(|p| format_money(p.price_cents, &cfg.currency_symbol))
                    .unwrap_or_else(|| "--".into()),
            ]);
        }
        println!("{}", bold("Membership history"));
        println!("{}", table.render());
    }

    if !d.recent_attendance.is_empty() {
        println!("{}", bold("Recent check-ins"));
        for a in &d.recent_attendance {
            let when = parse_timestamp(&a.checked_in_at)
                .map(|ts| ts.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_else(|| a.checked_in_at.clone());
            let out = a
                .checked_out_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| ts.format("%H:%M").to_string())
                .unwrap_or_else(|| "--".into());
            println!("  {} → {}", when, out);
        }
        println!();
    }
}
