use crate::cli::commands::open_pool;
use crate::cli::parser::{PlanAddArgs, PlanCommand, PlanEditArgs};
use crate::config::Config;
use crate::core::membership::calendar::{display_date, today};
use crate::core::membership::plan::PlanFamily;
use crate::core::plans::PlanLogic;
use crate::errors::{AppError, AppResult};
use crate::models::plan::{NewPlan, Plan, PlanUpdate};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::formatting::{format_money, parse_amount};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &PlanCommand, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        PlanCommand::Add(args) => {
            let plan = PlanLogic::add(&mut pool, new_plan(args)?)?;
            success(format!(
                "Plan {} ({}) added: {} for {}",
                plan.name,
                plan.code,
                format_money(plan.price_cents, &cfg.currency_symbol),
                duration_label(&plan)
            ));
        }
        PlanCommand::Edit(args) => {
            let plan = PlanLogic::edit(&mut pool, &args.plan, plan_update(args)?)?;
            success(format!("Plan {} ({}) updated", plan.name, plan.code));
        }
        PlanCommand::Delete { plan, yes } => {
            let target = PlanLogic::require(&mut pool, plan)?;
            if !*yes {
                warning("Only plans that were never sold can be deleted.");
                if !confirm(&format!("Delete plan {} ({})?", target.name, target.code))? {
                    info("Nothing deleted.");
                    return Ok(());
                }
            }
            let deleted = PlanLogic::delete(&mut pool, &target.code)?;
            success(format!("Plan {} ({}) deleted.", deleted.name, deleted.code));
        }
        PlanCommand::List { all } => {
            let plans = PlanLogic::list(&mut pool, *all)?;
            if plans.is_empty() {
                info("No plans defined. Add one with `gymdesk plan add`.");
                return Ok(());
            }
            print_plans(&plans, cfg);
        }
    }

    Ok(())
}

/// `None` when the flag is absent, `Some(None)` for `auto`.
fn parse_family(raw: Option<&str>) -> AppResult<Option<Option<PlanFamily>>> {
    let Some(f) = raw else {
        return Ok(None);
    };

    match f.trim().to_lowercase().as_str() {
        "auto" => Ok(Some(None)),
        other => PlanFamily::from_db_str(other)
            .map(|fam| Some(Some(fam)))
            .ok_or_else(|| AppError::InvalidPlanFamily(f.to_string())),
    }
}

fn new_plan(args: &PlanAddArgs) -> AppResult<NewPlan> {
    Ok(NewPlan {
        code: args.code.clone(),
        name: args.name.clone(),
        description: args.description.clone(),
        duration_days: args.days,
        price_cents: parse_amount(&args.price)?,
        family: parse_family(args.family.as_deref())?.flatten(),
        active: !args.inactive,
    })
}

fn plan_update(args: &PlanEditArgs) -> AppResult<PlanUpdate> {
    let active = match (args.activate, args.deactivate) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    Ok(PlanUpdate {
        name: args.name.clone(),
        description: args.description.clone(),
        duration_days: args.days,
        price_cents: args.price.as_deref().map(parse_amount).transpose()?,
        family: parse_family(args.family.as_deref())?,
        active,
    })
}

/// "monthly", "session", "custom (45 days)"...
fn duration_label(plan: &Plan) -> String {
    match plan.family() {
        PlanFamily::Custom => format!("custom ({} days)", plan.duration_days),
        f => f.to_db_str().to_string(),
    }
}

fn print_plans(plans: &[Plan], cfg: &Config) {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("CODE"),
        Column::left("NAME"),
        Column::left("FAMILY"),
        Column::right("PRICE"),
        Column::left("ENDS IF SOLD TODAY"),
        Column::left("STATUS"),
    ]);

    let t = today();
    for p in plans {
        table.add_row(vec![
            p.id.to_string(),
            p.code.clone(),
            p.name.clone(),
            duration_label(p),
            format_money(p.price_cents, &cfg.currency_symbol),
            display_date(p.end_date_from(t)),
            p.status_str().to_string(),
        ]);
    }

    println!("{}", table.render());
}
