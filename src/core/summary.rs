use crate::core::expirations::ExpirationsLogic;
use crate::core::membership::calendar::today;
use crate::core::membership::revenue::local_day_window;
use crate::core::report::ReportLogic;
use crate::db::attendance::count_between;
use crate::db::pool::DbPool;
use crate::db::timestamp;
use crate::errors::AppResult;
use crate::utils::date::current_month;
use chrono::Utc;

/// Front-desk dashboard figures.
#[derive(Debug, Clone, Default)]
pub struct FrontDeskSummary {
    pub total_clients: usize,
    pub active_clients: usize,
    pub month_revenue_cents: i64,
    pub expiring_soon: usize,
    pub checkins_today: i64,
}

pub struct SummaryLogic;

impl SummaryLogic {
    pub fn build(pool: &mut DbPool) -> AppResult<FrontDeskSummary> {
        let dashboard = ExpirationsLogic::dashboard(pool)?;

        let (first, last) = current_month();
        let revenue = ReportLogic::revenue(pool, first, last)?;

        let t = today();
        let checkins_today = match local_day_window(t, t) {
            Some((from, to)) => count_between(
                &pool.conn,
                &timestamp(from.with_timezone(&Utc)),
                &timestamp(to.with_timezone(&Utc)),
            )?,
            None => 0,
        };

        Ok(FrontDeskSummary {
            total_clients: dashboard.total_clients,
            active_clients: dashboard.active_clients,
            month_revenue_cents: revenue.total,
            expiring_soon: dashboard.buckets.expiring_soon.len(),
            checkins_today,
        })
    }
}
