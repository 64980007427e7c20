use crate::core::membership::revenue::{RevenueSummary, aggregate_revenue};
use crate::db::memberships::load_revenue_rows;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::NaiveDate;

pub struct ReportLogic;

impl ReportLogic {
    /// Sales created within `[start, end]`, whole local days.
    pub fn revenue(pool: &mut DbPool, start: NaiveDate, end: NaiveDate) -> AppResult<RevenueSummary> {
        let rows = load_revenue_rows(&pool.conn)?;
        Ok(aggregate_revenue(rows, start, end))
    }
}
