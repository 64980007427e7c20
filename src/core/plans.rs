use crate::db::log::audit_or_warn;
use crate::db::plans::{
    delete_plan, find_plan, find_plan_by_code, find_plan_by_id, insert_plan, list_plans,
    update_plan,
};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::plan::{NewPlan, Plan, PlanUpdate};

/// Longest term a plan may sell (ten years).
pub const MAX_DURATION_DAYS: i64 = 3650;

pub struct PlanLogic;

impl PlanLogic {
    pub fn add(pool: &mut DbPool, mut plan: NewPlan) -> AppResult<Plan> {
        plan.code = plan.code.trim().to_string();
        plan.name = plan.name.trim().to_string();

        if plan.code.is_empty() {
            return Err(AppError::MissingField("code"));
        }
        if plan.name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        check_duration(plan.duration_days)?;
        if plan.price_cents < 0 {
            return Err(AppError::InvalidAmount("price must not be negative".into()));
        }
        if find_plan_by_code(&pool.conn, &plan.code)?.is_some() {
            return Err(AppError::DuplicatePlanCode(plan.code));
        }

        let id = insert_plan(&pool.conn, &plan)?;
        audit_or_warn(
            &pool.conn,
            "plan_add",
            &plan.code,
            &format!("Added plan {} ({})", plan.name, plan.code),
        );

        Self::reload(pool, id)
    }

    pub fn edit(pool: &mut DbPool, key: &str, upd: PlanUpdate) -> AppResult<Plan> {
        let plan = Self::require(pool, key)?;

        if let Some(d) = upd.duration_days {
            check_duration(d)?;
        }
        if let Some(p) = upd.price_cents
            && p < 0
        {
            return Err(AppError::InvalidAmount("price must not be negative".into()));
        }

        update_plan(&pool.conn, plan.id, &upd)?;
        audit_or_warn(&pool.conn, "plan_edit", &plan.code, "Plan updated");

        Self::reload(pool, plan.id)
    }

    /// Remove a plan nobody ever bought. Sold plans can only be deactivated.
    pub fn delete(pool: &mut DbPool, key: &str) -> AppResult<Plan> {
        let plan = Self::require(pool, key)?;
        delete_plan(&pool.conn, &plan)?;
        audit_or_warn(
            &pool.conn,
            "plan_delete",
            &plan.code,
            &format!("Deleted plan {} ({})", plan.name, plan.code),
        );
        Ok(plan)
    }

    pub fn list(pool: &mut DbPool, include_inactive: bool) -> AppResult<Vec<Plan>> {
        list_plans(&pool.conn, !include_inactive)
    }

    pub fn require(pool: &mut DbPool, key: &str) -> AppResult<Plan> {
        find_plan(&pool.conn, key)?.ok_or_else(|| AppError::PlanNotFound(key.to_string()))
    }

    fn reload(pool: &mut DbPool, id: i64) -> AppResult<Plan> {
        find_plan_by_id(&pool.conn, id)?.ok_or_else(|| AppError::PlanNotFound(id.to_string()))
    }
}

fn check_duration(days: i64) -> AppResult<()> {
    if !(0..=MAX_DURATION_DAYS).contains(&days) {
        return Err(AppError::InvalidAmount(format!(
            "duration must be between 0 and {} days ({})",
            MAX_DURATION_DAYS, days
        )));
    }
    Ok(())
}
