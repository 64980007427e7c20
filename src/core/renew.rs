use crate::core::membership::calendar::{format_calendar_date, today};
use crate::db::clients::require_by_national_id;
use crate::db::log::audit_or_warn;
use crate::db::memberships::insert_membership;
use crate::db::plans::require_active_plan;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::client::Client;
use crate::models::membership::NewMembership;
use crate::models::membership_status::MembershipStatus;
use crate::models::payment_method::PaymentMethod;
use crate::models::plan::Plan;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Renewal {
    pub client: Client,
    pub plan: Plan,
    pub membership_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub payment: PaymentMethod,
}

pub struct RenewLogic;

impl RenewLogic {
    /// Sell a new term starting today. Older rows are left alone: the new
    /// row becomes the latest by `created_at`.
    pub fn apply(
        pool: &mut DbPool,
        national_id: &str,
        plan_key: &str,
        payment: PaymentMethod,
    ) -> AppResult<Renewal> {
        let client = require_by_national_id(&pool.conn, national_id)?;
        let plan = require_active_plan(&pool.conn, plan_key)?;

        let start = today();
        let end = plan.end_date_from(start);

        let membership_id = insert_membership(
            &pool.conn,
            &NewMembership {
                member_id: client.id,
                plan_id: plan.id,
                start_date: start,
                end_date: end,
                status: MembershipStatus::Active,
                payments: payment,
            },
        )?;

        audit_or_warn(
            &pool.conn,
            "renew",
            &client.national_id,
            &format!(
                "Plan {} until {} paid by {}",
                plan.name,
                format_calendar_date(end),
                payment.label()
            ),
        );

        Ok(Renewal {
            client,
            plan,
            membership_id,
            start,
            end,
            payment,
        })
    }
}
