use crate::core::membership::calendar::{format_calendar_date, parse_calendar_date, today};
use crate::db::clients::insert_client;
use crate::db::log::audit_or_warn;
use crate::db::memberships::insert_membership;
use crate::db::plans::require_active_plan;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::client::NewClient;
use crate::models::membership::NewMembership;
use crate::models::membership_status::MembershipStatus;
use crate::models::payment_method::PaymentMethod;
use chrono::NaiveDate;

/// Membership sold together with the registration.
#[derive(Debug, Clone)]
pub struct InitialMembership {
    pub plan_key: String,
    pub payment: PaymentMethod,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub client_id: i64,
    pub membership_id: Option<i64>,
    pub plan_name: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// High-level business logic for the `client register` command.
pub struct RegisterLogic;

impl RegisterLogic {
    pub fn apply(
        pool: &mut DbPool,
        client: NewClient,
        initial: Option<InitialMembership>,
    ) -> AppResult<Registration> {
        let client = Self::validate(client)?;

        // Client and first membership land together or not at all
        let reg = pool.with_transaction(|tx| {
            let client_id = insert_client(tx, &client)?;

            let Some(initial) = &initial else {
                return Ok(Registration {
                    client_id,
                    membership_id: None,
                    plan_name: None,
                    end_date: None,
                });
            };

            let plan = require_active_plan(tx, &initial.plan_key)?;
            let start = today();
            let end = plan.end_date_from(start);

            let membership_id = insert_membership(
                tx,
                &NewMembership {
                    member_id: client_id,
                    plan_id: plan.id,
                    start_date: start,
                    end_date: end,
                    status: MembershipStatus::Active,
                    payments: initial.payment,
                },
            )?;

            Ok(Registration {
                client_id,
                membership_id: Some(membership_id),
                plan_name: Some(plan.name),
                end_date: Some(end),
            })
        })?;

        let detail = match (&reg.plan_name, reg.end_date) {
            (Some(plan), Some(end)) => format!(
                "Registered {} {} with plan {} until {}",
                client.first_name,
                client.last_name,
                plan,
                format_calendar_date(end)
            ),
            _ => format!("Registered {} {}", client.first_name, client.last_name),
        };
        audit_or_warn(&pool.conn, "register", &client.national_id, &detail);

        Ok(reg)
    }

    /// Required fields present, optional ones trimmed, birth date strict.
    fn validate(mut c: NewClient) -> AppResult<NewClient> {
        c.national_id = required(&c.national_id, "national_id")?;
        c.first_name = required(&c.first_name, "first_name")?;
        c.last_name = required(&c.last_name, "last_name")?;

        c.phone = optional(c.phone);
        c.email = optional(c.email);
        c.emergency_contact = optional(c.emergency_contact);
        c.emergency_phone = optional(c.emergency_phone);
        c.notes = optional(c.notes);
        c.birth_date = validate_birth_date(optional(c.birth_date))?;

        Ok(c)
    }
}

fn required(value: &str, field: &'static str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::MissingField(field));
    }
    Ok(v.to_string())
}

pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn validate_birth_date(value: Option<String>) -> AppResult<Option<String>> {
    match value {
        Some(d) => {
            let parsed = parse_calendar_date(&d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
            Ok(Some(format_calendar_date(parsed)))
        }
        None => Ok(None),
    }
}
