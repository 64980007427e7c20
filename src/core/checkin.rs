use crate::core::membership::calendar::today;
use crate::core::membership::revenue::{local_day_window, parse_timestamp};
use crate::core::membership::validity::{
    CheckInDecision, Reconciliation, apply_reconciliation, check_in_decision_on,
};
use crate::core::reconcile::ReconcileLogic;
use crate::db::attendance::{close_attendance, insert_attendance, latest_open};
use crate::db::clients::require_by_national_id;
use crate::db::log::audit_or_warn;
use crate::db::memberships::latest_for_client;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::attendance::Attendance;
use crate::models::client::Client;
use crate::models::membership::MembershipView;

#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub client: Client,
    pub latest: Option<MembershipView>,
    pub decision: CheckInDecision,
    /// Row written when the check-in was allowed.
    pub attendance_id: Option<i64>,
}

impl CheckInOutcome {
    /// Greeting shown above the notice.
    pub fn title(&self) -> String {
        if self.decision.allowed {
            format!("Welcome {}", self.client.full_name())
        } else {
            format!("Hello {}", self.client.full_name())
        }
    }
}

/// Front-desk check-in and check-out.
pub struct CheckInLogic;

impl CheckInLogic {
    pub fn check_in(pool: &mut DbPool, national_id: &str, source: &str) -> AppResult<CheckInOutcome> {
        let client = require_by_national_id(&pool.conn, national_id)?;
        let mut latest = latest_for_client(&pool.conn, client.id)?;
        let today = today();

        if let Some(view) = latest.as_mut()
            && let Reconciliation::CorrectedToExpired { membership_id } =
                apply_reconciliation(&mut view.membership, today)
        {
            ReconcileLogic::persist(pool, &[membership_id]);
        }

        let decision = check_in_decision_on(latest.as_ref().map(|v| &v.membership), today);

        let attendance_id = if decision.allowed {
            let id = insert_attendance(&pool.conn, client.id, source)?;
            audit_or_warn(
                &pool.conn,
                "checkin",
                &client.national_id,
                &format!("Check-in of {} ({})", client.full_name(), source),
            );
            Some(id)
        } else {
            None
        };

        Ok(CheckInOutcome {
            client,
            latest,
            decision,
            attendance_id,
        })
    }

    /// Close the client's open check-in from today. `None` when there is
    /// nothing to close.
    pub fn check_out(pool: &mut DbPool, national_id: &str) -> AppResult<Option<(Client, Attendance)>> {
        let client = require_by_national_id(&pool.conn, national_id)?;

        let Some(open) = latest_open(&pool.conn, client.id)? else {
            return Ok(None);
        };

        let t = today();
        let from_today = match (parse_timestamp(&open.checked_in_at), local_day_window(t, t)) {
            (Some(ts), Some((from, to))) => ts >= from && ts < to,
            _ => false,
        };
        if !from_today {
            return Ok(None);
        }

        close_attendance(&pool.conn, open.id)?;
        audit_or_warn(
            &pool.conn,
            "checkout",
            &client.national_id,
            &format!("Check-out of {}", client.full_name()),
        );

        Ok(Some((client, open)))
    }
}
