use crate::core::membership::calendar::today;
use crate::core::membership::validity::reconcile_latest_on;
use crate::db::log::audit_or_warn;
use crate::db::memberships::mark_expired;
use crate::db::pool::DbPool;
use crate::models::client::ClientWithLatestMembership;
use crate::ui::messages::warning;

/// Lazy `active -> expired` correction for freshly loaded rows.
pub struct ReconcileLogic;

impl ReconcileLogic {
    /// Correct the latest memberships in memory, then persist each
    /// correction. A failed write only warns: the in-memory rows already
    /// carry the date-derived status. Returns how many rows were written.
    pub fn reconcile_loaded(pool: &mut DbPool, clients: &mut [ClientWithLatestMembership]) -> usize {
        let ids = reconcile_latest_on(clients, today());
        Self::persist(pool, &ids)
    }

    pub fn persist(pool: &mut DbPool, ids: &[i64]) -> usize {
        let mut written = 0;

        for id in ids {
            match mark_expired(&pool.conn, *id) {
                Ok(()) => {
                    written += 1;
                    audit_or_warn(
                        &pool.conn,
                        "reconcile",
                        &format!("membership {}", id),
                        "Status corrected to expired",
                    );
                }
                Err(e) => {
                    warning(format!("Could not mark membership {} as expired: {}", id, e));
                }
            }
        }

        written
    }
}
