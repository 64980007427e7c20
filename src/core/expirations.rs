use crate::core::clients::ClientsLogic;
use crate::core::membership::calendar::today;
use crate::core::membership::classify::{ExpirationBuckets, bucket_expirations_on, is_active_on};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

#[derive(Debug, Clone)]
pub struct ExpirationsDashboard {
    pub buckets: ExpirationBuckets,
    pub total_clients: usize,
    pub active_clients: usize,
}

pub struct ExpirationsLogic;

impl ExpirationsLogic {
    pub fn dashboard(pool: &mut DbPool) -> AppResult<ExpirationsDashboard> {
        let clients = ClientsLogic::load_reconciled(pool)?;
        let today = today();

        let total_clients = clients.len();
        let active_clients = clients
            .iter()
            .filter(|c| is_active_on(c.latest.as_ref().map(|v| &v.membership), today))
            .count();

        Ok(ExpirationsDashboard {
            buckets: bucket_expirations_on(clients, today),
            total_clients,
            active_clients,
        })
    }
}
