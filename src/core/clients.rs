use crate::core::membership::classify::{Classification, classify};
use crate::core::reconcile::ReconcileLogic;
use crate::core::register::{optional, validate_birth_date};
use crate::db::attendance::recent_for_client;
use crate::db::clients::{
    delete_client, load_client_with_latest, load_clients_with_latest, require_by_national_id,
    search_clients, update_client,
};
use crate::db::log::audit_or_warn;
use crate::db::memberships::history_for_client;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::Attendance;
use crate::models::client::{Client, ClientUpdate, ClientWithLatestMembership};
use crate::models::membership::MembershipView;

/// Everything `client show` prints.
#[derive(Debug, Clone)]
pub struct ClientDetails {
    pub record: ClientWithLatestMembership,
    pub history: Vec<MembershipView>,
    pub recent_attendance: Vec<Attendance>,
}

pub struct ClientsLogic;

impl ClientsLogic {
    /// All clients with their latest membership, already reconciled.
    pub fn load_reconciled(pool: &mut DbPool) -> AppResult<Vec<ClientWithLatestMembership>> {
        let mut clients = load_clients_with_latest(&pool.conn)?;
        ReconcileLogic::reconcile_loaded(pool, &mut clients);
        Ok(clients)
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Classification> {
        let clients = Self::load_reconciled(pool)?;
        Ok(classify(clients))
    }

    pub fn search(
        pool: &mut DbPool,
        term: &str,
        limit: usize,
    ) -> AppResult<Vec<ClientWithLatestMembership>> {
        if term.trim().is_empty() {
            return Err(AppError::EmptySearch);
        }

        let mut found = search_clients(&pool.conn, term, limit)?;
        ReconcileLogic::reconcile_loaded(pool, &mut found);
        Ok(found)
    }

    pub fn show(pool: &mut DbPool, national_id: &str, attendance_limit: usize) -> AppResult<ClientDetails> {
        let mut record = load_client_with_latest(&pool.conn, national_id)?
            .ok_or_else(|| AppError::ClientNotFound(national_id.trim().to_string()))?;
        ReconcileLogic::reconcile_loaded(pool, std::slice::from_mut(&mut record));

        let history = history_for_client(&pool.conn, record.client.id)?;
        let recent_attendance = recent_for_client(&pool.conn, record.client.id, attendance_limit)?;

        Ok(ClientDetails {
            record,
            history,
            recent_attendance,
        })
    }

    pub fn edit(pool: &mut DbPool, national_id: &str, upd: ClientUpdate) -> AppResult<Client> {
        let client = require_by_national_id(&pool.conn, national_id)?;

        let upd = ClientUpdate {
            first_name: optional(upd.first_name),
            last_name: optional(upd.last_name),
            phone: optional(upd.phone),
            email: optional(upd.email),
            birth_date: validate_birth_date(optional(upd.birth_date))?,
            emergency_contact: optional(upd.emergency_contact),
            emergency_phone: optional(upd.emergency_phone),
            notes: optional(upd.notes),
        };

        if upd.is_empty() {
            return Err(AppError::MissingField("at least one field to update"));
        }

        update_client(&pool.conn, client.id, &upd)?;
        audit_or_warn(&pool.conn, "client_edit", &client.national_id, "Client data updated");

        require_by_national_id(&pool.conn, national_id)
    }

    /// Remove a client with its memberships and check-ins.
    pub fn delete(pool: &mut DbPool, national_id: &str) -> AppResult<Client> {
        let client = require_by_national_id(&pool.conn, national_id)?;
        delete_client(&pool.conn, client.id)?;
        audit_or_warn(
            &pool.conn,
            "client_delete",
            &client.national_id,
            &format!("Deleted {}", client.full_name()),
        );
        Ok(client)
    }
}
