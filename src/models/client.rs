use super::membership::MembershipView;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub national_id: String,      // ⇔ clients.national_id (UNIQUE)
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>, // ⇔ clients.birth_date (TEXT "YYYY-MM-DD")
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for `register`.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for `client edit`: `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub notes: Option<String>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.birth_date.is_none()
            && self.emergency_contact.is_none()
            && self.emergency_phone.is_none()
            && self.notes.is_none()
    }
}

/// A client joined with its most recent membership (if any).
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithLatestMembership {
    pub client: Client,
    pub latest: Option<MembershipView>,
}
