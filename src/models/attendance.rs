use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: i64,
    pub member_id: i64,
    pub checked_in_at: String,          // ⇔ attendance.checked_in_at (UTC RFC 3339)
    pub checked_out_at: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

