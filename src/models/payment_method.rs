use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Sinpe,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Sinpe,
    ];

    /// Convert enum → DB string (`memberships.payments`)
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Sinpe => "sinpe",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "transfer" => Some(PaymentMethod::Transfer),
            "sinpe" => Some(PaymentMethod::Sinpe),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case, plus the Spanish labels staff use.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "efectivo" => Some(PaymentMethod::Cash),
            "tarjeta" => Some(PaymentMethod::Card),
            "transferencia" => Some(PaymentMethod::Transfer),
            other => PaymentMethod::from_db_str(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Sinpe => "SINPE Movil",
        }
    }
}

/// Label for a raw `payments` column value; unknown or empty tags are "N/A".
pub fn label_for(raw: Option<&str>) -> &'static str {
    raw.and_then(PaymentMethod::from_db_str)
        .map(|m| m.label())
        .unwrap_or("N/A")
}
