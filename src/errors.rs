//! Unified application error type.
//! Database, CLI, export and config code return AppError so errors surface
//! the same way everywhere. The membership engine in `core` never does:
//! it degrades to the safest classification instead.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid payment method: {0} (use cash, card, transfer or sinpe)")]
    InvalidPaymentMethod(String),

    #[error("Invalid plan family: {0} (use monthly, biweekly, weekly, session, custom or auto)")]
    InvalidPlanFamily(String),

    // ---------------------------
    // Lookup / validation errors
    // ---------------------------
    #[error("No client found with national id {0}")]
    ClientNotFound(String),

    #[error("A client with national id {0} already exists")]
    DuplicateNationalId(String),

    #[error("Membership plan not found: {0}")]
    PlanNotFound(String),

    #[error("A plan with code {0} already exists")]
    DuplicatePlanCode(String),

    #[error("Membership plan '{0}' is inactive")]
    PlanInactive(String),

    #[error("Membership plan {0} is used by existing memberships; deactivate it instead")]
    PlanInUse(String),

    #[error("Please enter a first or last name to search")]
    EmptySearch,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
