pub mod checkin;
pub mod clients;
pub mod config;
pub mod expirations;
pub mod log;
pub mod membership;
pub mod plans;
pub mod reconcile;
pub mod register;
pub mod renew;
pub mod report;
pub mod summary;
