pub mod attendance;
pub mod client;
pub mod membership;
pub mod membership_status;
pub mod payment_method;
pub mod plan;
