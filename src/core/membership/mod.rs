//! Membership lifecycle engine: pure functions, no I/O.
//!
//! Data flows rows → `validity` (per record) → `classify` / `revenue`
//! (per collection). Every `*_on` function takes `today` explicitly; the
//! plain variants read the local clock.

pub mod calendar;
pub mod classify;
pub mod plan;
pub mod revenue;
pub mod validity;
