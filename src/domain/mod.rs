//! Domain aggregates exposed by the board service layer.

pub mod auth;
pub mod client;
pub mod creative;
pub mod proposal;
pub mod types;
pub mod work_entry;
