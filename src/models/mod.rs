//! Database models shared across the board repository, plus the server's
//! configuration and authentication models.

#[cfg(feature = "server")]
pub mod auth;
pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod creative_template;
pub mod proposal;
pub mod work_entry;
