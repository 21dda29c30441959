//! Scheduling board core: the work entry store, the creative selection codec,
//! proposal resolution, monthly statistics and the day editing lifecycle.
//!
//! Everything here talks to the backend only through [`gateway::BoardGateway`].

pub mod classifier;
pub mod codec;
pub mod coordinator;
pub mod gateway;
pub mod proposals;
pub mod selection;
pub mod stats;
pub mod store;
