//! Operations the board consumes from the backend.

use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::creative::CreativeTemplate;
use crate::domain::proposal::ProposalPage;
use crate::domain::work_entry::{SaveWorkEntry, WorkEntryRow};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("operation not permitted")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Asynchronous access to work entries, clients, templates and proposals.
#[allow(async_fn_in_trait)]
pub trait BoardGateway {
    async fn fetch_work_entries(&self) -> GatewayResult<Vec<WorkEntryRow>>;

    async fn save_work_entry(&self, request: &SaveWorkEntry) -> GatewayResult<()>;

    async fn fetch_clients(&self) -> GatewayResult<Vec<Client>>;

    async fn fetch_creative_templates(&self) -> GatewayResult<Vec<CreativeTemplate>>;

    /// Fetches one page of proposals; pages are numbered from 1.
    async fn fetch_proposals_page(&self, page: usize) -> GatewayResult<ProposalPage>;
}
