use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, NewClient};
use crate::domain::creative::{CreativeTemplate, NewCreativeTemplate};
use crate::domain::proposal::{NewProposal, Proposal};
use crate::domain::types::{ClientId, DayKey};
use crate::domain::work_entry::{CreativeItem, SaveWorkEntry, StoredWorkEntry};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod creative_template;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod proposal;
pub mod work_entry;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Zero-based row offset of the page; page numbers start at 1.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProposalListQuery {
    pub pagination: Option<Pagination>,
}

impl ProposalListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkEntryListQuery {
    pub client_id: Option<ClientId>,
    pub from: Option<DayKey>,
    pub to: Option<DayKey>,
}

impl WorkEntryListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restricts the listing to `from..=to`.
    pub fn between(mut self, from: DayKey, to: DayKey) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
}

pub trait CreativeTemplateReader {
    fn list_creative_templates(&self) -> RepositoryResult<Vec<CreativeTemplate>>;
}

pub trait CreativeTemplateWriter {
    fn create_creative_template(
        &self,
        new_template: &NewCreativeTemplate,
    ) -> RepositoryResult<CreativeTemplate>;
}

pub trait ProposalReader {
    fn list_proposals(&self, query: ProposalListQuery) -> RepositoryResult<(usize, Vec<Proposal>)>;
}

pub trait ProposalWriter {
    fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal>;
}

pub trait WorkEntryReader {
    fn list_work_entries(&self, query: WorkEntryListQuery)
    -> RepositoryResult<Vec<StoredWorkEntry>>;
}

pub trait WorkEntryWriter {
    /// Creates or fully replaces the entry of `entry.client_id` on `entry.date`
    /// together with its creatives.
    fn upsert_work_entry(
        &self,
        entry: &SaveWorkEntry,
        creatives: &[CreativeItem],
    ) -> RepositoryResult<StoredWorkEntry>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
