//! In-process [`BoardGateway`] over the repository traits.

use crate::board::gateway::{BoardGateway, GatewayResult};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::client::Client;
use crate::domain::creative::CreativeTemplate;
use crate::domain::proposal::ProposalPage;
use crate::domain::work_entry::{SaveWorkEntry, WorkEntryRow};
use crate::repository::{
    ClientReader, CreativeTemplateReader, ProposalReader, WorkEntryReader, WorkEntryWriter,
};
use crate::services::{catalog, proposals, work_entries};

/// Serves board requests on behalf of `user`, applying the same role checks
/// as the HTTP API.
pub struct RepositoryGateway<'a, R: ?Sized> {
    repo: &'a R,
    user: &'a AuthenticatedUser,
    per_page: usize,
}

impl<'a, R: ?Sized> RepositoryGateway<'a, R> {
    pub fn new(repo: &'a R, user: &'a AuthenticatedUser, per_page: usize) -> Self {
        Self {
            repo,
            user,
            per_page,
        }
    }
}

impl<R> BoardGateway for RepositoryGateway<'_, R>
where
    R: ClientReader
        + CreativeTemplateReader
        + ProposalReader
        + WorkEntryReader
        + WorkEntryWriter
        + ?Sized,
{
    async fn fetch_work_entries(&self) -> GatewayResult<Vec<WorkEntryRow>> {
        Ok(work_entries::list_work_entries(self.repo, self.user, None)?)
    }

    async fn save_work_entry(&self, request: &SaveWorkEntry) -> GatewayResult<()> {
        work_entries::save_work_entry(self.repo, self.user, request.clone())?;
        Ok(())
    }

    async fn fetch_clients(&self) -> GatewayResult<Vec<Client>> {
        Ok(catalog::list_clients(self.repo, self.user)?)
    }

    async fn fetch_creative_templates(&self) -> GatewayResult<Vec<CreativeTemplate>> {
        Ok(catalog::list_creative_templates(self.repo, self.user)?)
    }

    async fn fetch_proposals_page(&self, page: usize) -> GatewayResult<ProposalPage> {
        Ok(proposals::list_proposals_page(
            self.repo,
            self.user,
            page,
            self.per_page,
        )?)
    }
}
