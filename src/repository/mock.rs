//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::creative::{CreativeTemplate, NewCreativeTemplate};
use crate::domain::proposal::{NewProposal, Proposal};
use crate::domain::types::ClientId;
use crate::domain::work_entry::{CreativeItem, SaveWorkEntry, StoredWorkEntry};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, CreativeTemplateReader, CreativeTemplateWriter,
    ProposalListQuery, ProposalReader, ProposalWriter, WorkEntryListQuery, WorkEntryReader,
    WorkEntryWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl CreativeTemplateReader for Repository {
        fn list_creative_templates(&self) -> RepositoryResult<Vec<CreativeTemplate>>;
    }

    impl ProposalReader for Repository {
        fn list_proposals(&self, query: ProposalListQuery) -> RepositoryResult<(usize, Vec<Proposal>)>;
    }

    impl WorkEntryReader for Repository {
        fn list_work_entries(
            &self,
            query: WorkEntryListQuery,
        ) -> RepositoryResult<Vec<StoredWorkEntry>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    }

    impl CreativeTemplateWriter for Repository {
        fn create_creative_template(
            &self,
            new_template: &NewCreativeTemplate,
        ) -> RepositoryResult<CreativeTemplate>;
    }

    impl ProposalWriter for Repository {
        fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal>;
    }

    impl WorkEntryWriter for Repository {
        fn upsert_work_entry(
            &self,
            entry: &SaveWorkEntry,
            creatives: &[CreativeItem],
        ) -> RepositoryResult<StoredWorkEntry>;
    }
}
