use diesel::prelude::*;

use crate::domain::proposal::{NewProposal, Proposal};
use crate::models::proposal::{NewProposal as DbNewProposal, Proposal as DbProposal};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProposalListQuery, ProposalReader, ProposalWriter};
use crate::schema::proposals;

impl ProposalReader for DieselRepository {
    fn list_proposals(&self, query: ProposalListQuery) -> RepositoryResult<(usize, Vec<Proposal>)> {
        let mut conn = self.conn()?;

        let total = proposals::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = proposals::table.order(proposals::id.asc()).into_boxed();
        if let Some(pagination) = &query.pagination {
            items = items
                .limit(pagination.per_page as i64)
                .offset(pagination.offset() as i64);
        }

        let proposals = items
            .load::<DbProposal>(&mut conn)?
            .into_iter()
            .map(Proposal::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, proposals))
    }
}

impl ProposalWriter for DieselRepository {
    fn create_proposal(&self, new_proposal: &NewProposal) -> RepositoryResult<Proposal> {
        let mut conn = self.conn()?;

        let insertable: DbNewProposal = new_proposal.into();
        let proposal = diesel::insert_into(proposals::table)
            .values(&insertable)
            .get_result::<DbProposal>(&mut conn)?;

        Ok(Proposal::try_from(proposal)?)
    }
}
