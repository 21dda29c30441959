use diesel::prelude::*;

use crate::domain::proposal::{NewProposal as DomainNewProposal, Proposal as DomainProposal};
use crate::domain::types::{ProposalId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::proposals)]
/// Diesel model for [`crate::domain::proposal::Proposal`].
pub struct Proposal {
    pub id: i32,
    pub lead_assign_id: Option<i32>,
    pub creatives_target: i32,
    pub videos_target: i32,
    pub amount: f64,
    pub gst_percentage: f64,
    pub is_accepted: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::proposals)]
pub struct NewProposal {
    pub lead_assign_id: Option<i32>,
    pub creatives_target: i32,
    pub videos_target: i32,
    pub amount: f64,
    pub gst_percentage: f64,
    pub is_accepted: bool,
}

fn target(value: i32) -> Result<u32, TypeConstraintError> {
    u32::try_from(value)
        .map_err(|_| TypeConstraintError::InvalidValue(format!("negative target {value}")))
}

impl TryFrom<Proposal> for DomainProposal {
    type Error = TypeConstraintError;

    fn try_from(proposal: Proposal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProposalId::try_from(proposal.id)?,
            lead_assign_id: proposal.lead_assign_id,
            creatives_target: target(proposal.creatives_target)?,
            videos_target: target(proposal.videos_target)?,
            amount: proposal.amount,
            gst_percentage: proposal.gst_percentage,
            is_accepted: proposal.is_accepted,
        })
    }
}

impl From<&DomainNewProposal> for NewProposal {
    fn from(proposal: &DomainNewProposal) -> Self {
        Self {
            lead_assign_id: proposal.lead_assign_id,
            creatives_target: i32::try_from(proposal.creatives_target).unwrap_or(i32::MAX),
            videos_target: i32::try_from(proposal.videos_target).unwrap_or(i32::MAX),
            amount: proposal.amount,
            gst_percentage: proposal.gst_percentage,
            is_accepted: proposal.is_accepted,
        }
    }
}
