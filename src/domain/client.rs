use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ProposalId, deserialize_loose_id};

/// A CRM client that work is scheduled for. Read-only from the board's side.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub company_name: String,
    /// Proposal defining this client's production targets, if any.
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub proposal_id: Option<ProposalId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub company_name: String,
    pub proposal_id: Option<ProposalId>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: String, company_name: String, proposal_id: Option<ProposalId>) -> Self {
        Self {
            name: name.trim().to_string(),
            company_name: company_name.trim().to_string(),
            proposal_id,
        }
    }
}
