use serde::{Deserialize, Serialize};

use crate::domain::types::ProposalId;

/// A sales agreement with contracted creative and video targets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Proposal {
    pub id: ProposalId,
    pub lead_assign_id: Option<i32>,
    pub creatives_target: u32,
    pub videos_target: u32,
    pub amount: f64,
    pub gst_percentage: f64,
    pub is_accepted: bool,
}

impl Proposal {
    /// Combined production target, floored at one so progress never divides by zero.
    pub fn total_target(&self) -> u32 {
        self.creatives_target
            .saturating_add(self.videos_target)
            .max(1)
    }
}

/// One page of the proposal listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProposalPage {
    pub rows: Vec<Proposal>,
    pub last_page: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProposal {
    pub lead_assign_id: Option<i32>,
    pub creatives_target: u32,
    pub videos_target: u32,
    pub amount: f64,
    pub gst_percentage: f64,
    pub is_accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(creatives_target: u32, videos_target: u32) -> Proposal {
        Proposal {
            id: ProposalId::new(1).unwrap(),
            lead_assign_id: None,
            creatives_target,
            videos_target,
            amount: 0.0,
            gst_percentage: 0.0,
            is_accepted: true,
        }
    }

    #[test]
    fn total_target_is_floored_and_saturating() {
        assert_eq!(proposal(0, 0).total_target(), 1);
        assert_eq!(proposal(10, 5).total_target(), 15);
        assert_eq!(proposal(u32::MAX, 1).total_target(), u32::MAX);
    }
}
