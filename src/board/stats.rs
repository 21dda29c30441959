//! Monthly production totals and progress against proposal targets.

use serde::Serialize;

use crate::board::classifier::classify_item;
use crate::board::store::WorkEntryStore;
use crate::domain::creative::{CreativeCategory, TemplateCatalog};
use crate::domain::proposal::Proposal;
use crate::domain::types::{ProposalId, YearMonth};

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct MonthStats {
    pub creatives_produced: u32,
    pub videos_produced: u32,
}

impl MonthStats {
    pub fn total(&self) -> u32 {
        self.creatives_produced.saturating_add(self.videos_produced)
    }
}

/// Progress of one client against its resolved proposal.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ClientProgress {
    pub proposal_id: ProposalId,
    pub creatives_target: u32,
    pub videos_target: u32,
    pub creatives_produced: u32,
    pub videos_produced: u32,
    /// Rounded percentage, capped at 100.
    pub percentage: u8,
}

impl ClientProgress {
    pub fn new(stats: MonthStats, proposal: &Proposal) -> Self {
        Self {
            proposal_id: proposal.id,
            creatives_target: proposal.creatives_target,
            videos_target: proposal.videos_target,
            creatives_produced: stats.creatives_produced,
            videos_produced: stats.videos_produced,
            percentage: progress_percentage(&stats, proposal),
        }
    }
}

/// Sums produced items of `month` into the video and static buckets.
pub fn aggregate(view: &WorkEntryStore, month: YearMonth, catalog: &TemplateCatalog) -> MonthStats {
    let mut stats = MonthStats::default();
    for (_, entry) in view.in_month(month) {
        for item in &entry.creative_works {
            match classify_item(item, catalog) {
                CreativeCategory::Video => {
                    stats.videos_produced = stats.videos_produced.saturating_add(item.quantity)
                }
                CreativeCategory::Static => {
                    stats.creatives_produced =
                        stats.creatives_produced.saturating_add(item.quantity)
                }
            }
        }
    }
    stats
}

/// `min(100, round(100 * produced / max(1, target)))`.
pub fn progress_percentage(stats: &MonthStats, proposal: &Proposal) -> u8 {
    let ratio = 100.0 * f64::from(stats.total()) / f64::from(proposal.total_target());
    ratio.round().min(100.0) as u8
}
