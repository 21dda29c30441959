//! Query parameters and response bodies of the `/api/v1` endpoints.

use serde::{Deserialize, Serialize};

use crate::board::stats::{ClientProgress, MonthStats};
use crate::domain::types::{ClientId, YearMonth};
use crate::domain::work_entry::WorkEntry;
use crate::services::board::{BoardMonth, BoardMonthQuery};

#[derive(Debug, Deserialize)]
pub struct WorkEntriesQuery {
    pub client_id: Option<i32>,
}

impl WorkEntriesQuery {
    /// The client filter; non-positive ids mean "no filter".
    pub fn client_id(&self) -> Option<ClientId> {
        self.client_id.and_then(|id| ClientId::new(id).ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct ProposalsQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub year: i32,
    pub month: u32,
    pub client_id: Option<i32>,
}

impl BoardQuery {
    /// `None` when the month or the client id is out of range.
    pub fn to_month_query(&self) -> Option<BoardMonthQuery> {
        let month = YearMonth::new(self.year, self.month).ok()?;
        let client_id = match self.client_id {
            Some(id) => Some(ClientId::new(id).ok()?),
            None => None,
        };
        Some(BoardMonthQuery { month, client_id })
    }
}

#[derive(Debug, Serialize)]
pub struct BoardDayView {
    /// Canonical `YYYY-MM-DD` key.
    pub date: String,
    #[serde(flatten)]
    pub entry: WorkEntry,
}

#[derive(Debug, Serialize)]
pub struct BoardMonthView {
    pub month: String,
    pub client_id: Option<ClientId>,
    pub entries: Vec<BoardDayView>,
    pub stats: MonthStats,
    /// `null` means the client has no active proposal.
    pub progress: Option<ClientProgress>,
}

impl From<BoardMonth> for BoardMonthView {
    fn from(board: BoardMonth) -> Self {
        Self {
            month: board.month.to_string(),
            client_id: board.client_id,
            entries: board
                .entries
                .into_iter()
                .map(|(day, entry)| BoardDayView {
                    date: day.to_string(),
                    entry,
                })
                .collect(),
            stats: board.stats,
            progress: board.progress,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub date: String,
    pub client_id: ClientId,
    pub content_file: Option<String>,
}
