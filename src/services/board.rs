//! Month view of the board assembled through the scheduling coordinator.

use crate::SERVICE_ACCESS_ROLE;
use crate::board::coordinator::SchedulingCoordinator;
use crate::board::stats::{ClientProgress, MonthStats};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{ClientId, DayKey, YearMonth};
use crate::domain::work_entry::WorkEntry;
use crate::repository::{
    ClientReader, CreativeTemplateReader, ProposalReader, WorkEntryReader, WorkEntryWriter,
};
use crate::services::gateway::RepositoryGateway;
use crate::services::{ServiceError, ServiceResult, ensure_role};

#[derive(Debug)]
pub struct BoardMonthQuery {
    pub month: YearMonth,
    pub client_id: Option<ClientId>,
}

#[derive(Debug)]
pub struct BoardMonth {
    pub month: YearMonth,
    pub client_id: Option<ClientId>,
    /// Entries of the month under the client filter, in date order.
    pub entries: Vec<(DayKey, WorkEntry)>,
    pub stats: MonthStats,
    /// `None` without a client filter or when the client has no active
    /// proposal.
    pub progress: Option<ClientProgress>,
}

pub async fn load_board_month<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: BoardMonthQuery,
    proposals_per_page: usize,
) -> ServiceResult<BoardMonth>
where
    R: ClientReader
        + CreativeTemplateReader
        + ProposalReader
        + WorkEntryReader
        + WorkEntryWriter
        + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut coordinator =
        SchedulingCoordinator::new(RepositoryGateway::new(repo, user, proposals_per_page));
    coordinator.load().await.map_err(|err| {
        log::error!("Failed to load board: {err}");
        ServiceError::from(err)
    })?;

    if query
        .client_id
        .is_some_and(|client_id| coordinator.client(client_id).is_none())
    {
        return Err(ServiceError::NotFound);
    }
    coordinator.set_client_filter(query.client_id);

    let entries = coordinator
        .filtered_view()
        .in_month(query.month)
        .map(|(day, entry)| (day, entry.clone()))
        .collect();
    let stats = coordinator.month_stats(query.month);
    let progress = query
        .client_id
        .and_then(|client_id| coordinator.client_progress(client_id, query.month));

    Ok(BoardMonth {
        month: query.month,
        client_id: query.client_id,
        entries,
        stats,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use futures::executor::block_on;

    use super::*;
    use crate::domain::client::Client;
    use crate::domain::creative::CreativeTemplate;
    use crate::domain::proposal::Proposal;
    use crate::domain::types::{CreativeTemplateId, ProposalId, WorkEntryId};
    use crate::domain::work_entry::{CreativeItem, StoredWorkEntry};
    use crate::repository::mock::MockRepository;
    use crate::{SERVICE_EDITOR_ROLE, SERVICE_PROPOSALS_ROLE};

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..AuthenticatedUser::default()
        }
    }

    fn template(id: i32, name: &str) -> CreativeTemplate {
        CreativeTemplate {
            id: CreativeTemplateId::new(id).unwrap(),
            name: name.to_string(),
            description: String::new(),
            active: true,
            category: None,
        }
    }

    fn entry(client_id: i32, day: u32, items: &[(i32, &str, u32)]) -> StoredWorkEntry {
        let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let now = date.and_hms_opt(9, 0, 0).unwrap();
        StoredWorkEntry {
            id: WorkEntryId::new(day as i32 * 10 + client_id).unwrap(),
            entry_date: date,
            client_id: ClientId::new(client_id).unwrap(),
            content_description: String::new(),
            description: "[]".to_string(),
            notes: String::new(),
            content_file: None,
            is_special_day: false,
            creatives: items
                .iter()
                .map(|(id, name, quantity)| CreativeItem {
                    template_id: CreativeTemplateId::new(*id).unwrap(),
                    name: name.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn board_repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_list_creative_templates()
            .returning(|| Ok(vec![template(1, "Reel"), template(2, "Banner")]));
        repo.expect_list_work_entries().returning(|_| {
            Ok(vec![
                entry(1, 3, &[(1, "Reel", 2), (2, "Banner", 3)]),
                entry(2, 4, &[(2, "Banner", 7)]),
                entry(1, 10, &[(2, "Banner", 1)]),
            ])
        });
        repo.expect_list_clients().returning(|| {
            Ok(vec![
                Client {
                    id: ClientId::new(1).unwrap(),
                    name: "Acme".to_string(),
                    company_name: "Acme LLC".to_string(),
                    proposal_id: ProposalId::new(5).ok(),
                },
                Client {
                    id: ClientId::new(2).unwrap(),
                    name: "Globex".to_string(),
                    company_name: "Globex Inc".to_string(),
                    proposal_id: None,
                },
            ])
        });
        repo.expect_list_proposals().returning(|_| {
            Ok((
                1,
                vec![Proposal {
                    id: ProposalId::new(5).unwrap(),
                    lead_assign_id: None,
                    creatives_target: 6,
                    videos_target: 2,
                    amount: 1200.0,
                    gst_percentage: 18.0,
                    is_accepted: true,
                }],
            ))
        });
        repo
    }

    fn march(client_id: Option<i32>) -> BoardMonthQuery {
        BoardMonthQuery {
            month: YearMonth::new(2025, 3).unwrap(),
            client_id: client_id.map(|id| ClientId::new(id).unwrap()),
        }
    }

    #[test]
    fn unfiltered_month_counts_every_client() {
        let repo = board_repo();
        let user = user(&[SERVICE_ACCESS_ROLE]);

        let board = block_on(load_board_month(&repo, &user, march(None), 20)).unwrap();

        assert_eq!(board.entries.len(), 3);
        assert_eq!(board.stats.videos_produced, 2);
        assert_eq!(board.stats.creatives_produced, 11);
        assert!(board.progress.is_none());
    }

    #[test]
    fn client_filter_reports_progress() {
        let repo = board_repo();
        let user = user(&[SERVICE_ACCESS_ROLE, SERVICE_EDITOR_ROLE, SERVICE_PROPOSALS_ROLE]);

        let board = block_on(load_board_month(&repo, &user, march(Some(1)), 20)).unwrap();

        let days: Vec<_> = board.entries.iter().map(|(day, _)| day.to_string()).collect();
        assert_eq!(days, vec!["2025-03-03", "2025-03-10"]);
        let progress = board.progress.unwrap();
        assert_eq!(progress.videos_produced, 2);
        assert_eq!(progress.creatives_produced, 4);
        assert_eq!(progress.percentage, 75);
    }

    #[test]
    fn missing_proposal_role_degrades_to_no_progress() {
        let repo = board_repo();
        let user = user(&[SERVICE_ACCESS_ROLE]);

        let board = block_on(load_board_month(&repo, &user, march(Some(1)), 20)).unwrap();

        assert!(board.progress.is_none());
        assert_eq!(board.stats.total(), 6);
    }

    #[test]
    fn unknown_client_filter_is_not_found() {
        let repo = board_repo();
        let user = user(&[SERVICE_ACCESS_ROLE]);

        let result = block_on(load_board_month(&repo, &user, march(Some(9)), 20));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
