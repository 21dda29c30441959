//! Loading the proposal collection and matching proposals to clients.

use futures::future::join_all;

use crate::board::gateway::{BoardGateway, GatewayError};
use crate::domain::client::Client;
use crate::domain::proposal::Proposal;

/// Walks every page of the proposal listing.
///
/// Pages after the first are requested concurrently and concatenated in page
/// order. Proposals are advisory: any failed page degrades the whole result
/// to an empty list.
pub async fn load_all_proposals<G>(gateway: &G) -> Vec<Proposal>
where
    G: BoardGateway + ?Sized,
{
    let first = match gateway.fetch_proposals_page(1).await {
        Ok(page) => page,
        Err(err) => {
            report_failure(1, &err);
            return Vec::new();
        }
    };

    let mut proposals = first.rows;
    if first.last_page <= 1 {
        return proposals;
    }

    let pages = (2..=first.last_page).collect::<Vec<_>>();
    let results = join_all(pages.iter().map(|page| gateway.fetch_proposals_page(*page))).await;

    for (page, result) in pages.into_iter().zip(results) {
        match result {
            Ok(page) => proposals.extend(page.rows),
            Err(err) => {
                report_failure(page, &err);
                return Vec::new();
            }
        }
    }

    proposals
}

fn report_failure(page: usize, err: &GatewayError) {
    match err {
        GatewayError::Forbidden => {
            log::warn!("Proposal page {page} is not accessible; continuing without proposals")
        }
        _ => log::error!("Failed to load proposal page {page}: {err}"),
    }
}

/// Finds the proposal referenced by the client, if it was loaded.
pub fn resolve<'a>(client: &Client, proposals: &'a [Proposal]) -> Option<&'a Proposal> {
    let proposal_id = client.proposal_id?;
    proposals.iter().find(|proposal| proposal.id == proposal_id)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;

    use super::*;
    use crate::board::gateway::GatewayResult;
    use crate::domain::creative::CreativeTemplate;
    use crate::domain::proposal::ProposalPage;
    use crate::domain::types::{ClientId, ProposalId};
    use crate::domain::work_entry::{SaveWorkEntry, WorkEntryRow};

    /// Yields `remaining` times before completing.
    struct Delay {
        remaining: usize,
    }

    impl Future for Delay {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.remaining == 0 {
                Poll::Ready(())
            } else {
                self.remaining -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    struct PagedGateway {
        last_page: usize,
        forbidden_pages: HashSet<usize>,
        requested: RefCell<Vec<usize>>,
        completed: RefCell<Vec<usize>>,
    }

    impl PagedGateway {
        fn new(last_page: usize) -> Self {
            Self {
                last_page,
                forbidden_pages: HashSet::new(),
                requested: RefCell::new(Vec::new()),
                completed: RefCell::new(Vec::new()),
            }
        }
    }

    fn proposal(id: i32) -> Proposal {
        Proposal {
            id: ProposalId::new(id).unwrap(),
            lead_assign_id: None,
            creatives_target: 10,
            videos_target: 5,
            amount: 1000.0,
            gst_percentage: 18.0,
            is_accepted: true,
        }
    }

    impl BoardGateway for PagedGateway {
        async fn fetch_work_entries(&self) -> GatewayResult<Vec<WorkEntryRow>> {
            Ok(Vec::new())
        }

        async fn save_work_entry(&self, _request: &SaveWorkEntry) -> GatewayResult<()> {
            Ok(())
        }

        async fn fetch_clients(&self) -> GatewayResult<Vec<Client>> {
            Ok(Vec::new())
        }

        async fn fetch_creative_templates(&self) -> GatewayResult<Vec<CreativeTemplate>> {
            Ok(Vec::new())
        }

        async fn fetch_proposals_page(&self, page: usize) -> GatewayResult<ProposalPage> {
            self.requested.borrow_mut().push(page);
            // Later pages finish first.
            Delay {
                remaining: (self.last_page + 1 - page) * 3,
            }
            .await;
            self.completed.borrow_mut().push(page);

            if self.forbidden_pages.contains(&page) {
                return Err(GatewayError::Forbidden);
            }
            let base = (page as i32 - 1) * 10;
            Ok(ProposalPage {
                rows: vec![proposal(base + 1), proposal(base + 2)],
                last_page: self.last_page,
            })
        }
    }

    #[test]
    fn walks_every_page_in_order() {
        let gateway = PagedGateway::new(3);

        let proposals = block_on(load_all_proposals(&gateway));

        assert_eq!(*gateway.requested.borrow(), vec![1, 2, 3]);
        assert_eq!(*gateway.completed.borrow(), vec![1, 3, 2]);
        let ids: Vec<i32> = proposals.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 11, 12, 21, 22]);
    }

    #[test]
    fn single_page_needs_one_request() {
        let gateway = PagedGateway::new(1);

        let proposals = block_on(load_all_proposals(&gateway));

        assert_eq!(*gateway.requested.borrow(), vec![1]);
        assert_eq!(proposals.len(), 2);
    }

    #[test]
    fn forbidden_page_degrades_to_empty() {
        let mut gateway = PagedGateway::new(3);
        gateway.forbidden_pages.insert(3);
        assert!(block_on(load_all_proposals(&gateway)).is_empty());

        let mut gateway = PagedGateway::new(2);
        gateway.forbidden_pages.insert(1);
        assert!(block_on(load_all_proposals(&gateway)).is_empty());
        assert_eq!(*gateway.requested.borrow(), vec![1]);
    }

    #[test]
    fn resolve_matches_by_proposal_id() {
        let proposals = vec![proposal(3), proposal(7)];
        let mut client = Client {
            id: ClientId::new(1).unwrap(),
            name: "Acme".into(),
            company_name: "Acme LLC".into(),
            proposal_id: Some(ProposalId::new(7).unwrap()),
        };

        assert_eq!(resolve(&client, &proposals).map(|p| p.id.get()), Some(7));

        client.proposal_id = Some(ProposalId::new(9).unwrap());
        assert!(resolve(&client, &proposals).is_none());

        client.proposal_id = None;
        assert!(resolve(&client, &proposals).is_none());
    }
}
