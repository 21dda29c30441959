use crate::{SERVICE_ACCESS_ROLE, SERVICE_PROPOSALS_ROLE};
use crate::domain::auth::AuthenticatedUser;
use crate::domain::proposal::ProposalPage;
use crate::repository::{ProposalListQuery, ProposalReader};
use crate::services::{ServiceResult, ensure_role};

/// Number of the last page for `total` rows; an empty listing still has one
/// page.
pub fn last_page(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Returns one page of proposals. Pages are numbered from 1; page 0 is
/// treated as the first page.
pub fn list_proposals_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
    per_page: usize,
) -> ServiceResult<ProposalPage>
where
    R: ProposalReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    ensure_role(user, SERVICE_PROPOSALS_ROLE)?;

    let page = page.max(1);
    let (total, rows) = repo
        .list_proposals(ProposalListQuery::new().paginate(page, per_page))
        .map_err(|err| {
            log::error!("Failed to list proposals page {page}: {err}");
            err
        })?;

    Ok(ProposalPage {
        rows,
        last_page: last_page(total, per_page),
    })
}
