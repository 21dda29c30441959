use crate::SERVICE_ACCESS_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::client::Client;
use crate::domain::creative::CreativeTemplate;
use crate::repository::{ClientReader, CreativeTemplateReader};
use crate::services::{ServiceResult, ensure_role};

/// Returns every client work can be scheduled for.
pub fn list_clients<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    Ok(clients)
}

/// Returns the full template catalog, inactive templates included.
pub fn list_creative_templates<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<CreativeTemplate>>
where
    R: CreativeTemplateReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let templates = repo.list_creative_templates().map_err(|err| {
        log::error!("Failed to list creative templates: {err}");
        err
    })?;

    Ok(templates)
}
