use crate::board::codec;
use crate::board::selection::CreativeSelection;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::creative::TemplateCatalog;
use crate::domain::types::ClientId;
use crate::domain::work_entry::{CreativeItem, SaveWorkEntry, StoredWorkEntry, WorkEntryRow};
use crate::repository::{
    ClientReader, CreativeTemplateReader, WorkEntryListQuery, WorkEntryReader, WorkEntryWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_EDITOR_ROLE};

/// Lists work entry rows in the shape the board consumes.
pub fn list_work_entries<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id: Option<ClientId>,
) -> ServiceResult<Vec<WorkEntryRow>>
where
    R: WorkEntryReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = WorkEntryListQuery::new();
    if let Some(client_id) = client_id {
        query = query.client(client_id);
    }

    let entries = repo.list_work_entries(query).map_err(|err| {
        log::error!("Failed to list work entries: {err}");
        err
    })?;

    Ok(entries.into_iter().map(WorkEntryRow::from).collect())
}

/// Creatives persisted for a serialized selection: known templates only,
/// repeated templates merged, zero quantities dropped.
fn creatives_from_description(description: &str, catalog: &TemplateCatalog) -> Vec<CreativeItem> {
    let decoded = codec::decode(description, catalog);
    let selection = CreativeSelection::from_items(
        decoded
            .iter()
            .filter(|item| catalog.get(item.template_id).is_some()),
    );
    if selection.items().len() < decoded.len() {
        log::warn!(
            "Dropped {} unknown or empty creatives from saved selection",
            decoded.len() - selection.items().len()
        );
    }

    selection
        .items()
        .iter()
        .map(|item| CreativeItem {
            template_id: item.template_id,
            name: catalog.name_of(item.template_id).to_string(),
            quantity: item.quantity,
        })
        .collect()
}

/// Creates or overwrites the entry of a client on a day.
pub fn save_work_entry<R>(
    repo: &R,
    user: &AuthenticatedUser,
    request: SaveWorkEntry,
) -> ServiceResult<StoredWorkEntry>
where
    R: ClientReader + CreativeTemplateReader + WorkEntryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    ensure_role(user, SERVICE_EDITOR_ROLE)?;

    if repo.get_client_by_id(request.client_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let catalog = TemplateCatalog::new(repo.list_creative_templates().map_err(|err| {
        log::error!("Failed to load creative templates: {err}");
        err
    })?);
    let creatives = creatives_from_description(&request.description, &catalog);

    let request = SaveWorkEntry {
        content_description: ammonia::clean(request.content_description.trim()),
        notes: ammonia::clean(request.notes.trim()),
        ..request
    };

    let stored = repo
        .upsert_work_entry(&request, &creatives)
        .map_err(|err| {
            log::error!(
                "Failed to save work entry for client {} on {}: {err}",
                request.client_id,
                request.date
            );
            err
        })?;

    Ok(stored)
}
