//! Edit-and-save lifecycle of a single calendar day.
//!
//! `Idle -> Editing -> Saving -> {Reconciled | Saved | Failed}`.
//!
//! Saving applies the edit to the local store before the backend is called.
//! A successful save is followed by a full reload of work entries because
//! the backend owns derived fields such as template names. A failed save
//! restores the last confirmed entry of the day, unless a newer edit of the
//! same day is still in flight.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::board::codec;
use crate::board::gateway::{BoardGateway, GatewayError, GatewayResult};
use crate::board::proposals;
use crate::board::selection::CreativeSelection;
use crate::board::stats::{self, ClientProgress, MonthStats};
use crate::board::store::WorkEntryStore;
use crate::domain::client::Client;
use crate::domain::creative::TemplateCatalog;
use crate::domain::proposal::Proposal;
use crate::domain::types::{ClientId, DayKey, YearMonth};
use crate::domain::work_entry::{CreativeItem, SaveWorkEntry, WorkEntry};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("no day is being edited")]
    NotEditing,

    #[error("a client must be chosen before saving")]
    MissingClient,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing { day: DayKey },
    Saving { day: DayKey },
    /// Persisted and reloaded from the backend.
    Reconciled { day: DayKey },
    /// Persisted, but the reload failed; the local copy is the optimistic one.
    Saved { day: DayKey },
    /// Rejected by the backend; the day was restored to its pre-edit value.
    Failed { day: DayKey, reason: String },
}

/// Form state of the day being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkEntryDraft {
    pub client_id: Option<ClientId>,
    pub work_description: String,
    pub notes: String,
    pub selection: CreativeSelection,
    pub content_file: Option<String>,
    pub is_special_day: bool,
}

impl WorkEntryDraft {
    fn from_entry(entry: &WorkEntry) -> Self {
        Self {
            client_id: Some(entry.client_id),
            work_description: entry.work_description.clone(),
            notes: entry.notes.clone(),
            selection: CreativeSelection::from_items(&entry.items),
            content_file: entry.content_file.clone(),
            is_special_day: entry.is_special_day,
        }
    }
}

/// A save whose optimistic part has been applied but which has not been
/// sent yet.
#[derive(Debug)]
#[must_use = "the save is only sent by `complete_save`"]
pub struct PendingSave {
    day: DayKey,
    generation: u64,
    request: SaveWorkEntry,
    applied: WorkEntry,
}

impl PendingSave {
    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn request(&self) -> &SaveWorkEntry {
        &self.request
    }
}

/// Unsettled saves of one day.
#[derive(Debug)]
struct InFlightDay {
    /// Value to fall back to when the newest edit is rejected.
    baseline: Option<WorkEntry>,
    /// Newest optimistic edit that has not been rejected yet.
    latest: Option<(u64, WorkEntry)>,
    pending: usize,
}

pub struct SchedulingCoordinator<G> {
    gateway: G,
    store: WorkEntryStore,
    catalog: TemplateCatalog,
    clients: Vec<Client>,
    proposals: Vec<Proposal>,
    client_filter: Option<ClientId>,
    state: EditState,
    draft: Option<WorkEntryDraft>,
    in_flight: BTreeMap<DayKey, InFlightDay>,
    next_generation: u64,
}

impl<G: BoardGateway> SchedulingCoordinator<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: WorkEntryStore::new(),
            catalog: TemplateCatalog::default(),
            clients: Vec::new(),
            proposals: Vec::new(),
            client_filter: None,
            state: EditState::Idle,
            draft: None,
            in_flight: BTreeMap::new(),
            next_generation: 0,
        }
    }

    /// Loads templates, work entries, clients and proposals.
    pub async fn load(&mut self) -> GatewayResult<()> {
        self.catalog = TemplateCatalog::new(self.gateway.fetch_creative_templates().await?);
        self.refresh_entries().await?;
        self.clients = self.gateway.fetch_clients().await?;
        self.proposals = proposals::load_all_proposals(&self.gateway).await;
        log::info!(
            "Board loaded: {} entries, {} clients, {} proposals",
            self.store.len(),
            self.clients.len(),
            self.proposals.len()
        );
        Ok(())
    }

    /// Rebuilds the store from the backend's current rows. Edits that are
    /// still being saved stay visible on top of the reloaded rows.
    pub async fn refresh_entries(&mut self) -> GatewayResult<()> {
        let rows = self.gateway.fetch_work_entries().await?;
        self.store = WorkEntryStore::build(rows, &self.catalog);
        for (day, slot) in self.in_flight.iter_mut() {
            slot.baseline = self.store.get(*day).cloned();
            if let Some((_, entry)) = &slot.latest {
                self.store.upsert(*day, entry.clone());
            }
        }
        Ok(())
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &WorkEntryStore {
        &self.store
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, client_id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn client_filter(&self) -> Option<ClientId> {
        self.client_filter
    }

    pub fn set_client_filter(&mut self, client_id: Option<ClientId>) {
        self.client_filter = client_id;
    }

    /// The store restricted to the active client filter.
    pub fn filtered_view(&self) -> WorkEntryStore {
        self.store.filter_by_client(self.client_filter)
    }

    /// Opens `day` for editing, pre-filled from its entry when there is one.
    pub fn select_day(&mut self, day: DayKey) -> &mut WorkEntryDraft {
        let draft = match self.store.get(day) {
            Some(entry) => WorkEntryDraft::from_entry(entry),
            None => WorkEntryDraft {
                client_id: self.client_filter,
                ..WorkEntryDraft::default()
            },
        };
        self.state = EditState::Editing { day };
        self.draft.insert(draft)
    }

    pub fn draft(&self) -> Option<&WorkEntryDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut WorkEntryDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
        self.state = EditState::Idle;
    }

    /// Applies the draft to the local store and prepares the backend request.
    pub fn begin_save(&mut self) -> Result<PendingSave, CoordinatorError> {
        let EditState::Editing { day } = self.state else {
            return Err(CoordinatorError::NotEditing);
        };
        let draft = self.draft.as_ref().ok_or(CoordinatorError::NotEditing)?;
        let client_id = draft.client_id.ok_or(CoordinatorError::MissingClient)?;

        let request = SaveWorkEntry {
            date: day,
            client_id,
            description: codec::encode(draft.selection.items()),
            content_description: draft.work_description.clone(),
            notes: draft.notes.clone(),
            content_file: draft.content_file.clone(),
            is_special_day: draft.is_special_day,
        };

        let items: Vec<CreativeItem> = draft
            .selection
            .items()
            .iter()
            .map(|selected| CreativeItem {
                template_id: selected.template_id,
                name: self.catalog.name_of(selected.template_id).to_string(),
                quantity: selected.quantity,
            })
            .collect();
        let optimistic = WorkEntry {
            client_id,
            work_description: draft.work_description.clone(),
            creative_works: items.clone(),
            items,
            notes: draft.notes.clone(),
            content_file: draft.content_file.clone(),
            is_special_day: draft.is_special_day,
        };

        let generation = self.next_generation;
        self.next_generation += 1;

        let previous = self.store.upsert(day, optimistic.clone());
        let slot = self.in_flight.entry(day).or_insert_with(|| InFlightDay {
            baseline: previous,
            latest: None,
            pending: 0,
        });
        slot.latest = Some((generation, optimistic.clone()));
        slot.pending += 1;

        self.draft = None;
        self.state = EditState::Saving { day };

        Ok(PendingSave {
            day,
            generation,
            request,
            applied: optimistic,
        })
    }

    /// Settles one save of `day`. A rejected save only touches the store
    /// when it is still the newest edit of the day.
    fn settle(&mut self, day: DayKey, generation: u64, persisted: Option<WorkEntry>) {
        let Some(slot) = self.in_flight.get_mut(&day) else {
            return;
        };
        slot.pending = slot.pending.saturating_sub(1);
        let is_latest = slot
            .latest
            .as_ref()
            .is_some_and(|(latest, _)| *latest == generation);

        match persisted {
            Some(entry) => {
                slot.baseline = Some(entry);
                if is_latest {
                    slot.latest = None;
                }
            }
            None if is_latest => {
                self.store.restore(day, slot.baseline.clone());
                slot.latest = None;
            }
            None => {
                log::warn!("Rejected save for {day} was superseded by a newer edit");
            }
        }

        if slot.pending == 0 {
            self.in_flight.remove(&day);
        }
    }

    /// Sends a prepared save and reconciles with the backend.
    pub async fn complete_save(&mut self, pending: PendingSave) -> Result<(), CoordinatorError> {
        let PendingSave {
            day,
            generation,
            request,
            applied,
        } = pending;

        if let Err(err) = self.gateway.save_work_entry(&request).await {
            log::error!("Failed to save work entry for {day}: {err}");
            self.settle(day, generation, None);
            self.state = EditState::Failed {
                day,
                reason: err.to_string(),
            };
            return Err(err.into());
        }
        self.settle(day, generation, Some(applied));

        match self.refresh_entries().await {
            Ok(()) => {
                log::info!("Work entry for {day} saved and reconciled");
                self.state = EditState::Reconciled { day };
            }
            Err(err) => {
                log::warn!("Work entry for {day} saved but reload failed: {err}");
                self.state = EditState::Saved { day };
            }
        }
        Ok(())
    }

    /// [`Self::begin_save`] followed by [`Self::complete_save`].
    pub async fn save(&mut self) -> Result<(), CoordinatorError> {
        let pending = self.begin_save()?;
        self.complete_save(pending).await
    }

    /// Production totals for `month` under the active client filter.
    pub fn month_stats(&self, month: YearMonth) -> MonthStats {
        stats::aggregate(&self.filtered_view(), month, &self.catalog)
    }

    pub fn resolve_proposal(&self, client_id: ClientId) -> Option<&Proposal> {
        let client = self.client(client_id)?;
        proposals::resolve(client, &self.proposals)
    }

    /// Progress of `client_id` in `month`, or `None` when it has no active
    /// proposal.
    pub fn client_progress(&self, client_id: ClientId, month: YearMonth) -> Option<ClientProgress> {
        let proposal = self.resolve_proposal(client_id)?;
        let view = self.store.filter_by_client(Some(client_id));
        let month_stats = stats::aggregate(&view, month, &self.catalog);
        Some(ClientProgress::new(month_stats, proposal))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::domain::creative::CreativeTemplate;
    use crate::domain::proposal::ProposalPage;
    use crate::domain::types::{CreativeTemplateId, ProposalId};
    use crate::domain::work_entry::{RawCreative, WorkEntryRow};

    /// In-memory backend that stores saves as rows, naming creatives the way
    /// the real backend does.
    #[derive(Default)]
    struct MemoryGateway {
        rows: RefCell<Vec<WorkEntryRow>>,
        templates: Vec<CreativeTemplate>,
        clients: Vec<Client>,
        proposals: Vec<Proposal>,
        reject_saves: Cell<bool>,
        saves: Cell<usize>,
    }

    impl BoardGateway for MemoryGateway {
        async fn fetch_work_entries(&self) -> GatewayResult<Vec<WorkEntryRow>> {
            Ok(self.rows.borrow().clone())
        }

        async fn save_work_entry(&self, request: &SaveWorkEntry) -> GatewayResult<()> {
            self.saves.set(self.saves.get() + 1);
            if self.reject_saves.get() {
                return Err(GatewayError::Unavailable("connection reset".into()));
            }
            let catalog = TemplateCatalog::new(self.templates.clone());
            let creatives = codec::decode(&request.description, &catalog)
                .into_iter()
                .map(|item| RawCreative {
                    id: item.template_id,
                    name: format!("{} (server)", item.name),
                    nos: Some(crate::domain::types::LooseScalar::Text(
                        item.quantity.to_string(),
                    )),
                })
                .collect();
            let date = request.date.to_string();
            let mut rows = self.rows.borrow_mut();
            rows.retain(|r| !(r.date == date && r.client_id == request.client_id));
            rows.push(WorkEntryRow {
                date,
                client_id: request.client_id,
                content_description: request.content_description.clone(),
                description: request.description.clone(),
                notes: request.notes.clone(),
                creatives,
                is_special_day: request.is_special_day,
                content_file: request.content_file.clone(),
            });
            Ok(())
        }

        async fn fetch_clients(&self) -> GatewayResult<Vec<Client>> {
            Ok(self.clients.clone())
        }

        async fn fetch_creative_templates(&self) -> GatewayResult<Vec<CreativeTemplate>> {
            Ok(self.templates.clone())
        }

        async fn fetch_proposals_page(&self, _page: usize) -> GatewayResult<ProposalPage> {
            Ok(ProposalPage {
                rows: self.proposals.clone(),
                last_page: 1,
            })
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

    fn client(id: i32, proposal_id: Option<i32>) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            name: format!("Client {id}"),
            company_name: format!("Company {id}"),
            proposal_id: proposal_id.map(|p| ProposalId::new(p).unwrap()),
        }
    }

    fn gateway() -> MemoryGateway {
        MemoryGateway {
            templates: vec![template(1, "Instagram Reel"), template(2, "Static Banner")],
            clients: vec![client(1, Some(7)), client(2, None)],
            proposals: vec![Proposal {
                id: ProposalId::new(7).unwrap(),
                lead_assign_id: Some(3),
                creatives_target: 10,
                videos_target: 5,
                amount: 5000.0,
                gst_percentage: 18.0,
                is_accepted: true,
            }],
            rows: RefCell::new(vec![WorkEntryRow {
                date: "2025-03-03".into(),
                client_id: ClientId::new(1).unwrap(),
                content_description: "Kickoff".into(),
                description: r#"{"templateIds":"1","quantities":"2"}"#.into(),
                notes: "first".into(),
                creatives: vec![RawCreative {
                    id: CreativeTemplateId::new(1).unwrap(),
                    name: "Instagram Reel".into(),
                    nos: None,
                }],
                is_special_day: true,
                content_file: None,
            }]),
            ..MemoryGateway::default()
        }
    }

    fn day(raw: &str) -> DayKey {
        DayKey::parse(raw).unwrap()
    }

    fn loaded(gateway: MemoryGateway) -> SchedulingCoordinator<MemoryGateway> {
        let mut coordinator = SchedulingCoordinator::new(gateway);
        block_on(coordinator.load()).unwrap();
        coordinator
    }

    #[test]
    fn selecting_an_occupied_day_prefills_the_draft() {
        let mut coordinator = loaded(gateway());

        let draft = coordinator.select_day(day("2025-03-03")).clone();

        assert_eq!(draft.client_id, Some(ClientId::new(1).unwrap()));
        assert_eq!(draft.work_description, "Kickoff");
        assert!(draft.is_special_day);
        assert_eq!(
            draft.selection.quantity_of(CreativeTemplateId::new(1).unwrap()),
            2
        );
        assert_eq!(
            coordinator.state(),
            &EditState::Editing {
                day: day("2025-03-03")
            }
        );
    }

    #[test]
    fn selecting_an_empty_day_uses_the_client_filter() {
        let mut coordinator = loaded(gateway());
        coordinator.set_client_filter(Some(ClientId::new(2).unwrap()));

        let draft = coordinator.select_day(day("2025-03-10"));

        assert_eq!(draft.client_id, Some(ClientId::new(2).unwrap()));
        assert!(draft.selection.is_empty());
    }

    #[test]
    fn new_entry_is_visible_before_the_save_is_sent() {
        let mut coordinator = loaded(gateway());
        let client_id = ClientId::new(2).unwrap();
        coordinator.set_client_filter(Some(client_id));

        let draft = coordinator.select_day(day("2025-03-12"));
        draft.work_description = "Launch".into();
        draft.selection.add(CreativeTemplateId::new(2).unwrap());

        let pending = coordinator.begin_save().unwrap();

        assert_eq!(coordinator.gateway().saves.get(), 0);
        let view = coordinator.filtered_view();
        let entry = view.get(day("2025-03-12")).unwrap();
        assert_eq!(entry.client_id, client_id);
        assert_eq!(entry.creative_works[0].name, "Static Banner");
        assert_eq!(
            pending.request().description,
            r#"{"templateIds":"2","quantities":"1"}"#
        );

        block_on(coordinator.complete_save(pending)).unwrap();
        assert_eq!(coordinator.gateway().saves.get(), 1);
        assert_eq!(
            coordinator.state(),
            &EditState::Reconciled {
                day: day("2025-03-12")
            }
        );
        let reconciled = coordinator.store().get(day("2025-03-12")).unwrap();
        assert_eq!(reconciled.creative_works[0].name, "Static Banner (server)");
    }

    #[test]
    fn rejected_save_restores_the_previous_entry() {
        let gateway = gateway();
        gateway.reject_saves.set(true);
        let mut coordinator = loaded(gateway);

        let draft = coordinator.select_day(day("2025-03-03"));
        draft.work_description = "Rewritten".into();
        let result = block_on(coordinator.save());

        assert!(matches!(
            result,
            Err(CoordinatorError::Gateway(GatewayError::Unavailable(_)))
        ));
        assert!(matches!(coordinator.state(), EditState::Failed { .. }));
        let entry = coordinator.store().get(day("2025-03-03")).unwrap();
        assert_eq!(entry.work_description, "Kickoff");
    }

    #[test]
    fn rejected_save_of_a_new_day_clears_it() {
        let gateway = gateway();
        gateway.reject_saves.set(true);
        let mut coordinator = loaded(gateway);

        let draft = coordinator.select_day(day("2025-03-15"));
        draft.client_id = Some(ClientId::new(1).unwrap());
        assert!(block_on(coordinator.save()).is_err());

        assert!(!coordinator.store().contains(day("2025-03-15")));
    }

    #[test]
    fn overlapping_rejected_saves_fall_back_to_the_confirmed_entry() {
        let gateway = gateway();
        gateway.reject_saves.set(true);
        let mut coordinator = loaded(gateway);
        let kickoff = day("2025-03-03");

        coordinator.select_day(kickoff).work_description = "A".into();
        let first = coordinator.begin_save().unwrap();
        coordinator.select_day(kickoff).work_description = "B".into();
        let second = coordinator.begin_save().unwrap();

        assert!(block_on(coordinator.complete_save(first)).is_err());
        let entry = coordinator.store().get(kickoff).unwrap();
        assert_eq!(entry.work_description, "B");

        assert!(block_on(coordinator.complete_save(second)).is_err());
        let entry = coordinator.store().get(kickoff).unwrap();
        assert_eq!(entry.work_description, "Kickoff");
    }

    #[test]
    fn overlapping_rejected_saves_of_a_new_day_clear_it() {
        let gateway = gateway();
        gateway.reject_saves.set(true);
        let mut coordinator = loaded(gateway);
        let fresh = day("2025-03-15");

        let draft = coordinator.select_day(fresh);
        draft.client_id = Some(ClientId::new(1).unwrap());
        draft.work_description = "A".into();
        let first = coordinator.begin_save().unwrap();
        coordinator.select_day(fresh).work_description = "B".into();
        let second = coordinator.begin_save().unwrap();

        assert!(block_on(coordinator.complete_save(first)).is_err());
        assert_eq!(
            coordinator.store().get(fresh).unwrap().work_description,
            "B"
        );
        assert!(block_on(coordinator.complete_save(second)).is_err());
        assert!(!coordinator.store().contains(fresh));
    }

    #[test]
    fn accepted_earlier_save_becomes_the_fallback() {
        let mut coordinator = loaded(gateway());
        let kickoff = day("2025-03-03");

        coordinator.select_day(kickoff).work_description = "A".into();
        let first = coordinator.begin_save().unwrap();
        coordinator.select_day(kickoff).work_description = "B".into();
        let second = coordinator.begin_save().unwrap();

        block_on(coordinator.complete_save(first)).unwrap();
        let entry = coordinator.store().get(kickoff).unwrap();
        assert_eq!(entry.work_description, "B");

        coordinator.gateway().reject_saves.set(true);
        assert!(block_on(coordinator.complete_save(second)).is_err());
        let entry = coordinator.store().get(kickoff).unwrap();
        assert_eq!(entry.work_description, "A");
    }

    #[test]
    fn save_requires_an_open_draft_and_a_client() {
        let mut coordinator = loaded(gateway());
        assert_eq!(
            coordinator.begin_save().unwrap_err(),
            CoordinatorError::NotEditing
        );

        coordinator.select_day(day("2025-03-20"));
        assert_eq!(
            coordinator.begin_save().unwrap_err(),
            CoordinatorError::MissingClient
        );

        coordinator.cancel_edit();
        assert_eq!(coordinator.state(), &EditState::Idle);
    }

    #[test]
    fn progress_uses_the_resolved_proposal() {
        let mut coordinator = loaded(gateway());
        let march = YearMonth::new(2025, 3).unwrap();
        let client_id = ClientId::new(1).unwrap();

        let draft = coordinator.select_day(day("2025-03-04"));
        draft.client_id = Some(client_id);
        draft.selection.set_quantity(CreativeTemplateId::new(1).unwrap(), 4);
        draft.selection.set_quantity(CreativeTemplateId::new(2).unwrap(), 5);
        block_on(coordinator.save()).unwrap();

        let progress = coordinator.client_progress(client_id, march).unwrap();
        assert_eq!(progress.creatives_produced, 5);
        assert_eq!(progress.videos_produced, 5);
        assert_eq!(progress.percentage, 67);

        assert!(
            coordinator
                .client_progress(ClientId::new(2).unwrap(), march)
                .is_none()
        );
    }
}
