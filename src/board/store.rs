//! Date-keyed store of work entries.
//!
//! The store holds at most one entry per calendar day, regardless of client.
//! When several rows land on the same day the last one wins.

use std::collections::BTreeMap;

use crate::board::codec;
use crate::domain::creative::TemplateCatalog;
use crate::domain::types::{ClientId, DayKey, YearMonth, parse_quantity};
use crate::domain::work_entry::{CreativeItem, WorkEntry, WorkEntryRow};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkEntryStore {
    entries: BTreeMap<DayKey, WorkEntry>,
}

impl WorkEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from backend rows. Rows with an unparseable date are
    /// skipped.
    pub fn build(rows: impl IntoIterator<Item = WorkEntryRow>, catalog: &TemplateCatalog) -> Self {
        let mut store = Self::new();
        for row in rows {
            let day = match DayKey::parse(&row.date) {
                Ok(day) => day,
                Err(err) => {
                    log::warn!(
                        "Skipping work entry for client {} with bad date: {err}",
                        row.client_id
                    );
                    continue;
                }
            };
            store.entries.insert(day, entry_from_row(row, catalog));
        }
        store
    }

    pub fn get(&self, day: DayKey) -> Option<&WorkEntry> {
        self.entries.get(&day)
    }

    /// Replaces the entry for `day` wholesale, returning the previous one.
    pub fn upsert(&mut self, day: DayKey, entry: WorkEntry) -> Option<WorkEntry> {
        self.entries.insert(day, entry)
    }

    /// Puts back a previously captured value for `day`, or clears the day.
    pub fn restore(&mut self, day: DayKey, previous: Option<WorkEntry>) {
        match previous {
            Some(entry) => {
                self.entries.insert(day, entry);
            }
            None => {
                self.entries.remove(&day);
            }
        }
    }

    /// Returns a copy limited to `client_id`; `None` keeps every entry.
    pub fn filter_by_client(&self, client_id: Option<ClientId>) -> Self {
        match client_id {
            None => self.clone(),
            Some(client_id) => Self {
                entries: self
                    .entries
                    .iter()
                    .filter(|(_, entry)| entry.client_id == client_id)
                    .map(|(day, entry)| (*day, entry.clone()))
                    .collect(),
            },
        }
    }

    /// Entries of one month in date order.
    pub fn in_month(&self, month: YearMonth) -> impl Iterator<Item = (DayKey, &WorkEntry)> {
        self.entries
            .iter()
            .filter(move |(day, _)| month.contains(**day))
            .map(|(day, entry)| (*day, entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &WorkEntry)> {
        self.entries.iter().map(|(day, entry)| (*day, entry))
    }

    pub fn contains(&self, day: DayKey) -> bool {
        self.entries.contains_key(&day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_from_row(row: WorkEntryRow, catalog: &TemplateCatalog) -> WorkEntry {
    let items = codec::decode(&row.description, catalog);
    let creative_works = row
        .creatives
        .into_iter()
        .map(|creative| CreativeItem {
            template_id: creative.id,
            quantity: parse_quantity(creative.nos.as_ref()),
            name: creative.name,
        })
        .collect();

    WorkEntry {
        client_id: row.client_id,
        work_description: row.content_description,
        items,
        notes: row.notes,
        creative_works,
        content_file: row.content_file,
        is_special_day: row.is_special_day,
    }
}
