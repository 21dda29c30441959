use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, CreativeTemplateId, DayKey, LooseScalar, WorkEntryId};

/// A creative template reference with a resolved name and a validated quantity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreativeItem {
    pub template_id: CreativeTemplateId,
    pub name: String,
    pub quantity: u32,
}

/// What was produced for a client on one calendar day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkEntry {
    pub client_id: ClientId,
    /// Free text summary of the day's work.
    pub work_description: String,
    /// Decoded form of the serialized creative selection.
    pub items: Vec<CreativeItem>,
    pub notes: String,
    pub creative_works: Vec<CreativeItem>,
    /// Opaque reference to a supporting file.
    pub content_file: Option<String>,
    pub is_special_day: bool,
}

/// Creative as reported by the backend; `nos` is loosely typed upstream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawCreative {
    pub id: CreativeTemplateId,
    pub name: String,
    #[serde(default)]
    pub nos: Option<LooseScalar>,
}

/// A work entry exactly as listed by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkEntryRow {
    /// `YYYY-MM-DD`, possibly followed by a time component.
    pub date: String,
    pub client_id: ClientId,
    #[serde(default)]
    pub content_description: String,
    /// Serialized creative selection.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub creatives: Vec<RawCreative>,
    #[serde(default)]
    pub is_special_day: bool,
    #[serde(default)]
    pub content_file: Option<String>,
}

/// Payload persisted when a day is saved. Always overwrites the whole entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveWorkEntry {
    pub date: DayKey,
    pub client_id: ClientId,
    /// Serialized creative selection.
    pub description: String,
    pub content_description: String,
    pub notes: String,
    pub content_file: Option<String>,
    pub is_special_day: bool,
}

/// Work entry as stored by the backend, including derived creatives.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredWorkEntry {
    pub id: WorkEntryId,
    pub entry_date: NaiveDate,
    pub client_id: ClientId,
    pub content_description: String,
    pub description: String,
    pub notes: String,
    pub content_file: Option<String>,
    pub is_special_day: bool,
    pub creatives: Vec<CreativeItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<StoredWorkEntry> for WorkEntryRow {
    fn from(entry: StoredWorkEntry) -> Self {
        Self {
            date: DayKey::from(entry.entry_date).to_string(),
            client_id: entry.client_id,
            content_description: entry.content_description,
            description: entry.description,
            notes: entry.notes,
            creatives: entry
                .creatives
                .into_iter()
                .map(|c| RawCreative {
                    id: c.template_id,
                    name: c.name,
                    nos: Some(LooseScalar::Text(c.quantity.to_string())),
                })
                .collect(),
            is_special_day: entry.is_special_day,
            content_file: entry.content_file,
        }
    }
}
