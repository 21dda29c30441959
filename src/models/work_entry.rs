//! Diesel models for stored work entries and their produced creatives.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::types::{ClientId, CreativeTemplateId, TypeConstraintError, WorkEntryId};
use crate::domain::work_entry::{
    CreativeItem, SaveWorkEntry, StoredWorkEntry as DomainStoredWorkEntry,
};
use crate::models::creative_template::CreativeTemplate;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::work_entries)]
pub struct WorkEntry {
    pub id: i32,
    pub entry_date: NaiveDate,
    pub client_id: i32,
    pub content_description: String,
    pub description: String,
    pub notes: String,
    pub content_file: Option<String>,
    pub is_special_day: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::work_entries)]
pub struct NewWorkEntry<'a> {
    pub entry_date: NaiveDate,
    pub client_id: i32,
    pub content_description: &'a str,
    pub description: &'a str,
    pub notes: &'a str,
    pub content_file: Option<&'a str>,
    pub is_special_day: bool,
}

/// Full overwrite applied when the `(entry_date, client_id)` row already exists.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::work_entries, treat_none_as_null = true)]
pub struct ReplaceWorkEntry<'a> {
    pub content_description: &'a str,
    pub description: &'a str,
    pub notes: &'a str,
    pub content_file: Option<&'a str>,
    pub is_special_day: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::work_entry_creatives)]
pub struct WorkEntryCreative {
    pub work_entry_id: i32,
    pub creative_template_id: i32,
    pub nos: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::work_entry_creatives)]
pub struct NewWorkEntryCreative {
    pub work_entry_id: i32,
    pub creative_template_id: i32,
    pub nos: i32,
}

impl<'a> From<&'a SaveWorkEntry> for NewWorkEntry<'a> {
    fn from(entry: &'a SaveWorkEntry) -> Self {
        Self {
            entry_date: entry.date.date(),
            client_id: entry.client_id.get(),
            content_description: entry.content_description.as_str(),
            description: entry.description.as_str(),
            notes: entry.notes.as_str(),
            content_file: entry.content_file.as_deref(),
            is_special_day: entry.is_special_day,
        }
    }
}

impl<'a> ReplaceWorkEntry<'a> {
    pub fn new(entry: &'a SaveWorkEntry, now: NaiveDateTime) -> Self {
        Self {
            content_description: entry.content_description.as_str(),
            description: entry.description.as_str(),
            notes: entry.notes.as_str(),
            content_file: entry.content_file.as_deref(),
            is_special_day: entry.is_special_day,
            updated_at: now,
        }
    }
}

impl NewWorkEntryCreative {
    pub fn new(work_entry_id: i32, item: &CreativeItem) -> Self {
        Self {
            work_entry_id,
            creative_template_id: item.template_id.get(),
            nos: i32::try_from(item.quantity).unwrap_or(i32::MAX),
        }
    }
}

/// Joins a stored entry with its creatives and their templates.
pub fn into_domain(
    entry: WorkEntry,
    creatives: Vec<(WorkEntryCreative, CreativeTemplate)>,
) -> Result<DomainStoredWorkEntry, TypeConstraintError> {
    let creatives = creatives
        .into_iter()
        .map(|(creative, template)| {
            Ok(CreativeItem {
                template_id: CreativeTemplateId::try_from(creative.creative_template_id)?,
                name: template.name,
                quantity: u32::try_from(creative.nos).unwrap_or(0),
            })
        })
        .collect::<Result<Vec<_>, TypeConstraintError>>()?;

    Ok(DomainStoredWorkEntry {
        id: WorkEntryId::try_from(entry.id)?,
        entry_date: entry.entry_date,
        client_id: ClientId::try_from(entry.client_id)?,
        content_description: entry.content_description,
        description: entry.description,
        notes: entry.notes,
        content_file: entry.content_file,
        is_special_day: entry.is_special_day,
        creatives,
        created_at: entry.created_at,
        updated_at: entry.updated_at,
    })
}
