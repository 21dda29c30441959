use std::collections::HashMap;

use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::domain::work_entry::{CreativeItem, SaveWorkEntry, StoredWorkEntry};
use crate::models::creative_template::CreativeTemplate as DbCreativeTemplate;
use crate::models::work_entry::{
    NewWorkEntry, NewWorkEntryCreative, ReplaceWorkEntry, WorkEntry as DbWorkEntry,
    WorkEntryCreative, into_domain,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, WorkEntryListQuery, WorkEntryReader, WorkEntryWriter};
use crate::schema::{creative_templates, work_entries, work_entry_creatives};

/// Loads the creatives of `entries` and assembles the domain values, keeping
/// the order of `entries`. Creatives come back in the order they were saved.
fn with_creatives(
    conn: &mut SqliteConnection,
    entries: Vec<DbWorkEntry>,
) -> RepositoryResult<Vec<StoredWorkEntry>> {
    let ids: Vec<i32> = entries.iter().map(|entry| entry.id).collect();

    let rows = work_entry_creatives::table
        .inner_join(creative_templates::table)
        .filter(work_entry_creatives::work_entry_id.eq_any(ids))
        .order((
            work_entry_creatives::work_entry_id.asc(),
            sql::<BigInt>("work_entry_creatives.rowid").asc(),
        ))
        .select((
            WorkEntryCreative::as_select(),
            DbCreativeTemplate::as_select(),
        ))
        .load::<(WorkEntryCreative, DbCreativeTemplate)>(conn)?;

    let mut grouped: HashMap<i32, Vec<(WorkEntryCreative, DbCreativeTemplate)>> = HashMap::new();
    for (creative, template) in rows {
        grouped
            .entry(creative.work_entry_id)
            .or_default()
            .push((creative, template));
    }

    entries
        .into_iter()
        .map(|entry| {
            let creatives = grouped.remove(&entry.id).unwrap_or_default();
            into_domain(entry, creatives).map_err(RepositoryError::from)
        })
        .collect()
}

impl WorkEntryReader for DieselRepository {
    fn list_work_entries(
        &self,
        query: WorkEntryListQuery,
    ) -> RepositoryResult<Vec<StoredWorkEntry>> {
        let mut conn = self.conn()?;

        let mut items = work_entries::table.into_boxed();
        if let Some(client_id) = query.client_id {
            items = items.filter(work_entries::client_id.eq(client_id.get()));
        }
        if let Some(from) = query.from {
            items = items.filter(work_entries::entry_date.ge(from.date()));
        }
        if let Some(to) = query.to {
            items = items.filter(work_entries::entry_date.le(to.date()));
        }

        let entries = items
            .order((work_entries::entry_date.asc(), work_entries::id.asc()))
            .load::<DbWorkEntry>(&mut conn)?;

        with_creatives(&mut conn, entries)
    }
}

impl WorkEntryWriter for DieselRepository {
    fn upsert_work_entry(
        &self,
        entry: &SaveWorkEntry,
        creatives: &[CreativeItem],
    ) -> RepositoryResult<StoredWorkEntry> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let now = Utc::now().naive_utc();

            let stored = diesel::insert_into(work_entries::table)
                .values(NewWorkEntry::from(entry))
                .on_conflict((work_entries::entry_date, work_entries::client_id))
                .do_update()
                .set(ReplaceWorkEntry::new(entry, now))
                .get_result::<DbWorkEntry>(conn)?;

            diesel::delete(
                work_entry_creatives::table
                    .filter(work_entry_creatives::work_entry_id.eq(stored.id)),
            )
            .execute(conn)?;

            let new_creatives: Vec<NewWorkEntryCreative> = creatives
                .iter()
                .filter(|item| item.quantity > 0)
                .map(|item| NewWorkEntryCreative::new(stored.id, item))
                .collect();
            if !new_creatives.is_empty() {
                diesel::insert_into(work_entry_creatives::table)
                    .values(&new_creatives)
                    .execute(conn)?;
            }

            let mut saved = with_creatives(conn, vec![stored])?;
            saved.pop().ok_or(RepositoryError::NotFound)
        })
    }
}
