use crate::core::change::find_location;
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::location::{Location, LocationIdentity};
use crate::models::site_change::SiteChange;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Optional filters for the history listing. Date bounds are inclusive
/// whole UTC days applied to the entry start time.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub location: Option<LocationIdentity>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl HistoryFilter {
    fn matches(&self, entry: &SiteChange, location: Option<&Location>) -> bool {
        if let Some(wanted) = &self.location
            && location.map(|l| &l.identity) != Some(wanted)
        {
            return false;
        }

        let day = entry.start_time.date_naive();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub entry: SiteChange,
    pub location: Option<Location>,
}

/// Fields to change on an existing entry; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub reopen: bool,
}

pub struct HistoryLogic;

impl HistoryLogic {
    /// Entries matching `filter`, newest first.
    pub fn list<S: SiteStore>(store: &mut S, filter: &HistoryFilter) -> AppResult<Vec<HistoryRow>> {
        let locations: HashMap<i64, Location> = store
            .fetch_locations()?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let mut rows: Vec<HistoryRow> = store
            .fetch_site_changes()?
            .into_iter()
            .filter_map(|entry| {
                let location = entry.location_id.and_then(|id| locations.get(&id));
                filter.matches(&entry, location).then(|| HistoryRow {
                    location: location.cloned(),
                    entry,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.entry.start_time.cmp(&a.entry.start_time));
        Ok(rows)
    }

    pub fn delete<S: SiteStore>(store: &mut S, id: i64) -> AppResult<SiteChange> {
        let entry = find_entry(store, id)?;
        store.delete_site_change(id)?;
        store.save()?;
        Ok(entry)
    }

    pub fn update<S: SiteStore>(store: &mut S, id: i64, update: &EntryUpdate) -> AppResult<SiteChange> {
        let mut entry = find_entry(store, id)?;

        if let Some(name) = &update.location {
            entry.location_id = Some(find_location(store, name)?.id);
        }
        if let Some(start) = update.start_time {
            entry.start_time = start;
        }
        if let Some(end) = update.end_time {
            entry.end_time = Some(end);
        }
        if let Some(note) = &update.note {
            entry.note = (!note.is_empty()).then(|| note.clone());
        }
        if update.reopen {
            entry.end_time = None;
        }

        if let Some(end) = entry.end_time
            && end < entry.start_time
        {
            return Err(AppError::InvalidDate(
                "end time is before start time".to_string(),
            ));
        }

        store.update_site_change(&entry)?;
        store.save()?;
        Ok(entry)
    }
}

fn find_entry<S: SiteStore>(store: &mut S, id: i64) -> AppResult<SiteChange> {
    store
        .fetch_site_changes()?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or(AppError::EntryNotFound(id))
}
