//! Full-replace CSV import.
//!
//! Flow: decode text → check header → wipe the store → rebuild locations and
//! site changes row by row, recording rows that cannot be used.

use crate::core::location_name;
use crate::csvio::{HEADER, tokenize};
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::dwell_record::{ImportOutcome, SkippedRow};
use crate::models::location::Location;
use crate::models::site_change::SiteChange;
use crate::ui::messages::error;
use crate::utils::date::parse_internet_datetime;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub struct ImportLogic;

impl ImportLogic {
    /// Read `path` and import it. Any read or UTF-8 failure is `UnreadableFile`.
    pub fn import_file<S: SiteStore>(store: &mut S, path: &Path) -> AppResult<ImportOutcome> {
        let bytes = fs::read(path).map_err(|_| AppError::UnreadableFile)?;
        Self::import_bytes(store, &bytes)
    }

    pub fn import_bytes<S: SiteStore>(store: &mut S, bytes: &[u8]) -> AppResult<ImportOutcome> {
        let text = std::str::from_utf8(bytes).map_err(|_| AppError::UnreadableFile)?;
        Self::import_str(store, text)
    }

    /// Replace the whole dataset with the rows of `csv`.
    ///
    /// Header and empty-document failures leave the store untouched. Once
    /// the header is valid and at least one data row exists, existing data
    /// is deleted and committed *before* rows are parsed, so a file whose
    /// every row is bad still wipes the store and then fails with
    /// `NoValidEntries`.
    pub fn import_str<S: SiteStore>(store: &mut S, csv: &str) -> AppResult<ImportOutcome> {
        let rows = tokenize(csv);

        let header = rows.first().ok_or(AppError::InvalidHeader)?;
        check_header(header)?;

        let data_rows = &rows[1..];
        if data_rows.is_empty() {
            return Err(AppError::NoValidEntries);
        }

        delete_all(store)?;

        let mut cache: HashMap<String, Location> = HashMap::new();
        let mut sort_order = 0;
        let mut outcome = ImportOutcome::default();

        for (index, row) in data_rows.iter().enumerate() {
            let row_number = index + 2;

            if row.len() < HEADER.len() {
                skip(
                    &mut outcome,
                    row_number,
                    format!("too few columns ({} found, 4 required)", row.len()),
                );
                continue;
            }

            let (date_raw, display_name, duration_raw, note) =
                (&row[0], &row[1], &row[2], &row[3]);

            let Some(start_time) = parse_internet_datetime(date_raw) else {
                skip(
                    &mut outcome,
                    row_number,
                    format!("unrecognized date '{}'", date_raw),
                );
                continue;
            };

            let location = resolve_location(store, &mut cache, &mut sort_order, display_name)?;

            let entry = SiteChange::new(
                start_time,
                end_time_from_hours(start_time, duration_raw),
                (!note.is_empty()).then(|| note.clone()),
                Some(location.id),
            );
            store.insert_site_change(&entry)?;
            outcome.imported_count += 1;
        }

        if outcome.imported_count == 0 {
            return Err(AppError::NoValidEntries);
        }

        store.save()?;
        Ok(outcome)
    }
}

fn check_header(header: &[String]) -> AppResult<()> {
    let normalized: Vec<&str> = header.iter().map(|f| f.trim()).collect();
    if normalized == HEADER {
        return Ok(());
    }

    let quote = |fields: &[&str]| {
        fields
            .iter()
            .map(|f| format!("\"{f}\""))
            .collect::<Vec<_>>()
            .join(", ")
    };
    error(format!(
        "Invalid header: got [{}], want [{}]",
        quote(&normalized[..]),
        quote(&HEADER[..])
    ));
    Err(AppError::InvalidHeader)
}

/// Remove every site change and every location, then commit.
fn delete_all<S: SiteStore>(store: &mut S) -> AppResult<()> {
    for entry in store.fetch_site_changes()? {
        store.delete_site_change(entry.id)?;
    }
    for location in store.fetch_locations()? {
        store.delete_location(location.id)?;
    }
    store.save()
}

/// One persisted location per distinct raw display string.
fn resolve_location<S: SiteStore>(
    store: &mut S,
    cache: &mut HashMap<String, Location>,
    sort_order: &mut i32,
    name: &str,
) -> AppResult<Location> {
    if let Some(found) = cache.get(name) {
        return Ok(found.clone());
    }

    let identity = location_name::decode(name);
    let location = store.insert_location(&identity, *sort_order)?;
    *sort_order += 1;
    cache.insert(name.to_string(), location.clone());
    Ok(location)
}

/// Empty, non-numeric or out-of-range durations mean "still active".
fn end_time_from_hours(start: DateTime<Utc>, raw: &str) -> Option<DateTime<Utc>> {
    let hours: f64 = raw.parse().ok()?;
    if !hours.is_finite() {
        return None;
    }
    let delta = TimeDelta::try_milliseconds((hours * 3_600_000.0).round() as i64)?;
    start.checked_add_signed(delta)
}

fn skip(outcome: &mut ImportOutcome, row_number: usize, reason: String) {
    outcome.skipped_rows.push(SkippedRow { row_number, reason });
}
