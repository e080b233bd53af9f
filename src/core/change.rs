use crate::core::location_name;
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::models::site_change::SiteChange;
use crate::utils::date::format_internet_datetime;
use chrono::{DateTime, Utc};

/// Find a stored location by display name. An exact display-name match
/// wins; otherwise the name is decoded (either naming era) and matched by
/// identity.
pub fn find_location<S: SiteStore>(store: &mut S, name: &str) -> AppResult<Location> {
    let trimmed = name.trim();
    let wanted = location_name::decode(trimmed);
    if wanted.body_part.trim().is_empty() {
        return Err(AppError::LocationNotFound(name.to_string()));
    }

    let locations = store.fetch_locations()?;
    locations
        .iter()
        .find(|l| l.display_name() == trimmed)
        .or_else(|| locations.iter().find(|l| l.identity == wanted))
        .cloned()
        .ok_or_else(|| AppError::LocationNotFound(name.to_string()))
}

pub struct ChangeLogic;

impl ChangeLogic {
    /// Record that the site moved to `location_name` at `at`.
    ///
    /// The most recent active entry is closed at `at` and a new active
    /// entry is opened. An empty note is stored as absent.
    pub fn log_change<S: SiteStore>(
        store: &mut S,
        location_name: &str,
        note: Option<&str>,
        at: DateTime<Utc>,
    ) -> AppResult<SiteChange> {
        let location = find_location(store, location_name)?;

        let active = store
            .fetch_site_changes()?
            .into_iter()
            .filter(SiteChange::is_active)
            .max_by_key(|e| e.start_time);

        if let Some(mut previous) = active {
            if at < previous.start_time {
                return Err(AppError::InvalidDate(format!(
                    "{} is before the start of the active entry ({})",
                    format_internet_datetime(&at),
                    format_internet_datetime(&previous.start_time)
                )));
            }
            previous.end_time = Some(at);
            store.update_site_change(&previous)?;
        }

        let note = note.filter(|n| !n.is_empty()).map(str::to_string);
        let created = store.insert_site_change(&SiteChange::new(at, None, note, Some(location.id)))?;

        store.save()?;
        Ok(created)
    }
}
