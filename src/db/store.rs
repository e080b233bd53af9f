//! Persistence seam used by the import/export and history logic.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::location::{Location, LocationIdentity};
use crate::models::site_change::SiteChange;

/// Object-store style access to locations and site changes.
///
/// Mutations are buffered until `save()`; an implementation that is
/// dropped before saving discards them.
pub trait SiteStore {
    /// Every location, ordered by sort order.
    fn fetch_locations(&mut self) -> AppResult<Vec<Location>>;

    /// Every site change, in no particular order.
    fn fetch_site_changes(&mut self) -> AppResult<Vec<SiteChange>>;

    fn insert_location(
        &mut self,
        identity: &LocationIdentity,
        sort_order: i32,
    ) -> AppResult<Location>;

    fn update_location(&mut self, location: &Location) -> AppResult<()>;

    /// Returns the stored entry with its assigned id.
    fn insert_site_change(&mut self, entry: &SiteChange) -> AppResult<SiteChange>;

    fn update_site_change(&mut self, entry: &SiteChange) -> AppResult<()>;

    fn delete_location(&mut self, id: i64) -> AppResult<()>;

    fn delete_site_change(&mut self, id: i64) -> AppResult<()>;

    fn save(&mut self) -> AppResult<()>;
}

impl SiteStore for DbPool {
    fn fetch_locations(&mut self) -> AppResult<Vec<Location>> {
        queries::load_locations(&self.conn)
    }

    fn fetch_site_changes(&mut self) -> AppResult<Vec<SiteChange>> {
        queries::load_site_changes(&self.conn)
    }

    fn insert_location(
        &mut self,
        identity: &LocationIdentity,
        sort_order: i32,
    ) -> AppResult<Location> {
        self.begin_if_needed()?;
        let id = queries::insert_location(&self.conn, identity, sort_order, true)?;
        Ok(Location {
            id,
            identity: identity.clone(),
            is_enabled: true,
            sort_order,
        })
    }

    fn insert_site_change(&mut self, entry: &SiteChange) -> AppResult<SiteChange> {
        self.begin_if_needed()?;
        let id = queries::insert_site_change(&self.conn, entry)?;
        Ok(SiteChange {
            id,
            ..entry.clone()
        })
    }

    fn update_location(&mut self, location: &Location) -> AppResult<()> {
        self.begin_if_needed()?;
        queries::update_location(&self.conn, location)
    }

    fn update_site_change(&mut self, entry: &SiteChange) -> AppResult<()> {
        self.begin_if_needed()?;
        queries::update_site_change(&self.conn, entry)
    }

    fn delete_location(&mut self, id: i64) -> AppResult<()> {
        self.begin_if_needed()?;
        queries::delete_location(&self.conn, id)
    }

    fn delete_site_change(&mut self, id: i64) -> AppResult<()> {
        self.begin_if_needed()?;
        queries::delete_site_change(&self.conn, id)
    }

    fn save(&mut self) -> AppResult<()> {
        self.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::Laterality;
    use chrono::{TimeZone, Utc};

    #[test]
    fn unsaved_changes_are_rolled_back_on_drop() {
        let dir = std::env::temp_dir().join("sitecycle_store_rollback.sqlite");
        let path = dir.to_string_lossy().to_string();
        std::fs::remove_file(&path).ok();

        {
            let mut pool = DbPool::new(&path).unwrap();
            pool.insert_location(&LocationIdentity::new("Arm", None, None), 0)
                .unwrap();
            pool.save().unwrap();
            pool.insert_location(&LocationIdentity::new("Thigh", None, None), 1)
                .unwrap();
            assert!(pool.has_pending_changes());
        }

        let mut pool = DbPool::new(&path).unwrap();
        let names: Vec<String> = pool
            .fetch_locations()
            .unwrap()
            .iter()
            .map(|l| l.display_name())
            .collect();
        assert_eq!(names, vec!["Arm".to_string()]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn site_change_round_trips_through_sqlite() {
        let mut pool = DbPool::in_memory().unwrap();
        let loc = pool
            .insert_location(
                &LocationIdentity::new("Abdomen", Some("Front"), Some(Laterality::Left)),
                0,
            )
            .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let entry = SiteChange::new(
            start,
            Some(start + chrono::Duration::minutes(90)),
            Some("ok".into()),
            Some(loc.id),
        );
        let saved = pool.insert_site_change(&entry).unwrap();
        pool.save().unwrap();

        let all = pool.fetch_site_changes().unwrap();
        assert_eq!(all, vec![saved]);
        assert_eq!(all[0].duration_hours(), Some(1.5));

        let locations = pool.fetch_locations().unwrap();
        assert_eq!(locations[0].display_name(), "L Abdomen (Front)");
        assert!(!locations[0].is_custom());
    }

    #[test]
    fn deleting_a_location_detaches_its_entries() {
        let mut pool = DbPool::in_memory().unwrap();
        let loc = pool
            .insert_location(&LocationIdentity::new("Shoulder", None, None), 0)
            .unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        pool.insert_site_change(&SiteChange::new(start, None, None, Some(loc.id)))
            .unwrap();
        pool.delete_location(loc.id).unwrap();
        pool.save().unwrap();

        let entries = pool.fetch_site_changes().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location_id, None);
    }

    #[test]
    fn updated_location_is_persisted() {
        let mut pool = DbPool::in_memory().unwrap();
        let mut loc = pool
            .insert_location(&LocationIdentity::new("Hip", None, Some(Laterality::Right)), 3)
            .unwrap();
        loc.is_enabled = false;
        loc.sort_order = 7;
        pool.update_location(&loc).unwrap();
        pool.save().unwrap();

        let stored = &pool.fetch_locations().unwrap()[0];
        assert!(!stored.is_enabled);
        assert_eq!(stored.sort_order, 7);
        assert_eq!(stored.display_name(), "R Hip");
    }
}
