//! Location management: custom zones, enable/disable, delete, reorder.
//!
//! Operations act on zones, the group of locations sharing the same
//! sub-area and body part (for example both sides of `Abdomen (Front)`).

use crate::core::location_name;
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::location::{Laterality, Location, LocationIdentity};
use std::collections::HashSet;

/// Locations sharing one zone, in sort order.
#[derive(Debug, Clone)]
pub struct ZoneGroup {
    pub zone: String,
    pub is_custom: bool,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRemoval {
    /// No history referenced the zone; its locations are gone.
    Deleted(usize),
    /// History exists, so the locations were only disabled.
    Disabled(usize),
}

/// Group locations by zone, ordered by each zone's first appearance.
pub fn zone_groups(locations: &[Location]) -> Vec<ZoneGroup> {
    let mut groups: Vec<ZoneGroup> = Vec::new();
    for location in locations {
        let zone = location.identity.zone();
        match groups.iter_mut().find(|g| g.zone == zone) {
            Some(group) => group.locations.push(location.clone()),
            None => groups.push(ZoneGroup {
                zone,
                is_custom: location.is_custom(),
                locations: vec![location.clone()],
            }),
        }
    }
    groups
}

/// Resolve a user-supplied name to a zone. Accepts the zone text itself
/// ("Front Abdomen"), a display name of one of its locations, or a
/// legacy-era name.
fn resolve_zone(groups: &[ZoneGroup], name: &str) -> AppResult<usize> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::LocationNotFound(name.to_string()));
    }
    let wanted = location_name::decode(name);

    groups
        .iter()
        .position(|g| g.zone == name)
        .or_else(|| {
            groups
                .iter()
                .position(|g| g.locations.iter().any(|l| l.display_name() == name))
        })
        .or_else(|| {
            groups
                .iter()
                .position(|g| g.locations.iter().any(|l| l.identity == wanted))
        })
        .ok_or_else(|| AppError::LocationNotFound(name.to_string()))
}

pub struct LocationLogic;

impl LocationLogic {
    /// Add a custom zone after every existing location. A sided zone gets
    /// a left and a right location.
    pub fn add_custom_zone<S: SiteStore>(
        store: &mut S,
        name: &str,
        sided: bool,
    ) -> AppResult<Vec<Location>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidLocationName("name is empty".to_string()));
        }
        if name.contains(['(', ')']) {
            return Err(AppError::InvalidLocationName(format!(
                "'{}' must not contain parentheses",
                name
            )));
        }

        let base = LocationIdentity::new(name, None, None);
        if !base.is_custom() {
            return Err(AppError::InvalidLocationName(format!(
                "'{}' is reserved for default locations",
                name
            )));
        }

        let existing = store.fetch_locations()?;
        if existing.iter().any(|l| l.identity.zone() == name) {
            return Err(AppError::LocationExists(name.to_string()));
        }

        let sides: Vec<Option<Laterality>> = if sided {
            vec![Some(Laterality::Left), Some(Laterality::Right)]
        } else {
            vec![None]
        };

        let mut sort_order = existing.iter().map(|l| l.sort_order).max().unwrap_or(-1);
        let mut created = Vec::new();
        for side in sides {
            sort_order += 1;
            let identity = LocationIdentity {
                laterality: side,
                ..base.clone()
            };
            created.push(store.insert_location(&identity, sort_order)?);
        }

        store.save()?;
        Ok(created)
    }

    /// Enable or disable every location of a zone. Returns the zone and
    /// how many locations changed state.
    pub fn set_zone_enabled<S: SiteStore>(
        store: &mut S,
        name: &str,
        enabled: bool,
    ) -> AppResult<(String, usize)> {
        let groups = zone_groups(&store.fetch_locations()?);
        let group = &groups[resolve_zone(&groups, name)?];

        let mut changed = 0;
        for location in group.locations.iter().filter(|l| l.is_enabled != enabled) {
            store.update_location(&Location {
                is_enabled: enabled,
                ..location.clone()
            })?;
            changed += 1;
        }

        store.save()?;
        Ok((group.zone.clone(), changed))
    }

    /// Remove a custom zone. Zones with recorded history are disabled
    /// instead so past entries keep their location.
    pub fn delete_zone<S: SiteStore>(store: &mut S, name: &str) -> AppResult<ZoneRemoval> {
        let groups = zone_groups(&store.fetch_locations()?);
        let group = &groups[resolve_zone(&groups, name)?];

        if !group.is_custom {
            return Err(AppError::DefaultZone(group.zone.clone()));
        }

        let ids: HashSet<i64> = group.locations.iter().map(|l| l.id).collect();
        let has_history = store
            .fetch_site_changes()?
            .iter()
            .any(|e| e.location_id.is_some_and(|id| ids.contains(&id)));

        for location in &group.locations {
            if has_history {
                store.update_location(&Location {
                    is_enabled: false,
                    ..location.clone()
                })?;
            } else {
                store.delete_location(location.id)?;
            }
        }

        store.save()?;
        let count = group.locations.len();
        Ok(if has_history {
            ZoneRemoval::Disabled(count)
        } else {
            ZoneRemoval::Deleted(count)
        })
    }

    /// Move a zone to `position` (1-based, clamped) and renumber every
    /// location's sort order from 0. Returns the final position.
    pub fn move_zone<S: SiteStore>(store: &mut S, name: &str, position: usize) -> AppResult<usize> {
        let mut groups = zone_groups(&store.fetch_locations()?);
        let from = resolve_zone(&groups, name)?;

        let group = groups.remove(from);
        let to = position.saturating_sub(1).min(groups.len());
        groups.insert(to, group);

        let mut sort_order = 0;
        for location in groups.iter().flat_map(|g| g.locations.iter()) {
            if location.sort_order != sort_order {
                store.update_location(&Location {
                    sort_order,
                    ..location.clone()
                })?;
            }
            sort_order += 1;
        }

        store.save()?;
        Ok(to + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::seed_default_locations;
    use crate::db::pool::DbPool;
    use crate::models::site_change::SiteChange;
    use chrono::{TimeZone, Utc};

    fn pool_with_defaults() -> DbPool {
        let mut pool = DbPool::in_memory().unwrap();
        seed_default_locations(&mut pool).unwrap();
        pool
    }

    fn zone_order(pool: &mut DbPool) -> Vec<String> {
        zone_groups(&pool.fetch_locations().unwrap())
            .into_iter()
            .map(|g| g.zone)
            .collect()
    }

    #[test]
    fn defaults_form_seven_zones() {
        let mut pool = pool_with_defaults();
        let groups = zone_groups(&pool.fetch_locations().unwrap());
        assert_eq!(groups.len(), 7);
        assert_eq!(groups[0].zone, "Front Abdomen");
        assert_eq!(groups[0].locations.len(), 2);
        assert!(groups.iter().all(|g| !g.is_custom));
    }

    #[test]
    fn sided_custom_zone_adds_left_and_right_at_the_end() {
        let mut pool = pool_with_defaults();
        let created = LocationLogic::add_custom_zone(&mut pool, " Hip ", true).unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].display_name(), "L Hip");
        assert_eq!(created[1].display_name(), "R Hip");
        assert_eq!(created[0].sort_order, 14);
        assert_eq!(created[1].sort_order, 15);
        assert!(created.iter().all(|l| l.is_custom() && l.is_enabled));
    }

    #[test]
    fn unsided_custom_zone_adds_one_location() {
        let mut pool = DbPool::in_memory().unwrap();
        let created = LocationLogic::add_custom_zone(&mut pool, "Lower Back", false).unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].display_name(), "Lower Back");
        assert_eq!(created[0].sort_order, 0);
        assert_eq!(created[0].identity.zone(), "Lower Back");
    }

    #[test]
    fn bad_or_duplicate_names_are_rejected() {
        let mut pool = pool_with_defaults();
        LocationLogic::add_custom_zone(&mut pool, "Hip", false).unwrap();

        for name in ["", "   ", "Hip (Upper)", "Abdomen"] {
            let err = LocationLogic::add_custom_zone(&mut pool, name, true).unwrap_err();
            assert!(matches!(err, AppError::InvalidLocationName(_)), "{name}");
        }
        let err = LocationLogic::add_custom_zone(&mut pool, "Hip", true).unwrap_err();
        assert!(matches!(err, AppError::LocationExists(_)));
        assert_eq!(pool.fetch_locations().unwrap().len(), 15);
    }

    #[test]
    fn disabling_a_zone_covers_both_sides() {
        let mut pool = pool_with_defaults();
        let (zone, changed) =
            LocationLogic::set_zone_enabled(&mut pool, "L Thigh (Side)", false).unwrap();
        assert_eq!(zone, "Side Thigh");
        assert_eq!(changed, 2);

        let disabled: Vec<String> = pool
            .fetch_locations()
            .unwrap()
            .iter()
            .filter(|l| !l.is_enabled)
            .map(|l| l.display_name())
            .collect();
        assert_eq!(disabled, vec!["L Thigh (Side)", "R Thigh (Side)"]);

        let (_, changed) = LocationLogic::set_zone_enabled(&mut pool, "Side Thigh", true).unwrap();
        assert_eq!(changed, 2);
        assert!(pool.fetch_locations().unwrap().iter().all(|l| l.is_enabled));
    }

    #[test]
    fn unknown_zone_is_not_found() {
        let mut pool = pool_with_defaults();
        let err = LocationLogic::set_zone_enabled(&mut pool, "Elbow", false).unwrap_err();
        assert!(matches!(err, AppError::LocationNotFound(_)));
    }

    #[test]
    fn default_zone_cannot_be_deleted() {
        let mut pool = pool_with_defaults();
        let err = LocationLogic::delete_zone(&mut pool, "Buttock").unwrap_err();
        assert!(matches!(err, AppError::DefaultZone(_)));
        assert_eq!(pool.fetch_locations().unwrap().len(), 14);
    }

    #[test]
    fn unused_custom_zone_is_deleted() {
        let mut pool = pool_with_defaults();
        LocationLogic::add_custom_zone(&mut pool, "Hip", true).unwrap();

        let removal = LocationLogic::delete_zone(&mut pool, "Hip").unwrap();
        assert_eq!(removal, ZoneRemoval::Deleted(2));
        assert_eq!(pool.fetch_locations().unwrap().len(), 14);
    }

    #[test]
    fn custom_zone_with_history_is_disabled() {
        let mut pool = pool_with_defaults();
        let created = LocationLogic::add_custom_zone(&mut pool, "Hip", true).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        pool.insert_site_change(&SiteChange::new(start, None, None, Some(created[1].id)))
            .unwrap();
        pool.save().unwrap();

        let removal = LocationLogic::delete_zone(&mut pool, "R Hip").unwrap();
        assert_eq!(removal, ZoneRemoval::Disabled(2));

        let locations = pool.fetch_locations().unwrap();
        assert_eq!(locations.len(), 16);
        assert_eq!(locations.iter().filter(|l| !l.is_enabled).count(), 2);
        assert_eq!(pool.fetch_site_changes().unwrap()[0].location_id, Some(created[1].id));
    }

    #[test]
    fn moving_a_zone_renumbers_sort_orders() {
        let mut pool = pool_with_defaults();
        let position = LocationLogic::move_zone(&mut pool, "Buttock", 1).unwrap();
        assert_eq!(position, 1);

        let order = zone_order(&mut pool);
        assert_eq!(order[0], "Buttock");
        assert_eq!(order[1], "Front Abdomen");

        let locations = pool.fetch_locations().unwrap();
        let sort_orders: Vec<i32> = locations.iter().map(|l| l.sort_order).collect();
        assert_eq!(sort_orders, (0..14).collect::<Vec<i32>>());
        assert_eq!(locations[0].display_name(), "L Buttock");
        assert_eq!(locations[1].display_name(), "R Buttock");
    }

    #[test]
    fn move_position_is_clamped() {
        let mut pool = pool_with_defaults();
        let position = LocationLogic::move_zone(&mut pool, "Front Abdomen", 99).unwrap();
        assert_eq!(position, 7);
        assert_eq!(zone_order(&mut pool).last().map(String::as_str), Some("Front Abdomen"));
    }
}
