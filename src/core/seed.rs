use crate::db::store::SiteStore;
use crate::errors::AppResult;
use crate::models::location::{Laterality, LocationIdentity};

/// Default zones, each seeded once per side.
const DEFAULT_ZONES: [(&str, Option<&str>); 7] = [
    ("Abdomen", Some("Front")),
    ("Abdomen", Some("Side")),
    ("Abdomen", Some("Back")),
    ("Thigh", Some("Front")),
    ("Thigh", Some("Side")),
    ("Arm", Some("Back")),
    ("Buttock", None),
];

/// Insert the 14 default locations when the store has none.
/// Returns how many were created.
pub fn seed_default_locations<S: SiteStore>(store: &mut S) -> AppResult<usize> {
    if !store.fetch_locations()?.is_empty() {
        return Ok(0);
    }

    let mut sort_order = 0;
    for (body_part, sub_area) in DEFAULT_ZONES {
        for side in [Laterality::Left, Laterality::Right] {
            let identity = LocationIdentity::new(body_part, sub_area, Some(side));
            store.insert_location(&identity, sort_order)?;
            sort_order += 1;
        }
    }

    store.save()?;
    Ok(sort_order as usize)
}
