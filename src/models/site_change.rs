use chrono::{DateTime, Utc};
use crate::utils::date::hours_between;
use serde::Serialize;

/// A persisted dwell interval: the site was placed at `location_id` from
/// `start_time` until `end_time` (absent while still active).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteChange {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub location_id: Option<i64>,
}

impl SiteChange {
    /// Build an unsaved entry (id is assigned on insert).
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        note: Option<String>,
        location_id: Option<i64>,
    ) -> Self {
        Self {
            id: 0,
            start_time,
            end_time,
            note,
            location_id,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn duration_hours(&self) -> Option<f64> {
        self.end_time.map(|end| hours_between(self.start_time, end))
    }
}
