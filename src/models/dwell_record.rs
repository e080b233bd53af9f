use chrono::{DateTime, Utc};
use crate::utils::date::hours_between;
use serde::Serialize;

/// One row of import/export data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DwellRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub location_display_name: String,
    pub note: Option<String>,
}

impl DwellRecord {
    pub fn duration_hours(&self) -> Option<f64> {
        self.end_time.map(|end| hours_between(self.start_time, end))
    }
}

/// A data row the importer could not use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line in the file; the header is row 1.
    pub row_number: usize,
    pub reason: String,
}

/// Result of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub imported_count: usize,
    pub skipped_rows: Vec<SkippedRow>,
}
