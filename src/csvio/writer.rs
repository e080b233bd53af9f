//! CSV serializer for dwell records.

use crate::csvio::HEADER;
use crate::models::dwell_record::DwellRecord;
use crate::utils::date::{format_hours, format_internet_datetime};

/// Quote `value` only when it contains a comma, a quote or a line break.
/// Empty fields are never quoted.
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one record as a CSV line, without the terminating newline.
pub fn record_line(record: &DwellRecord) -> String {
    let duration = record
        .duration_hours()
        .map(format_hours)
        .unwrap_or_default();

    [
        format_internet_datetime(&record.start_time),
        escape_field(&record.location_display_name),
        duration,
        escape_field(record.note.as_deref().unwrap_or("")),
    ]
    .join(",")
}

/// Build the full document: header plus one line per record, ordered by
/// ascending start time. Every line ends with `\n`.
pub fn write_document(records: &[DwellRecord]) -> String {
    let mut sorted: Vec<&DwellRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.start_time);

    let mut out = HEADER.join(",");
    out.push('\n');

    for record in sorted {
        out.push_str(&record_line(record));
        out.push('\n');
    }

    out
}
