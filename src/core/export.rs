//! CSV export: persisted entries → dwell records → document text.

use crate::config::Config;
use crate::csvio::write_document;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::dwell_record::DwellRecord;
use crate::models::location::Location;
use crate::ui::messages::success;
use crate::utils::date::today;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A rendered export ready to be written somewhere.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
    pub record_count: usize,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Render every persisted entry, oldest first.
    pub fn build<S: SiteStore>(store: &mut S) -> AppResult<ExportDocument> {
        let records = Self::records(store)?;
        Ok(ExportDocument {
            file_name: Self::file_name(today()),
            contents: write_document(&records),
            record_count: records.len(),
        })
    }

    /// Dwell records sorted by start time, each carrying its location's
    /// current display name (empty when the entry has no location).
    pub fn records<S: SiteStore>(store: &mut S) -> AppResult<Vec<DwellRecord>> {
        let locations: HashMap<i64, Location> = store
            .fetch_locations()?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let mut entries = store.fetch_site_changes()?;
        entries.sort_by_key(|e| e.start_time);

        Ok(entries
            .into_iter()
            .map(|entry| DwellRecord {
                start_time: entry.start_time,
                end_time: entry.end_time,
                location_display_name: entry
                    .location_id
                    .and_then(|id| locations.get(&id))
                    .map(Location::display_name)
                    .unwrap_or_default(),
                note: entry.note,
            })
            .collect())
    }

    /// `sitecycle-export-<yyyy-MM-dd>.csv`
    pub fn file_name(date: NaiveDate) -> String {
        format!("sitecycle-export-{}.csv", date.format("%Y-%m-%d"))
    }

    /// Write the export to `file`, or to `<export_dir>/<suggested name>`.
    /// An existing file is only replaced when `force` is set.
    pub fn export_to_file(
        pool: &mut DbPool,
        cfg: &Config,
        file: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let doc = Self::build(pool)?;

        let path = match file {
            Some(f) => expand_tilde(f),
            None => expand_tilde(&cfg.export_dir).join(&doc.file_name),
        };

        if path.exists() && !force {
            return Err(AppError::Export(format!(
                "'{}' already exists (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, &doc.contents)?;

        success(format!(
            "Exported {} entr{} to {}",
            doc.record_count,
            if doc.record_count == 1 { "y" } else { "ies" },
            path.display()
        ));

        ttlog_or_warn(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} entries", doc.record_count),
        );

        Ok(path)
    }
}
