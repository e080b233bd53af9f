use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::models::dwell_record::ImportOutcome;
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let path = expand_tilde(file);
        let entries_before = pool.fetch_site_changes()?.len();

        match ImportLogic::import_file(&mut pool, &path) {
            Ok(outcome) => {
                ttlog_or_warn(
                    &pool.conn,
                    "import",
                    &path.to_string_lossy(),
                    &format!(
                        "Imported {} entries, skipped {} rows",
                        outcome.imported_count,
                        outcome.skipped_rows.len()
                    ),
                );

                if *json {
                    let out = serde_json::to_string_pretty(&outcome)
                        .map_err(|e| AppError::Other(e.to_string()))?;
                    println!("{}", out);
                } else {
                    print_report(&outcome);
                }
            }
            Err(AppError::NoValidEntries) => {
                // The replace is committed before rows are read.
                let entries_after = pool.fetch_site_changes()?.len();
                if entries_before > 0 && entries_after == 0 {
                    warning(format!(
                        "Existing data was removed: {} entries deleted, none imported",
                        entries_before
                    ));
                }
                return Err(AppError::NoValidEntries);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn print_report(outcome: &ImportOutcome) {
    success(format!(
        "Imported {} entr{}",
        outcome.imported_count,
        if outcome.imported_count == 1 { "y" } else { "ies" }
    ));

    if outcome.skipped_rows.is_empty() {
        return;
    }

    warning(format!("Skipped {} row(s):", outcome.skipped_rows.len()));
    for skipped in &outcome.skipped_rows {
        println!("   Row {}: {}", skipped.row_number, skipped.reason);
    }
}
