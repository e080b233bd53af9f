use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::change::find_location;
use crate::core::history::{HistoryFilter, HistoryLogic};
use crate::core::location_name;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::location::Location;
use crate::ui::messages::info;
use crate::utils::colors::{colorize_active, colorize_optional};
use crate::utils::date::{format_hours, format_internet_datetime, parse_date};
use crate::utils::table::Table;
use chrono::NaiveDate;

fn parse_day(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    input
        .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
        .transpose()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { location, from, to } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        // prefer the stored identity so multi-word custom names match
        let location = match location.as_deref() {
            Some(n) => Some(match find_location(&mut pool, n) {
                Ok(found) => found.identity,
                Err(_) => location_name::decode(n.trim()),
            }),
            None => None,
        };

        let filter = HistoryFilter {
            location,
            from: parse_day(from.as_ref())?,
            to: parse_day(to.as_ref())?,
        };

        let rows = HistoryLogic::list(&mut pool, &filter)?;

        if rows.is_empty() {
            info("No site changes recorded.");
            return Ok(());
        }

        let mut table = Table::new(&["id", "start", "end", "hours", "location", "note"]);
        for row in &rows {
            let entry = &row.entry;
            let end = entry
                .end_time
                .map(|e| format_internet_datetime(&e))
                .unwrap_or_else(|| "active".to_string());
            let hours = entry
                .duration_hours()
                .map(format_hours)
                .unwrap_or_else(|| "--".to_string());
            let name = row
                .location
                .as_ref()
                .map(Location::display_name)
                .unwrap_or_else(|| "--".to_string());

            table.add_row(vec![
                entry.id.to_string(),
                format_internet_datetime(&entry.start_time),
                colorize_active(&end, entry.is_active()),
                colorize_optional(&hours),
                colorize_optional(&name),
                entry.note.clone().unwrap_or_default(),
            ]);
        }

        print!("{}", table.render());
    }
    Ok(())
}
