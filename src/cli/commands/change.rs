use super::parse_optional_datetime;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::change::ChangeLogic;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::format_internet_datetime;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Change { location, note, at } = cmd {
        let at = parse_optional_datetime(at.as_ref())?.unwrap_or_else(Utc::now);

        let mut pool = DbPool::new(&cfg.database)?;
        let entry = ChangeLogic::log_change(&mut pool, location, note.as_deref(), at)?;

        ttlog_or_warn(
            &pool.conn,
            "change",
            location,
            &format!("Entry {} started at {}", entry.id, format_internet_datetime(&entry.start_time)),
        );

        success(format!(
            "Site changed to {} at {}",
            location.trim(),
            format_internet_datetime(&entry.start_time)
        ));
    }
    Ok(())
}
