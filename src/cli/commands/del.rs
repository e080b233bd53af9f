use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::format_internet_datetime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let removed = HistoryLogic::delete(&mut pool, *id)?;

        let message = format!(
            "Deleted entry {} started at {}",
            removed.id,
            format_internet_datetime(&removed.start_time)
        );
        ttlog_or_warn(&pool.conn, "del", &id.to_string(), &message);
        success(message);
    }
    Ok(())
}
