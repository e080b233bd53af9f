use super::parse_optional_datetime;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::{EntryUpdate, HistoryLogic};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        location,
        start,
        end,
        note,
        reopen,
    } = cmd
    {
        let update = EntryUpdate {
            location: location.clone(),
            start_time: parse_optional_datetime(start.as_ref())?,
            end_time: parse_optional_datetime(end.as_ref())?,
            note: note.clone(),
            reopen: *reopen,
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let entry = HistoryLogic::update(&mut pool, *id, &update)?;

        ttlog_or_warn(
            &pool.conn,
            "edit",
            &id.to_string(),
            &format!("Entry {} updated", entry.id),
        );
        success(format!("Entry {} updated", entry.id));
    }
    Ok(())
}
