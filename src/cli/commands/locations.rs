use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::locations::{LocationLogic, ZoneRemoval};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::store::SiteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Locations {
        add,
        sided,
        enable,
        disable,
        delete,
        move_zone,
        to,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            let created = LocationLogic::add_custom_zone(&mut pool, name, *sided)?;
            let names: Vec<String> = created.iter().map(|l| l.display_name()).collect();
            let message = format!("Added {}", names.join(", "));
            ttlog_or_warn(&pool.conn, "locations", name.trim(), &message);
            success(message);
        } else if let Some(name) = enable.as_ref().or(disable.as_ref()) {
            let enabled = enable.is_some();
            let (zone, changed) = LocationLogic::set_zone_enabled(&mut pool, name, enabled)?;
            let state = if enabled { "enabled" } else { "disabled" };
            let message = format!("Zone '{}' {} ({} location(s) changed)", zone, state, changed);
            ttlog_or_warn(&pool.conn, "locations", &zone, &message);
            success(message);
        } else if let Some(name) = delete {
            let message = match LocationLogic::delete_zone(&mut pool, name)? {
                ZoneRemoval::Deleted(n) => {
                    let message = format!("Deleted {} location(s) of '{}'", n, name.trim());
                    success(&message);
                    message
                }
                ZoneRemoval::Disabled(n) => {
                    let message = format!(
                        "'{}' has recorded history: disabled {} location(s) instead of deleting",
                        name.trim(),
                        n
                    );
                    warning(&message);
                    message
                }
            };
            ttlog_or_warn(&pool.conn, "locations", name.trim(), &message);
        } else if let (Some(name), Some(position)) = (move_zone, to) {
            let position = LocationLogic::move_zone(&mut pool, name, *position)?;
            let message = format!("Moved '{}' to position {}", name.trim(), position);
            ttlog_or_warn(&pool.conn, "locations", name.trim(), &message);
            success(message);
        } else {
            print_locations(&mut pool)?;
        }
    }
    Ok(())
}

fn print_locations(pool: &mut DbPool) -> AppResult<()> {
    let locations = pool.fetch_locations()?;

    if locations.is_empty() {
        info("No locations configured. Run `sitecycle init` or import a CSV export.");
        return Ok(());
    }

    let mut table = Table::new(&["#", "location", "zone", "kind", "enabled"]);
    for loc in &locations {
        let kind = if loc.is_custom() {
            format!("{CYAN}custom{RESET}")
        } else {
            "default".to_string()
        };
        let enabled = if loc.is_enabled {
            "yes".to_string()
        } else {
            format!("{GREY}no{RESET}")
        };

        table.add_row(vec![
            loc.sort_order.to_string(),
            loc.display_name(),
            loc.identity.zone(),
            kind,
            enabled,
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
