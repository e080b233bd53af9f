use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::seed::seed_default_locations;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), opens
/// the database so pending migrations run, then seeds the default
/// locations when enabled and the store is still empty.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    info("Initializing SiteCycle…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);

    let mut pool = DbPool::new(&cfg.database)?;

    let seeded = if cfg.seed_defaults {
        seed_default_locations(&mut pool)?
    } else {
        0
    };
    if seeded > 0 {
        info(format!("Seeded {} default locations", seeded));
    }

    ttlog_or_warn(
        &pool.conn,
        "init",
        &cfg.database,
        &format!("Database initialized ({} locations seeded)", seeded),
    );

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
