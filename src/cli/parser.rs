use clap::{Parser, Subcommand};

/// Command-line interface definition for SiteCycle
/// CLI application to track infusion site rotations with SQLite
#[derive(Parser)]
#[command(
    name = "sitecycle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track where your infusion site is placed and for how long, with CSV import/export",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration, seeding default locations
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// List locations, or manage zones (add, enable, disable, delete, move)
    Locations {
        #[arg(
            long,
            value_name = "ZONE",
            help = "Add a custom zone",
            conflicts_with_all = ["enable", "disable", "delete", "move_zone"]
        )]
        add: Option<String>,

        #[arg(long, requires = "add", help = "Create a left and a right location for the new zone")]
        sided: bool,

        #[arg(
            long,
            value_name = "ZONE",
            help = "Enable every location of a zone",
            conflicts_with_all = ["disable", "delete", "move_zone"]
        )]
        enable: Option<String>,

        #[arg(
            long,
            value_name = "ZONE",
            help = "Disable every location of a zone",
            conflicts_with_all = ["delete", "move_zone"]
        )]
        disable: Option<String>,

        #[arg(
            long,
            value_name = "ZONE",
            help = "Delete a custom zone (disabled instead when it has history)",
            conflicts_with = "move_zone"
        )]
        delete: Option<String>,

        #[arg(long = "move", value_name = "ZONE", requires = "to", help = "Move a zone")]
        move_zone: Option<String>,

        #[arg(long, value_name = "POSITION", requires = "move_zone", help = "1-based zone position")]
        to: Option<usize>,
    },

    /// Record a site change: close the active entry and start a new one
    Change {
        /// Location display name, e.g. "L Abdomen (Front)"
        location: String,

        #[arg(long, help = "Optional note for the new site")]
        note: Option<String>,

        #[arg(
            long,
            value_name = "ISO8601",
            help = "Time of the change (default: now), e.g. 2026-02-07T15:30:00Z"
        )]
        at: Option<String>,
    },

    /// List site change history, newest first
    History {
        #[arg(long, help = "Only entries at this location")]
        location: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only entries starting on or after this day")]
        from: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Only entries starting on or before this day")]
        to: Option<String>,
    },

    /// Delete a site change entry
    Del {
        #[arg(long, help = "Entry id (see `history`)")]
        id: i64,
    },

    /// Edit a site change entry
    Edit {
        #[arg(long, help = "Entry id (see `history`)")]
        id: i64,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, value_name = "ISO8601")]
        start: Option<String>,

        #[arg(long, value_name = "ISO8601", conflicts_with = "reopen")]
        end: Option<String>,

        #[arg(long)]
        note: Option<String>,

        #[arg(long, help = "Clear the end time, making the entry active again")]
        reopen: bool,
    },

    /// Replace all data with the contents of a CSV export
    Import {
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(long, help = "Print the import report as JSON")]
        json: bool,
    },

    /// Export all entries as CSV
    Export {
        #[arg(long, value_name = "FILE", help = "Output file (default: <export_dir>/sitecycle-export-<date>.csv)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}
