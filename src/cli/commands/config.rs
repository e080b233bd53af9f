use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd
        && *print_config
    {
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", cfg.to_yaml()?);
    }

    Ok(())
}
