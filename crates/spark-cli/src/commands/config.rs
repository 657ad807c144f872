//! Configuration management commands for CLI.

use clap::Subcommand;
use spark_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Key, e.g. backend.base_url
        key: String,
    },
    /// Set a configuration value
    Set {
        key: String,
        value: String,
    },
    /// List all configuration values
    List,
}

pub fn run(action: ConfigAction) -> super::CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            for (key, value) in Config::load()?.list() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
