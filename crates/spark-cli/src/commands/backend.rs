//! Remote backend commands for CLI.

use std::time::Duration;

use clap::Subcommand;
use spark_core::{Config, HttpBackend, RemoteBackend};
use url::Url;

#[derive(Subcommand)]
pub enum BackendAction {
    /// Check backend service health
    Health,
}

pub fn run(action: BackendAction) -> super::CliResult {
    let config = Config::load()?;
    match action {
        BackendAction::Health => {
            let base_url = Url::parse(&config.backend.base_url)?;
            let backend =
                HttpBackend::new(base_url, Duration::from_secs(config.backend.timeout_secs))?;
            super::run_async(async move {
                let health = backend.health().await?;
                println!("{}: {}", health.service, health.status);
                Ok(())
            })
        }
    }
}
