//! CLI command implementations.

pub mod backend;
pub mod config;
pub mod entry;
pub mod history;
pub mod refresh;

use std::error::Error;
use std::future::Future;
use std::time::Duration;

use spark_core::{CacheFile, Config, GatewayMode, HttpBackend, StorageGateway};
use url::Url;

pub(crate) type CliResult = Result<(), Box<dyn Error>>;

/// Drive an async operation to completion on a throwaway runtime.
pub(crate) fn run_async<F>(future: F) -> CliResult
where
    F: Future<Output = CliResult>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

/// Build a gateway from the on-disk configuration.
pub(crate) fn open_gateway(config: &Config) -> Result<StorageGateway, Box<dyn Error>> {
    let cache = CacheFile::new(config.cache_path()?);
    match config.storage.mode {
        GatewayMode::RemotePrimary => {
            let base_url = Url::parse(&config.backend.base_url)?;
            let backend =
                HttpBackend::new(base_url, Duration::from_secs(config.backend.timeout_secs))?;
            Ok(StorageGateway::remote_primary(Box::new(backend), cache))
        }
        GatewayMode::LocalOnly => Ok(StorageGateway::local_only(cache)),
    }
}
