pub mod cache;
mod config;

pub use cache::CacheFile;
pub use config::{BackendConfig, Config, StorageConfig};

use std::path::PathBuf;

/// Returns `~/.config/spark[-dev]/` based on SPARK_ENV.
///
/// Set SPARK_ENV=dev to use the development data directory, or
/// SPARK_DATA_DIR to pin an explicit directory (tests do this).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    if let Ok(explicit) = std::env::var("SPARK_DATA_DIR") {
        let dir = PathBuf::from(explicit);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPARK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("spark-dev")
    } else {
        base_dir.join("spark")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
