//! TOML-based application configuration.
//!
//! Stores the backend endpoint and the storage-gateway mode.
//! Configuration lives at `~/.config/spark/config.toml`; a missing file
//! means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use super::data_dir;
use crate::error::ConfigError;
use crate::gateway::GatewayMode;

/// Remote backend endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Hard per-request timeout; an overrun counts as a remote failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Storage gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: GatewayMode,
    /// Explicit cache file path; defaults to `entries.json` in the data dir.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/spark/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: GatewayMode::default(),
            cache_file: None,
        }
    }
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn config_path() -> std::io::Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().map_err(|err| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: err.to_string(),
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().map_err(|err| ConfigError::SaveFailed {
            path: PathBuf::from("config.toml"),
            message: err.to_string(),
        })?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        fs::write(path, raw).map_err(|err| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Resolved cache file path.
    pub fn cache_path(&self) -> std::io::Result<PathBuf> {
        match &self.storage.cache_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("entries.json")),
        }
    }

    // ── Key-based access for the CLI ─────────────────────────────────

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "backend.base_url" => Ok(self.backend.base_url.clone()),
            "backend.timeout_secs" => Ok(self.backend.timeout_secs.to_string()),
            "storage.mode" => Ok(self.storage.mode.to_string()),
            "storage.cache_file" => Ok(self
                .storage
                .cache_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "backend.base_url" => {
                Url::parse(value).map_err(|err| invalid(err.to_string()))?;
                self.backend.base_url = value.to_string();
            }
            "backend.timeout_secs" => {
                self.backend.timeout_secs =
                    value.parse().map_err(|_| invalid("expected seconds".into()))?;
            }
            "storage.mode" => {
                self.storage.mode = match value {
                    "remote-primary" => GatewayMode::RemotePrimary,
                    "local-only" => GatewayMode::LocalOnly,
                    _ => {
                        return Err(invalid(
                            "expected 'remote-primary' or 'local-only'".into(),
                        ))
                    }
                };
            }
            "storage.cache_file" => {
                self.storage.cache_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<(&'static str, String)> {
        [
            "backend.base_url",
            "backend.timeout_secs",
            "storage.mode",
            "storage.cache_file",
        ]
        .into_iter()
        .map(|key| (key, self.get(key).unwrap_or_default()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.storage.mode, GatewayMode::RemotePrimary);
        assert!(config.storage.cache_file.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("backend.base_url", "http://journal.local:8080").unwrap();
        config.set("storage.mode", "local-only").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.backend.base_url, "http://journal.local:8080");
        assert_eq!(loaded.storage.mode, GatewayMode::LocalOnly);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("backend.base_url", "not a url"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("backend.timeout_secs", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("storage.mode", "cloud"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.get("backend.port"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set("backend.port", "5000"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_list_covers_every_key() {
        let listed = Config::default().list();
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().any(|(k, v)| *k == "storage.mode" && v == "remote-primary"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
