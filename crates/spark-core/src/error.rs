//! Core error types for spark-core.
//!
//! Storage-layer failures (remote, cache) are recovered internally by the
//! gateway's fallback policy and never abort an operation; only validation
//! errors propagate to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for spark-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Entry validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote backend errors
    #[error("Remote backend error: {0}")]
    Remote(#[from] RemoteError),

    /// Local cache errors
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Entry construction and edit validation errors.
///
/// Raised before anything reaches storage; always reported synchronously.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Title is required
    #[error("Entry title must not be empty")]
    EmptyTitle,

    /// Geofence radius must be a positive number of meters
    #[error("Geofence radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// Latitude outside [-90, 90]
    #[error("Latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180]
    #[error("Longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Weather label not in the taxonomy
    #[error("Unknown weather condition '{0}'")]
    UnknownWeather(String),

    /// Mood label not in the taxonomy
    #[error("Unknown mood '{0}'")]
    UnknownMood(String),
}

/// Remote backend errors.
///
/// The gateway treats every variant identically ("remote unavailable");
/// the split exists only so boundary logs can say what actually happened.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport-level failure (connection refused, timeout, TLS, ...)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// 2xx response with an undecodable body
    #[error("Undecodable response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Local cache errors.
///
/// "Missing", "malformed" and plain IO failures are distinct so the gateway
/// can log them differently, even though all three resolve to "no cache".
#[derive(Error, Debug)]
pub enum CacheError {
    /// No cache file on disk yet
    #[error("No cache file at {0}")]
    Missing(PathBuf),

    /// Cache file exists but does not decode
    #[error("Malformed cache file at {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// Reading or writing the cache file failed
    #[error("Cache IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key not recognized by get/set
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value does not parse for the given key
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
