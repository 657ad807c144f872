//! Remote backend boundary.
//!
//! The gateway talks to the authoritative store through [`RemoteBackend`];
//! tests inject fakes through the same seam. Every failure mode a caller
//! can hit collapses into [`RemoteError`](crate::error::RemoteError) -- the
//! gateway needs no finer taxonomy than "remote unavailable".

use async_trait::async_trait;
use serde::Deserialize;

use crate::entry::Entry;
use crate::error::RemoteError;

pub mod codec;
pub mod http;

pub use http::HttpBackend;

/// Health report from the backend service.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub service: String,
}

/// CRUD + explicit-unlock surface of the remote entries service.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    async fn health(&self) -> Result<Health, RemoteError>;

    /// Full entry list, authoritative at load time.
    async fn list(&self) -> Result<Vec<Entry>, RemoteError>;

    async fn fetch(&self, id: &str) -> Result<Entry, RemoteError>;

    /// Create on the server. The returned entry is the server's version
    /// (server-assigned id, normalized timestamps) and wins over the
    /// client-constructed one.
    async fn create(&self, entry: &Entry) -> Result<Entry, RemoteError>;

    async fn update(&self, entry: &Entry) -> Result<Entry, RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;

    /// Stamp `unlocked_at` server-side and return the updated entry.
    async fn unlock(&self, id: &str) -> Result<Entry, RemoteError>;
}
