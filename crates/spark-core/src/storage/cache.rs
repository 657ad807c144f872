//! On-disk entry cache.
//!
//! A single JSON file holding the wire-shaped entry array -- the same shape
//! the backend serves, no extra versioning. Saves go through a temp sibling
//! and a rename, so a reader never observes a half-written file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::CacheError;
use crate::remote::codec::WireEntry;

/// Atomic-write JSON snapshot of the entry list.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. Missing, malformed and unreadable files are
    /// distinct errors; the gateway decides what each means.
    pub fn load(&self) -> Result<Vec<Entry>, CacheError> {
        if !self.path.exists() {
            return Err(CacheError::Missing(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;
        let wires: Vec<WireEntry> =
            serde_json::from_str(&raw).map_err(|err| CacheError::Malformed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        Ok(wires.into_iter().map(WireEntry::into_entry).collect())
    }

    /// Replace the snapshot atomically: write `<name>.tmp`, then rename
    /// over the real file.
    pub fn save(&self, entries: &[Entry]) -> Result<(), CacheError> {
        let wires: Vec<WireEntry> = entries.iter().map(WireEntry::from_entry).collect();
        let data =
            serde_json::to_string_pretty(&wires).map_err(|err| CacheError::Malformed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;

        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}
