//! Storage gateway: the single point of mutation for journal entries.
//!
//! Mediates between the in-memory [`EntryStore`], the remote backend
//! (primary) and the local cache file (fallback). In remote-primary mode
//! every mutation tries the backend first; any remote failure is absorbed
//! by applying the caller's version locally and persisting the cache, so
//! after any call returns the store reflects the caller's intent -- only
//! the durability target differs. Local-only mode skips the remote leg and
//! persists every mutation to the cache.
//!
//! Concurrent multi-client edits are not reconciled: last writer wins, the
//! remote is authoritative only at `load()` time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::conditions::ConditionSnapshot;
use crate::entry::{validate_title, ConditionKind, Entry, EntryDraft};
use crate::error::{CacheError, Result};
use crate::events::Event;
use crate::remote::RemoteBackend;
use crate::storage::CacheFile;
use crate::store::{EntryStore, UnlockEvent};
use crate::unlock;

/// Operating mode of the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatewayMode {
    /// Remote backend is the write/read target, cache is fallback only.
    #[default]
    RemotePrimary,
    /// No remote; every mutation persists to the cache.
    LocalOnly,
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GatewayMode::RemotePrimary => "remote-primary",
            GatewayMode::LocalOnly => "local-only",
        })
    }
}

type Subscriber = Box<dyn Fn(&Event) + Send + Sync>;

/// Single point of mutation for entries. Construct one per process (or per
/// test) and pass it where it is needed; there is no global instance.
pub struct StorageGateway {
    backend: Option<Box<dyn RemoteBackend>>,
    cache: CacheFile,
    store: EntryStore,
    subscribers: Vec<Subscriber>,
}

impl StorageGateway {
    pub fn remote_primary(backend: Box<dyn RemoteBackend>, cache: CacheFile) -> Self {
        Self {
            backend: Some(backend),
            cache,
            store: EntryStore::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn local_only(cache: CacheFile) -> Self {
        Self {
            backend: None,
            cache,
            store: EntryStore::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn mode(&self) -> GatewayMode {
        if self.backend.is_some() {
            GatewayMode::RemotePrimary
        } else {
            GatewayMode::LocalOnly
        }
    }

    /// Read model. Never mutated except through this gateway.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Register a change listener. Every mutation emits exactly one
    /// [`Event`] after the store has been updated.
    pub fn subscribe(&mut self, listener: impl Fn(&Event) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    fn publish(&self, event: Event) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Persist the current store to the cache file. Cache failures are
    /// logged and absorbed; the in-memory state is already correct.
    fn save_cache(&self) {
        let entries: Vec<Entry> = self.store.iter().cloned().collect();
        if let Err(err) = self.cache.save(&entries) {
            warn!(
                error = %err,
                path = %self.cache.path().display(),
                "failed to persist local cache"
            );
        }
    }

    fn load_cache_or_empty(&self) -> Vec<Entry> {
        match self.cache.load() {
            Ok(entries) => {
                info!(
                    count = entries.len(),
                    path = %self.cache.path().display(),
                    "loaded entries from local cache"
                );
                entries
            }
            Err(CacheError::Missing(_)) => {
                debug!("no local cache yet, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "local cache unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the store from the remote backend, falling back to the last
    /// cache snapshot. Which source served the data is visible only in the
    /// logs; callers and subscribers see the same event either way.
    pub async fn load(&mut self) {
        let entries = match &self.backend {
            Some(backend) => match backend.list().await {
                Ok(entries) => {
                    info!(count = entries.len(), "loaded entries from remote backend");
                    if let Err(err) = self.cache.save(&entries) {
                        warn!(error = %err, "failed to refresh cache snapshot");
                    }
                    entries
                }
                Err(err) => {
                    warn!(error = %err, "remote load failed, falling back to local cache");
                    self.load_cache_or_empty()
                }
            },
            None => self.load_cache_or_empty(),
        };
        self.store.replace_all(entries);
        self.publish(Event::StoreLoaded {
            entry_count: self.store.len(),
            at: Utc::now(),
        });
    }

    /// Validate and create an entry. The id and the `earliest_unlock`
    /// default are assigned here; on remote success the server's version
    /// of the entry (normalized timestamps, server id) is the one stored
    /// and returned. Create never drops user data: a remote failure keeps
    /// the client-constructed entry locally.
    pub async fn create(&mut self, draft: EntryDraft) -> Result<Entry> {
        let entry = draft.into_entry(Uuid::new_v4().to_string(), Utc::now())?;

        let (stored, persisted_remotely) = match &self.backend {
            Some(backend) => match backend.create(&entry).await {
                Ok(server_entry) => {
                    debug!(id = %server_entry.id, "entry created on remote backend");
                    (server_entry, true)
                }
                Err(err) => {
                    warn!(error = %err, id = %entry.id, "remote create failed, keeping entry locally");
                    (entry, false)
                }
            },
            None => (entry, false),
        };

        self.store.insert(stored.clone());
        if !persisted_remotely {
            self.save_cache();
        }
        self.publish(Event::EntryCreated {
            entry_id: stored.id.clone(),
            persisted_remotely,
            at: Utc::now(),
        });
        Ok(stored)
    }

    /// Update an entry by id. A remote failure -- including "not found" --
    /// applies the caller's version locally instead.
    pub async fn update(&mut self, entry: Entry) -> Result<Entry> {
        validate_title(&entry.title)?;

        let (stored, persisted_remotely) = match &self.backend {
            Some(backend) => match backend.update(&entry).await {
                Ok(server_entry) => (server_entry, true),
                Err(err) => {
                    warn!(error = %err, id = %entry.id, "remote update failed, applying locally");
                    (entry, false)
                }
            },
            None => (entry, false),
        };

        self.store.upsert(stored.clone());
        if !persisted_remotely {
            self.save_cache();
        }
        self.publish(Event::EntryUpdated {
            entry_id: stored.id.clone(),
            persisted_remotely,
            at: Utc::now(),
        });
        Ok(stored)
    }

    /// Delete by id. Local-first: the entry leaves the store whether or not
    /// the remote call succeeded, accepting inconsistency with the server
    /// until the next successful `load()`.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let persisted_remotely = match &self.backend {
            Some(backend) => match backend.delete(id).await {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, id, "remote delete failed, removing locally");
                    false
                }
            },
            None => false,
        };

        if self.store.remove(id).is_some() {
            if !persisted_remotely {
                self.save_cache();
            }
            self.publish(Event::EntryDeleted {
                entry_id: id.to_string(),
                persisted_remotely,
                at: Utc::now(),
            });
        }
        Ok(())
    }

    /// Transition a locked entry to unlocked, recording exactly one
    /// [`UnlockEvent`]. Idempotent: unknown ids and already-unlocked
    /// entries return `None` without touching anything.
    pub async fn unlock(
        &mut self,
        id: &str,
        satisfied: Vec<ConditionKind>,
    ) -> Result<Option<UnlockEvent>> {
        let Some(current) = self.store.get(id).cloned() else {
            return Ok(None);
        };
        if current.unlocked_at.is_some() {
            return Ok(None);
        }

        let (stored, persisted_remotely) = match &self.backend {
            Some(backend) => match backend.unlock(id).await {
                Ok(server_entry) => (server_entry, true),
                Err(err) => {
                    warn!(error = %err, id, "remote unlock failed, stamping locally");
                    let mut entry = current;
                    entry.unlocked_at = Some(Utc::now());
                    (entry, false)
                }
            },
            None => {
                let mut entry = current;
                entry.unlocked_at = Some(Utc::now());
                (entry, false)
            }
        };

        let event = UnlockEvent {
            entry_id: stored.id.clone(),
            at: stored.unlocked_at.unwrap_or_else(Utc::now),
            satisfied: satisfied.clone(),
        };
        self.store.upsert(stored);
        if !persisted_remotely {
            self.save_cache();
        }
        self.store.record_unlock(event.clone());
        self.publish(Event::EntryUnlocked {
            entry_id: event.entry_id.clone(),
            satisfied,
            at: event.at,
        });
        Ok(Some(event))
    }

    /// One evaluation pass: check every locked entry against the snapshot
    /// and persist each transition. Entries are independent; overlapping
    /// passes cannot double-fire because [`unlock`](Self::unlock) skips
    /// entries that are no longer locked.
    pub async fn refresh_unlocks(
        &mut self,
        snapshot: &ConditionSnapshot,
        now: DateTime<Utc>,
    ) -> Result<Vec<UnlockEvent>> {
        let due: Vec<(String, Vec<ConditionKind>)> = self
            .store
            .locked()
            .filter_map(|entry| {
                unlock::decide(entry, snapshot, now).map(|satisfied| (entry.id.clone(), satisfied))
            })
            .collect();
        debug!(candidates = due.len(), "unlock sweep");

        let mut events = Vec::with_capacity(due.len());
        for (id, satisfied) in due {
            if let Some(event) = self.unlock(&id, satisfied).await? {
                events.push(event);
            }
        }
        Ok(events)
    }
}
