//! In-memory entry store.
//!
//! Insertion-ordered read model over the entries known to this process.
//! Consumers get lookup, iteration and derived queries; mutation is
//! crate-private and goes through the storage gateway only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{ConditionKind, Entry};

/// One lock-to-unlocked transition. Append-only, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockEvent {
    pub entry_id: String,
    pub at: DateTime<Utc>,
    /// The condition kinds that held at the transition.
    pub satisfied: Vec<ConditionKind>,
}

/// Insertion-ordered collection of entries plus the unlock history.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    history: Vec<UnlockEvent>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn locked(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_locked())
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_locked())
    }

    /// Case-insensitive substring search over title and body.
    pub fn search<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Entry> {
        let needle = text.to_lowercase();
        self.entries.iter().filter(move |e| {
            e.title.to_lowercase().contains(&needle) || e.body.to_lowercase().contains(&needle)
        })
    }

    /// Unlock transitions, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &UnlockEvent> {
        self.history.iter().rev()
    }

    // ── Mutation (gateway only) ──────────────────────────────────────

    pub(crate) fn replace_all(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    pub(crate) fn insert(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Replace the entry with the same id, or append if unknown.
    pub(crate) fn upsert(&mut self, entry: Entry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn record_unlock(&mut self, event: UnlockEvent) {
        self.history.push(event);
    }
}
