use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::ConditionKind;

/// Every store mutation produces an Event.
/// The front end subscribes through the gateway; the core has no
/// dependency on any UI paradigm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    EntryCreated {
        entry_id: String,
        /// Whether the remote backend accepted the write, or the local
        /// cache absorbed it.
        persisted_remotely: bool,
        at: DateTime<Utc>,
    },
    EntryUpdated {
        entry_id: String,
        persisted_remotely: bool,
        at: DateTime<Utc>,
    },
    EntryDeleted {
        entry_id: String,
        persisted_remotely: bool,
        at: DateTime<Utc>,
    },
    /// A locked entry transitioned to unlocked. Exactly one per transition.
    EntryUnlocked {
        entry_id: String,
        satisfied: Vec<ConditionKind>,
        at: DateTime<Utc>,
    },
    /// The store was repopulated by a `load()`.
    StoreLoaded {
        entry_count: usize,
        at: DateTime<Utc>,
    },
}
