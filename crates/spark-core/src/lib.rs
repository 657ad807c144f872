//! # Spark Core Library
//!
//! This library provides the core business logic for Spark, a journaling
//! application with a conditional "memory unlock" feature. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! CLI binary, with any GUI front end being a thin layer over the same core
//! library.
//!
//! ## Architecture
//!
//! - **Unlock Engine**: a pure predicate over (entry, condition snapshot,
//!   now) deciding lock-to-unlocked transitions -- no I/O, no suspension
//! - **Storage Gateway**: the single point of mutation, mirroring entries
//!   to a remote HTTP backend (primary) and an atomic-write JSON cache
//!   file (fallback/offline)
//! - **Entry Store**: insertion-ordered in-memory read model with derived
//!   queries (locked, unlocked, search) and the unlock history
//! - **Remote Backend**: HTTP client adaptor for the entries CRUD+unlock
//!   API, normalizing timestamps at the boundary
//!
//! ## Key Components
//!
//! - [`StorageGateway`]: remote-primary persistence with local fallback
//! - [`unlock::evaluate`]: the unlock predicate
//! - [`EntryStore`]: read model for front ends
//! - [`Config`]: TOML configuration management

pub mod conditions;
pub mod entry;
pub mod error;
pub mod events;
pub mod gateway;
pub mod remote;
pub mod storage;
pub mod store;
pub mod unlock;


pub use conditions::{ConditionSnapshot, ConditionTracker, GeoPoint};
pub use entry::{ConditionKind, Entry, EntryDraft, Geofence, Mood, UnlockCondition, WeatherKind};
pub use error::{
    CacheError, ConfigError, CoreError, RemoteError, Result, ValidationError,
};
pub use events::Event;
pub use gateway::{GatewayMode, StorageGateway};
pub use remote::{Health, HttpBackend, RemoteBackend};
pub use storage::{CacheFile, Config};
pub use store::{EntryStore, UnlockEvent};
