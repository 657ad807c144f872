//! Conditional unlock engine.
//!
//! Pure predicate over (entry, condition snapshot, now). No I/O, no
//! suspension; the storage gateway owns the driving loop and persists
//! the transitions this module decides.

pub mod engine;

pub use engine::{decide, distance_meters, evaluate};
