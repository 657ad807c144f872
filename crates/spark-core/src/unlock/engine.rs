//! Unlock decision rules.
//!
//! An entry unlocks when `earliest_unlock` has passed AND every condition it
//! carries holds against the current snapshot. An absent snapshot value
//! fails the corresponding condition: an entry never unlocks on unknown
//! location, weather or mood. Already-unlocked entries never re-fire.

use chrono::{DateTime, Utc};

use crate::conditions::{ConditionSnapshot, GeoPoint};
use crate::entry::{ConditionKind, Entry, UnlockCondition};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Decide whether `entry` should transition from locked to unlocked,
/// reporting which condition kinds held.
///
/// Returns `None` while the entry must stay locked. For an entry with no
/// conditions the result is `[Time]` once `earliest_unlock` has passed.
pub fn decide(
    entry: &Entry,
    snapshot: &ConditionSnapshot,
    now: DateTime<Utc>,
) -> Option<Vec<ConditionKind>> {
    if entry.unlocked_at.is_some() {
        return None;
    }
    if now < entry.earliest_unlock {
        return None;
    }
    if entry.conditions.is_empty() {
        return Some(vec![ConditionKind::Time]);
    }

    let mut satisfied = Vec::with_capacity(entry.conditions.len());
    for condition in &entry.conditions {
        match condition {
            UnlockCondition::Geofence(fence) => {
                let center = GeoPoint {
                    latitude: fence.latitude,
                    longitude: fence.longitude,
                };
                match snapshot.location {
                    // Boundary is inclusive at the radius.
                    Some(location) if distance_meters(location, center) <= fence.radius_meters => {
                        satisfied.push(ConditionKind::Geofence);
                    }
                    _ => return None,
                }
            }
            UnlockCondition::Weather(required) => match snapshot.weather {
                Some(current) if current == *required => {
                    satisfied.push(ConditionKind::Weather);
                }
                _ => return None,
            },
            UnlockCondition::Mood(required) => match snapshot.mood {
                Some(current) if current == *required => {
                    satisfied.push(ConditionKind::Mood);
                }
                _ => return None,
            },
        }
    }
    Some(satisfied)
}

/// Whether `entry` should unlock. Pure; the caller persists the transition.
pub fn evaluate(entry: &Entry, snapshot: &ConditionSnapshot, now: DateTime<Utc>) -> bool {
    decide(entry, snapshot, now).is_some()
}
