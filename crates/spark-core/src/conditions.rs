//! Current-condition snapshot and the provider-facing tracker.
//!
//! Location, weather and mood arrive from independent, intermittently
//! updating sources with no ordering guarantee between them. The tracker
//! keeps the latest known value of each; the unlock engine consumes a
//! [`ConditionSnapshot`] frozen at evaluation time.

use serde::{Deserialize, Serialize};

use crate::entry::{Mood, WeatherKind};

/// A point on the globe, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Best-currently-known conditions at evaluation time. Each field is
/// independently possibly absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSnapshot {
    pub location: Option<GeoPoint>,
    pub weather: Option<WeatherKind>,
    pub mood: Option<Mood>,
}

/// Latest-known values pushed in by the condition providers.
#[derive(Debug, Clone, Default)]
pub struct ConditionTracker {
    latest: ConditionSnapshot,
}

impl ConditionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the current values for one evaluation pass.
    pub fn snapshot(&self) -> ConditionSnapshot {
        self.latest
    }

    pub fn set_location(&mut self, location: GeoPoint) {
        self.latest.location = Some(location);
    }

    pub fn clear_location(&mut self) {
        self.latest.location = None;
    }

    pub fn set_weather(&mut self, weather: WeatherKind) {
        self.latest.weather = Some(weather);
    }

    pub fn clear_weather(&mut self) {
        self.latest.weather = None;
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.latest.mood = Some(mood);
    }

    pub fn clear_mood(&mut self) {
        self.latest.mood = None;
    }
}
