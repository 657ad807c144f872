//! Journal entry data model and construction-time validation.
//!
//! Entries are immutable once unlocked: `unlocked_at` is set exactly once by
//! the storage gateway and never cleared. Unlock requirements are modeled as
//! a list of [`UnlockCondition`] variants rather than a fixed set of optional
//! fields, so a new trigger type is a variant addition.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Weather taxonomy. Closed enumeration; matching is exact, no similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Foggy,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Hail,
    Thunderstorm,
    Unknown,
}

impl WeatherKind {
    /// Wire/label form of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "clear",
            WeatherKind::PartlyCloudy => "partly-cloudy",
            WeatherKind::Cloudy => "cloudy",
            WeatherKind::Foggy => "foggy",
            WeatherKind::Drizzle => "drizzle",
            WeatherKind::Rain => "rain",
            WeatherKind::FreezingRain => "freezing-rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Hail => "hail",
            WeatherKind::Thunderstorm => "thunderstorm",
            WeatherKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => Ok(WeatherKind::Clear),
            "partly-cloudy" => Ok(WeatherKind::PartlyCloudy),
            "cloudy" => Ok(WeatherKind::Cloudy),
            "foggy" => Ok(WeatherKind::Foggy),
            "drizzle" => Ok(WeatherKind::Drizzle),
            "rain" => Ok(WeatherKind::Rain),
            "freezing-rain" => Ok(WeatherKind::FreezingRain),
            "snow" => Ok(WeatherKind::Snow),
            "hail" => Ok(WeatherKind::Hail),
            "thunderstorm" => Ok(WeatherKind::Thunderstorm),
            "unknown" => Ok(WeatherKind::Unknown),
            other => Err(ValidationError::UnknownWeather(other.to_string())),
        }
    }
}

/// Mood taxonomy. Closed enumeration; matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Excited,
    Anxious,
    Angry,
    Nostalgic,
    Grateful,
}

impl Mood {
    /// Wire/label form of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Calm => "calm",
            Mood::Excited => "excited",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Nostalgic => "nostalgic",
            Mood::Grateful => "grateful",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "calm" => Ok(Mood::Calm),
            "excited" => Ok(Mood::Excited),
            "anxious" => Ok(Mood::Anxious),
            "angry" => Ok(Mood::Angry),
            "nostalgic" => Ok(Mood::Nostalgic),
            "grateful" => Ok(Mood::Grateful),
            other => Err(ValidationError::UnknownMood(other.to_string())),
        }
    }
}

/// Circular region used as a location-based unlock condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl Geofence {
    /// Validated constructor. Invariant: `radius_meters > 0`, coordinates
    /// within their valid ranges.
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::LongitudeOutOfRange(longitude));
        }
        if !(radius_meters > 0.0) {
            return Err(ValidationError::NonPositiveRadius(radius_meters));
        }
        Ok(Self {
            latitude,
            longitude,
            radius_meters,
        })
    }
}

/// One unlock requirement on an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum UnlockCondition {
    Geofence(Geofence),
    Weather(WeatherKind),
    Mood(Mood),
}

impl UnlockCondition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            UnlockCondition::Geofence(_) => ConditionKind::Geofence,
            UnlockCondition::Weather(_) => ConditionKind::Weather,
            UnlockCondition::Mood(_) => ConditionKind::Mood,
        }
    }
}

/// What satisfied an unlock. `Time` is used for entries with no conditions,
/// which unlock on the `earliest_unlock` timestamp alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    Time,
    Geofence,
    Weather,
    Mood,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConditionKind::Time => "time",
            ConditionKind::Geofence => "geofence",
            ConditionKind::Weather => "weather",
            ConditionKind::Mood => "mood",
        };
        f.write_str(label)
    }
}

/// Default lock window applied when a draft carries no explicit
/// `earliest_unlock`.
pub const DEFAULT_LOCK_WINDOW_HOURS: i64 = 24;

/// A journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque unique identifier, assigned at creation, immutable.
    pub id: String,
    pub title: String,
    pub body: String,
    /// Creation timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// The entry may never unlock before this instant, whatever else holds.
    pub earliest_unlock: DateTime<Utc>,
    /// At most one condition of each kind, enforced at construction.
    pub conditions: Vec<UnlockCondition>,
    /// `None` means locked. Set once, never cleared.
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn is_locked(&self) -> bool {
        self.unlocked_at.is_none()
    }

    pub fn geofence(&self) -> Option<&Geofence> {
        self.conditions.iter().find_map(|c| match c {
            UnlockCondition::Geofence(fence) => Some(fence),
            _ => None,
        })
    }

    pub fn required_weather(&self) -> Option<WeatherKind> {
        self.conditions.iter().find_map(|c| match c {
            UnlockCondition::Weather(weather) => Some(*weather),
            _ => None,
        })
    }

    pub fn required_mood(&self) -> Option<Mood> {
        self.conditions.iter().find_map(|c| match c {
            UnlockCondition::Mood(mood) => Some(*mood),
            _ => None,
        })
    }
}

/// Title rule shared by creation and edits.
pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Creation input for an entry. The gateway assigns the id and creation
/// timestamp and turns the draft into an [`Entry`] via [`EntryDraft::into_entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub body: String,
    /// Explicit lock window; defaults to creation + 1 day when absent.
    pub earliest_unlock: Option<DateTime<Utc>>,
    pub geofence: Option<Geofence>,
    pub weather: Option<WeatherKind>,
    pub mood: Option<Mood>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Validate the draft and construct the entry.
    ///
    /// Construction is the only validation point: a draft that passes here
    /// can reach storage, one that fails never does.
    pub fn into_entry(
        self,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Entry, ValidationError> {
        validate_title(&self.title)?;
        if let Some(fence) = &self.geofence {
            // Re-check: drafts can be built with struct literals.
            Geofence::new(fence.latitude, fence.longitude, fence.radius_meters)?;
        }

        let mut conditions = Vec::new();
        if let Some(fence) = self.geofence {
            conditions.push(UnlockCondition::Geofence(fence));
        }
        if let Some(weather) = self.weather {
            conditions.push(UnlockCondition::Weather(weather));
        }
        if let Some(mood) = self.mood {
            conditions.push(UnlockCondition::Mood(mood));
        }

        let earliest_unlock = self
            .earliest_unlock
            .unwrap_or(created_at + Duration::hours(DEFAULT_LOCK_WINDOW_HOURS));

        Ok(Entry {
            id,
            title: self.title,
            body: self.body,
            created_at,
            earliest_unlock,
            conditions,
            unlocked_at: None,
        })
    }
}
