//! Wire codec for the entries API.
//!
//! The backend speaks camelCase JSON. Timestamps are encoded as RFC 3339
//! with timezone; decoding also accepts the backend's timezone-less
//! ISO-8601 form and normalizes it to UTC, so one canonical textual format
//! leaves this module in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, Geofence, Mood, UnlockCondition, WeatherKind};

/// Entry as it appears on the wire and in the cache file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub creation_date: DateTime<Utc>,
    #[serde(default)]
    pub geofence: Option<Geofence>,
    #[serde(default)]
    pub weather: Option<WeatherKind>,
    #[serde(default)]
    pub emotion: Option<Mood>,
    #[serde(with = "timestamp")]
    pub earliest_unlock: DateTime<Utc>,
    #[serde(default, with = "timestamp_opt")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl WireEntry {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            content: entry.body.clone(),
            creation_date: entry.created_at,
            geofence: entry.geofence().copied(),
            weather: entry.required_weather(),
            emotion: entry.required_mood(),
            earliest_unlock: entry.earliest_unlock,
            unlocked_at: entry.unlocked_at,
        }
    }

    pub fn into_entry(self) -> Entry {
        let mut conditions = Vec::new();
        if let Some(fence) = self.geofence {
            conditions.push(UnlockCondition::Geofence(fence));
        }
        if let Some(weather) = self.weather {
            conditions.push(UnlockCondition::Weather(weather));
        }
        if let Some(mood) = self.emotion {
            conditions.push(UnlockCondition::Mood(mood));
        }
        Entry {
            id: self.id,
            title: self.title,
            body: self.content,
            created_at: self.creation_date,
            earliest_unlock: self.earliest_unlock,
            conditions,
            unlocked_at: self.unlocked_at,
        }
    }
}

pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// RFC 3339, or the backend's naive ISO-8601 taken as UTC.
    pub(crate) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid timestamp '{raw}': {err}"))
    }
}

pub(crate) mod timestamp_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::timestamp;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => timestamp::serialize(inner, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| timestamp::parse(&value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
