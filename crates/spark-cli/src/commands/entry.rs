//! Journal entry management commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use spark_core::{Config, Entry, EntryDraft, Geofence, Mood, WeatherKind};

#[derive(Subcommand)]
pub enum EntryAction {
    /// Create a new entry
    Create {
        /// Entry title
        title: String,
        /// Entry body text
        #[arg(long, default_value = "")]
        body: String,
        /// Earliest unlock instant (RFC 3339); defaults to creation + 1 day
        #[arg(long)]
        earliest_unlock: Option<String>,
        /// Geofence center latitude (with --lon and --radius)
        #[arg(long, requires = "lon", requires = "radius")]
        lat: Option<f64>,
        /// Geofence center longitude
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
        /// Geofence radius in meters
        #[arg(long, requires = "lat")]
        radius: Option<f64>,
        /// Required weather at unlock time (e.g. rain, partly-cloudy)
        #[arg(long)]
        weather: Option<String>,
        /// Required mood at unlock time (e.g. happy, nostalgic)
        #[arg(long)]
        mood: Option<String>,
    },
    /// List entries
    List {
        /// Only locked entries
        #[arg(long, conflicts_with = "unlocked")]
        locked: bool,
        /// Only unlocked entries
        #[arg(long)]
        unlocked: bool,
        /// Filter by search text over title and body
        #[arg(long)]
        search: Option<String>,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
    /// Get entry details
    Get {
        /// Entry ID
        id: String,
    },
    /// Update an entry
    Update {
        /// Entry ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body text
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: EntryAction) -> super::CliResult {
    let config = Config::load()?;
    let mut gateway = super::open_gateway(&config)?;

    super::run_async(async move {
        gateway.load().await;
        match action {
            EntryAction::Create {
                title,
                body,
                earliest_unlock,
                lat,
                lon,
                radius,
                weather,
                mood,
            } => {
                let mut draft = EntryDraft::new(title, body);
                if let Some(raw) = earliest_unlock {
                    draft.earliest_unlock =
                        Some(DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc));
                }
                if let (Some(lat), Some(lon), Some(radius)) = (lat, lon, radius) {
                    draft.geofence = Some(Geofence::new(lat, lon, radius)?);
                }
                if let Some(label) = weather {
                    draft.weather = Some(label.parse::<WeatherKind>()?);
                }
                if let Some(label) = mood {
                    draft.mood = Some(label.parse::<Mood>()?);
                }
                let entry = gateway.create(draft).await?;
                println!("Entry created: {}", entry.id);
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            EntryAction::List {
                locked,
                unlocked,
                search,
                json,
            } => {
                let store = gateway.store();
                let entries: Vec<&Entry> = match &search {
                    Some(text) => store.search(text).collect(),
                    None => store.iter().collect(),
                };
                let entries: Vec<&Entry> = entries
                    .into_iter()
                    .filter(|e| {
                        if locked {
                            e.is_locked()
                        } else if unlocked {
                            !e.is_locked()
                        } else {
                            true
                        }
                    })
                    .collect();

                if json {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else if entries.is_empty() {
                    println!("No entries.");
                } else {
                    for e in entries {
                        let state = if e.is_locked() { "locked  " } else { "unlocked" };
                        println!(
                            "[{state}] {}  {}  {}",
                            e.id,
                            e.created_at.format("%Y-%m-%d %H:%M"),
                            e.title
                        );
                    }
                }
            }
            EntryAction::Get { id } => {
                let entry = gateway
                    .store()
                    .get(&id)
                    .ok_or_else(|| format!("entry not found: {id}"))?;
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
            EntryAction::Update { id, title, body } => {
                let mut entry = gateway
                    .store()
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| format!("entry not found: {id}"))?;
                if let Some(title) = title {
                    entry.title = title;
                }
                if let Some(body) = body {
                    entry.body = body;
                }
                let updated = gateway.update(entry).await?;
                println!("Entry updated: {}", updated.id);
                println!("{}", serde_json::to_string_pretty(&updated)?);
            }
            EntryAction::Delete { id } => {
                gateway.delete(&id).await?;
                println!("Entry deleted: {id}");
            }
        }
        Ok(())
    })
}
