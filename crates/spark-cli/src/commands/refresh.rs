//! Unlock sweep command: feed current conditions, persist transitions.

use chrono::Utc;
use clap::Args;
use spark_core::{ConditionSnapshot, Config, GeoPoint, Mood, WeatherKind};

#[derive(Args)]
pub struct RefreshArgs {
    /// Current latitude (with --lon)
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,
    /// Current longitude
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,
    /// Current weather condition
    #[arg(long)]
    pub weather: Option<String>,
    /// Current mood
    #[arg(long)]
    pub mood: Option<String>,
}

pub fn run(args: RefreshArgs) -> super::CliResult {
    let config = Config::load()?;
    let mut gateway = super::open_gateway(&config)?;

    let mut snapshot = ConditionSnapshot::default();
    if let (Some(latitude), Some(longitude)) = (args.lat, args.lon) {
        snapshot.location = Some(GeoPoint {
            latitude,
            longitude,
        });
    }
    if let Some(label) = args.weather {
        snapshot.weather = Some(label.parse::<WeatherKind>()?);
    }
    if let Some(label) = args.mood {
        snapshot.mood = Some(label.parse::<Mood>()?);
    }

    super::run_async(async move {
        gateway.load().await;
        let events = gateway.refresh_unlocks(&snapshot, Utc::now()).await?;
        if events.is_empty() {
            println!("No entries unlocked.");
        } else {
            for event in &events {
                let kinds: Vec<String> =
                    event.satisfied.iter().map(|k| k.to_string()).collect();
                println!("Unlocked {} ({})", event.entry_id, kinds.join(", "));
            }
        }
        Ok(())
    })
}
