//! Unlocked-entry history command.

use clap::Args;
use spark_core::{Config, Entry};

#[derive(Args)]
pub struct HistoryArgs {
    /// JSON output
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: HistoryArgs) -> super::CliResult {
    let config = Config::load()?;
    let mut gateway = super::open_gateway(&config)?;

    super::run_async(async move {
        gateway.load().await;
        let mut unlocked: Vec<&Entry> = gateway.store().unlocked().collect();
        unlocked.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));

        if args.json {
            println!("{}", serde_json::to_string_pretty(&unlocked)?);
        } else if unlocked.is_empty() {
            println!("Nothing unlocked yet.");
        } else {
            for entry in unlocked {
                if let Some(at) = entry.unlocked_at {
                    println!(
                        "{}  {}  {}",
                        at.format("%Y-%m-%d %H:%M"),
                        entry.id,
                        entry.title
                    );
                }
            }
        }
        Ok(())
    })
}
