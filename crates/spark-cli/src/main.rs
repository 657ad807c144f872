use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "spark-cli", version, about = "Spark journal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Journal entry management
    Entry {
        #[command(subcommand)]
        action: commands::entry::EntryAction,
    },
    /// Evaluate unlock conditions against current sensor values
    Refresh(commands::refresh::RefreshArgs),
    /// Unlocked entries, most recent first
    History(commands::history::HistoryArgs),
    /// Remote backend checks
    Backend {
        #[command(subcommand)]
        action: commands::backend::BackendAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Entry { action } => commands::entry::run(action),
        Commands::Refresh(args) => commands::refresh::run(args),
        Commands::History(args) => commands::history::run(args),
        Commands::Backend { action } => commands::backend::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
