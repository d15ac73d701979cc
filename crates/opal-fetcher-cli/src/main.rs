mod commands;
mod config;
mod event_file;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use opal_fetcher::FetchEvent;
use opal_fetcher_mongo::{FETCHER_KIND, MongoFetchProvider};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "opal-fetch")]
#[command(about = "Run policy-data fetch cycles from the command line")]
struct Cli {
    /// Provider defaults file (defaults to <config dir>/opal-fetcher/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one fetch cycle and print the records as JSON
    Fetch {
        /// Event file (.json or .toml), or `-` for JSON on stdin
        #[arg(long)]
        event: PathBuf,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate an event and show what would be queried, without connecting
    Check {
        /// Event file (.json or .toml), or `-` for JSON on stdin
        #[arg(long)]
        event: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn provider_for(event: &FetchEvent, config: &AppConfig) -> Result<MongoFetchProvider> {
    match event.fetcher.as_str() {
        FETCHER_KIND => Ok(MongoFetchProvider::new(config.mongo.clone())),
        other => bail!("unsupported fetcher `{other}` (available: {FETCHER_KIND})"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref());

    match cli.command {
        Command::Fetch { event, pretty } => {
            let event = event_file::load_event(&event)?;
            let provider = provider_for(&event, &config)?;
            commands::fetch::run(&provider, &event, pretty).await
        }
        Command::Check { event } => {
            let event = event_file::load_event(&event)?;
            let provider = provider_for(&event, &config)?;
            commands::check::run(&provider, &event)
        }
    }
}
