use clap::{Args, Parser, Subcommand};
use landtrack_core::{create_listing_table, RestStore, Result, StorageGateway, TrackerError};
use landtrack_scrapers::config::AppConfig;
use landtrack_scrapers::fetch::HttpFetcher;
use landtrack_scrapers::runner::RunCoordinator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scrape cycle across all configured sources
    Run(RunCommand),

    /// List tracked listings
    List(ListCommand),

    /// Show run bookkeeping (last attempted / last updated, per-source status)
    State(StateArgs),
}

#[derive(Args)]
struct StorageArgs {
    /// Storage service endpoint; falls back to LANDTRACK_STORAGE_URL
    #[arg(long)]
    storage_url: Option<String>,

    /// Storage service key; falls back to LANDTRACK_STORAGE_KEY
    #[arg(long)]
    storage_key: Option<String>,
}

impl StorageArgs {
    fn open(&self) -> Result<RestStore> {
        let url = self
            .storage_url
            .clone()
            .or_else(|| std::env::var("LANDTRACK_STORAGE_URL").ok())
            .ok_or_else(|| {
                TrackerError::Config(
                    "storage endpoint missing: pass --storage-url or set LANDTRACK_STORAGE_URL"
                        .to_string(),
                )
            })?;
        let key = self
            .storage_key
            .clone()
            .or_else(|| std::env::var("LANDTRACK_STORAGE_KEY").ok())
            .ok_or_else(|| {
                TrackerError::Config(
                    "storage key missing: pass --storage-key or set LANDTRACK_STORAGE_KEY"
                        .to_string(),
                )
            })?;
        RestStore::new(&url, &key)
    }
}

#[derive(Args)]
struct RunCommand {
    /// Config file (JSON); built-in sources and criteria when omitted
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    storage: StorageArgs,
}

#[derive(Args)]
struct ListCommand {
    /// Only listings from this source
    #[arg(short = 'f', long)]
    source: Option<String>,

    /// Hide listings that disappeared from their source
    #[arg(long)]
    active_only: bool,

    #[command(flatten)]
    storage: StorageArgs,
}

#[derive(Args)]
struct StateArgs {
    #[command(flatten)]
    storage: StorageArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(cmd) => {
            let config = match &cmd.config {
                Some(path) => AppConfig::load(path)?,
                None => AppConfig::default(),
            };
            let store = Arc::new(cmd.storage.open()?);
            let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
                config.fetch_timeout_secs,
            ))?);

            info!(sources = config.sources.len(), "starting scrape cycle");
            let report = RunCoordinator::new(config, fetcher, store).run_once().await?;

            for (name, status) in &report.source_status {
                if status.ok {
                    println!("{name}: ok, {} matching listings", status.items);
                } else {
                    println!(
                        "{name}: FAILED ({})",
                        status.error.as_deref().unwrap_or("unknown")
                    );
                }
            }
            println!(
                "run {}committed at {}",
                if report.committed { "" } else { "NOT " },
                report.started_utc.to_rfc3339()
            );
        }
        Commands::List(cmd) => {
            let store = cmd.storage.open()?;
            let mut listings = store.fetch_listings(cmd.source.as_deref()).await?;
            if cmd.active_only {
                listings.retain(|l| l.active);
            }
            listings.sort_by(|a, b| b.last_seen_utc.cmp(&a.last_seen_utc));

            println!("{}", create_listing_table(&listings));
            println!("{} listings", listings.len());
        }
        Commands::State(cmd) => {
            let store = cmd.storage.open()?;
            let state = store.get_system_state().await?;

            match state.last_attempted_utc {
                Some(ts) => println!("last attempted: {}", ts.to_rfc3339()),
                None => println!("last attempted: never"),
            }
            match state.last_updated_utc {
                Some(ts) => println!("last updated:   {}", ts.to_rfc3339()),
                None => println!("last updated:   never"),
            }
            for (name, status) in &state.source_status {
                if status.ok {
                    println!("  {name}: ok ({} items)", status.items);
                } else {
                    println!(
                        "  {name}: failed ({})",
                        status.error.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }
    }

    Ok(())
}
