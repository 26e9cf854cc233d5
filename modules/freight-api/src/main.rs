use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use freight_api::{build_router, spawn_relocation_loop, AppState};
use freight_common::Config;
use freight_domains::{load_locations_file, seed_trucks, FreightRegistry};

#[derive(Parser)]
#[command(name = "freight-api", about = "Cargo and truck matching service")]
struct Cli {
    /// Location table to load (overrides FREIGHT_LOCATIONS_PATH)
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Trucks to seed into an empty fleet (overrides FREIGHT_SEED_TRUCKS)
    #[arg(long)]
    seed_trucks: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.locations {
        config.locations_path = path;
    }
    if let Some(n) = cli.seed_trucks {
        config.seed_trucks = n;
    }

    let mut registry = FreightRegistry::new();
    let summary = load_locations_file(&mut registry, &config.locations_path)?;
    info!(
        inserted = summary.inserted,
        skipped = summary.skipped_rows,
        "Location table ready"
    );

    let seeded = seed_trucks(&mut registry, config.seed_trucks, &mut rand::rng())
        .context("Failed to seed trucks")?;
    info!(seeded, total = registry.truck_count(), "Fleet ready");

    let state = Arc::new(AppState::new(registry, config.default_radius));
    if let Some(every) = config.relocate_interval {
        spawn_relocation_loop(&state, every);
    }

    let app = build_router(state);
    let addr = config.bind_addr();
    info!("Freight API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
