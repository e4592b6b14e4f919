//! Extraction run simulator.
//!
//! Headless composition root: loads content, assembles a
//! [`RunCoordinator`], and flies one scripted run. Mission telemetry is
//! printed to stdout as one JSON object per line; logs go to stderr.
//!
//! # Examples
//!
//! ```bash
//! EXTRACTION_SEED=42 EXTRACTION_SHIP_SLOT=1 cargo run -p extraction-client
//!
//! # Persist the session and keep a log file
//! SAVE_DATA_DIR=./saves LOG_DIR=./logs cargo run -p extraction-client
//! ```
mod config;
mod demo;
mod logging;

use anyhow::{Context, Result};
use extraction_content::ContentFactory;
use extraction_runtime::{FileSessionRepository, RunCoordinator};
use tokio::sync::broadcast::error::RecvError;

use config::SimConfig;
use demo::DemoSettings;

fn build_coordinator(config: &SimConfig) -> Result<RunCoordinator> {
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Content: {}", factory.data_dir().display());

    let mut builder = RunCoordinator::builder()
        .content(factory)
        .session_id(config.session_id.clone());
    if let Some(seed) = config.seed {
        builder = builder.loot_seed(seed);
    }
    if let Some(dir) = &config.save_data_dir {
        let repository = FileSessionRepository::new(dir)
            .with_context(|| format!("Failed to open save directory {}", dir.display()))?;
        tracing::info!("Persistence: {}", dir.display());
        builder = builder.repository(repository);
    }
    builder.build().context("Failed to assemble run coordinator")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = SimConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref(), &config.session_id)?;

    tracing::info!("Starting extraction simulator");
    tracing::info!("Session ID: {}", config.session_id);

    let mut coordinator = build_coordinator(&config)?;

    let mut events = coordinator.subscribe();
    let telemetry = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(record) => match record.to_json() {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("Failed to encode mission event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "telemetry subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let settings = DemoSettings {
        ship_slot: config.ship_slot,
        tier: config.tier,
        seed: config.seed,
    };
    let result = demo::run_demo(&mut coordinator, settings);
    if result.is_ok() {
        coordinator.save()?;
    }

    // Dropping the coordinator closes the bus and ends the telemetry task.
    drop(coordinator);
    telemetry.await.context("Telemetry task panicked")?;

    let summary = result?;
    tracing::info!(
        items = summary.extracted.len(),
        credits = summary.extracted_credits,
        ai_cores = summary.extracted_ai_cores,
        reputation = summary.reputation_earned,
        "Demo run extracted"
    );
    Ok(())
}
