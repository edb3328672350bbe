//! # Flowpad CLI
//!
//! Replays an editor event script and prints the Mermaid diagram.

use clap::Parser;
use flowpad_cli::{CliArgs, CliConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = CliConfig::from(args);

    // Initialize tracing; stdout carries the diagram, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Flowpad");

    match &config.script {
        Some(path) => tracing::debug!("Reading events from {}", path.display()),
        None => tracing::debug!("Reading events from stdin"),
    }

    let replay = flowpad_cli::run(&config)?;
    if replay.rejected > 0 {
        tracing::warn!("{} events were rejected", replay.rejected);
    }

    tracing::info!("Flowpad exited");
    Ok(())
}
