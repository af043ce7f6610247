//! Community maintenance worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p community-worker
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use community_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Maintenance run failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting community maintenance worker...");

    // Load configuration
    let config = AppConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Failed to load configuration");
    })?;

    info!(
        env = ?config.app.env,
        skip_canceled_events = config.streak.skip_canceled_events,
        batch_concurrency = config.batch.concurrency,
        "Configuration loaded"
    );

    let summary = community_worker::run(config).await?;
    if !summary.is_clean() {
        anyhow::bail!(
            "{} streak and {} badge failures",
            summary.streaks.failures.len(),
            summary.badges.failures.len()
        );
    }

    Ok(())
}
