mod config;
mod error;
mod export;
mod progress;
mod scheduler;
mod signals;

use anyhow::Result;
use log::{error, info, warn};

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = config::Config::from_env()?;
    info!("Table generator starting...");
    info!("Output directory: {}", config.output_dir.display());
    info!(
        "Shapes: r <= {}, r <= c <= {}, using {} threads",
        config.max_rows, config.max_cols, config.threads
    );
    info!("Press Ctrl+C to stop after the running jobs finish");

    let stop = signals::install_stop_handler()?;

    let summary = scheduler::run_all(&config, &stop)?;
    if stop.is_stopped() {
        warn!("Stopped early: {} shapes not started", summary.cancelled);
    }

    info!("Processed {} shapes", summary.total());
    info!("Finished: {}", summary.finished);
    info!("Skipped (already done): {}", summary.skipped);
    if summary.failed > 0 {
        error!("Failed: {}", summary.failed);
        std::process::exit(1);
    }
    info!("All jobs finished.");

    Ok(())
}
