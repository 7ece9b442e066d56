// src/main.rs
mod cli;
mod config;
mod constants;
mod driver;
mod error;
mod fetcher;
mod logging;
mod models;
mod reconcile;
mod scrape;
mod store;

use clap::Parser;
use cli::Args;
use config::Config;
use error::AppError;
use std::path::Path;
use store::Store;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must be kept alive for the duration of the program
    // to ensure logs are flushed properly
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    info!("Logs are being written to: {log_file_path}");

    let config = match &args.config {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };

    let db_path = args.db.clone().unwrap_or_else(|| config.resolved_db_path());
    let mut store = Store::open(Path::new(&db_path))?;
    info!("Using matchup database at {db_path}");

    // The store connection is released when `store` drops, on every exit
    // path from here on.
    let report = driver::run(&config, &mut store, args.dry_run).await?;

    info!(
        "Sync finished: {} rosters succeeded, {} failed",
        report.succeeded, report.failed
    );

    if report.failed > 0 && report.succeeded == 0 {
        return Err(AppError::RunFailed {
            failed: report.failed,
        });
    }

    Ok(())
}
