//! FFVB Calendar Sync Library
//!
//! This library fetches the published match calendar for a set of configured
//! team rosters, extracts structured matchup records from the calendar
//! page's table markup and reconciles them into a local SQLite store,
//! keeping a single next-matchup flag per roster category.
//!
//! # Examples
//!
//! ```rust,no_run
//! use matchup_sync::config::Config;
//! use matchup_sync::driver;
//! use matchup_sync::error::AppError;
//! use matchup_sync::store::Store;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let mut store = Store::open(Path::new(&config.resolved_db_path()))?;
//!
//!     let report = driver::run(&config, &mut store, false).await?;
//!     println!("{} rosters synced, {} failed", report.succeeded, report.failed);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod reconcile;
pub mod scrape;
pub mod store;

// Re-export commonly used types for convenience
pub use config::{Config, RosterConfig};
pub use error::AppError;
pub use models::{MatchupRecord, ReconcileSummary};
pub use store::Store;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
