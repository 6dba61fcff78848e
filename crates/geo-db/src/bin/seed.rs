//! # Seed Data
//!
//! Populates a database with the default customers and products.
//!
//! ## Usage
//! ```bash
//! # Seed ./geo-invoice.db
//! cargo run -p geo-db --bin seed
//!
//! # Specify database path
//! cargo run -p geo-db --bin seed -- --db ./data/geo-invoice.db
//! ```
//!
//! Collections that already hold records are left untouched.

use std::env;
use std::process::ExitCode;

use geo_db::{seed_defaults, Database, DbConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "geo-invoice.db";

fn db_path_from_args() -> String {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = db_path_from_args();
    info!(path = %path, "Seeding database");

    let db = match Database::new(DbConfig::new(&path)).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Could not open database");
            return ExitCode::FAILURE;
        }
    };

    let outcome = seed_defaults(&db).await;
    db.close().await;

    match outcome {
        Ok(report) => {
            info!(
                customers = report.customers,
                products = report.products,
                "Seeding complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Seeding failed");
            ExitCode::FAILURE
        }
    }
}
