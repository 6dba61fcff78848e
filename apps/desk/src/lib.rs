//! # geo-desk: Invoicing Desk
//!
//! The boundary a UI shell talks to: configuration, logging, error mapping
//! and the command functions.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Desk Startup                                      │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → config.toml → GEO_* environment → validate             │
//! │                                                                         │
//! │  3. Open Storage ─────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │     • or memory when [storage] in_memory = true                         │
//! │     • default catalog seeded into empty collections                     │
//! │                                                                         │
//! │  4. Build Desk State ─────────────────────────────────────────────────► │
//! │     • invoice counter moved past every stored number                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! geo_desk::init_tracing();
//! let config = DeskConfig::load(None)?;
//! let desk = geo_desk::open_desk(config).await?;
//!
//! let form = commands::invoice::new_invoice_draft(&desk).await?;
//! let invoice = commands::invoice::create_invoice(&desk, edited_draft).await?;
//! let pdf = commands::invoice::download_invoice(&desk, &invoice.invoice_number).await?;
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use geo_db::{seed_defaults, Database, DbConfig, MemoryStore, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, DeskConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::Desk;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=geo_db=trace` - Show trace for one crate only
/// - Default: INFO level, sqlx at WARN
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// Opens the desk on SQLite at the configured path.
///
/// With `[storage] in_memory = true` the database lives in memory instead.
pub async fn open_desk(config: DeskConfig) -> ApiResult<Desk<Database>> {
    let db_config = if config.storage.in_memory {
        DbConfig::in_memory()
    } else {
        DbConfig::new(config.database_path())
    };

    info!(path = %db_config.database_path.display(), "Opening desk storage");
    let db = Database::new(db_config).await?;
    open_with(db, config).await
}

/// Opens the desk on a fresh [`MemoryStore`].
pub async fn open_memory_desk(config: DeskConfig) -> ApiResult<Desk<MemoryStore>> {
    open_with(MemoryStore::new(), config).await
}

/// Seeds empty collections and builds the desk state over `store`.
pub async fn open_with<S: Storage>(store: S, config: DeskConfig) -> ApiResult<Desk<S>> {
    config.validate()?;
    seed_defaults(&store).await?;
    Desk::open(store, config).await
}
