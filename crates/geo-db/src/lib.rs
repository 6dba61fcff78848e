//! # geo-db: Storage Layer for Geo Invoice
//!
//! Persists customers, products, invoices and payments. Records are
//! addressed by their business key and stored as JSON, in SQLite or memory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Geo Invoice Data Flow                            │
//! │                                                                         │
//! │  geo-desk command (create_invoice)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     geo-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (Record, T)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteRepo    │    │ 001_records  │  │   │
//! │  │   │ Connection    │    │ InMemoryRepo  │    │              │  │   │
//! │  │   │ Management    │    │ Storage       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/geo-invoice.db                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `Repository` trait, SQLite and in-memory implementations
//! - [`store`] - `Storage` bundles and default catalog seeding
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geo_db::{Database, DbConfig, Repository};
//!
//! let db = Database::new(DbConfig::new("path/to/geo-invoice.db")).await?;
//! db.invoices().insert(&invoice).await?;
//! let all = db.invoices().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{snapshot, InMemoryRepository, Record, Repository, SqliteRepository};
pub use store::{seed_defaults, MemoryStore, SeedReport, Storage};
