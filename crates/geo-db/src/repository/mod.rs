//! # Repositories
//!
//! Storage for customers, products, invoices and payments, addressed by each
//! record's business key.
//!
//! ## Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Repository<T: Record>                           │
//! │        get / list / insert / update / upsert / delete / count          │
//! │                                                                         │
//! │          ┌──────────────────────┐      ┌──────────────────────┐        │
//! │          │  SqliteRepository<T> │      │ InMemoryRepository<T>│        │
//! │          │  records table, JSON │      │  RwLock<Vec<T>>      │        │
//! │          └──────────────────────┘      └──────────────────────┘        │
//! │                                                                         │
//! │  Record          COLLECTION   key                                       │
//! │  ──────────────  ──────────   ───────────────                           │
//! │  Invoice         invoices     invoiceNumber                             │
//! │  Customer        customers    id                                        │
//! │  Product         products     id                                        │
//! │  Payment         payments     id                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both implementations list records in insertion order. An upsert or update
//! of an existing key keeps its position.

pub mod memory;
pub mod sqlite;

use std::collections::HashMap;

use geo_core::{Customer, Invoice, Payment, Product};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DbResult;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;

// =============================================================================
// Record
// =============================================================================

/// A storable entity with a business key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection the record lives in.
    const COLLECTION: &'static str;

    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Name of the key field, reported on duplicates.
    const KEY_FIELD: &'static str;

    /// The record's business key.
    fn key(&self) -> &str;
}

impl Record for Invoice {
    const COLLECTION: &'static str = "invoices";
    const ENTITY: &'static str = "Invoice";
    const KEY_FIELD: &'static str = "invoiceNumber";

    fn key(&self) -> &str {
        &self.invoice_number
    }
}

impl Record for Customer {
    const COLLECTION: &'static str = "customers";
    const ENTITY: &'static str = "Customer";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const ENTITY: &'static str = "Product";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> &str {
        &self.id
    }
}

impl Record for Payment {
    const COLLECTION: &'static str = "payments";
    const ENTITY: &'static str = "Payment";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Keyed storage of one record type.
///
/// ## Returns
/// - `get` gives `Ok(None)` for a missing key (not an error)
/// - `insert` fails with `UniqueViolation` when the key exists
/// - `update` fails with `NotFound` when the key does not exist
/// - `delete` reports whether anything was removed
#[allow(async_fn_in_trait)]
pub trait Repository<T: Record>: Send + Sync {
    /// Fetches a record by key.
    async fn get(&self, key: &str) -> DbResult<Option<T>>;

    /// All records, in insertion order.
    async fn list(&self) -> DbResult<Vec<T>>;

    /// Stores a new record.
    async fn insert(&self, record: &T) -> DbResult<()>;

    /// Replaces an existing record.
    async fn update(&self, record: &T) -> DbResult<()>;

    /// Inserts or replaces.
    async fn upsert(&self, record: &T) -> DbResult<()>;

    /// Removes a record by key.
    async fn delete(&self, key: &str) -> DbResult<bool>;

    /// Number of stored records.
    async fn count(&self) -> DbResult<usize> {
        Ok(self.list().await?.len())
    }
}

/// Loads a collection into a map keyed by business key.
///
/// The map implements `CustomerDirectory` / `ProductCatalog`, so it can be
/// handed straight to geo-core lookups.
pub async fn snapshot<T, R>(repo: &R) -> DbResult<HashMap<String, T>>
where
    T: Record,
    R: Repository<T> + ?Sized,
{
    Ok(repo
        .list()
        .await?
        .into_iter()
        .map(|record| (record.key().to_string(), record))
        .collect())
}
