//! # Stores
//!
//! A [`Storage`] bundles the four repositories the desk works with, so the
//! desk can run against SQLite or memory without knowing which.
//!
//! ```text
//! Storage ──┬── invoices()  : Repository<Invoice>
//!           ├── customers() : Repository<Customer>
//!           ├── products()  : Repository<Product>
//!           └── payments()  : Repository<Payment>
//!
//! Database     → SqliteRepository<_>   (one pool, shared)
//! MemoryStore  → InMemoryRepository<_> (shared Arc<RwLock<_>>)
//! ```

use geo_core::catalog::{default_customers, default_products};
use geo_core::{Customer, Invoice, Payment, Product};
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::{InMemoryRepository, Repository, SqliteRepository};

/// The repositories behind one desk.
pub trait Storage: Send + Sync {
    type Invoices: Repository<Invoice>;
    type Customers: Repository<Customer>;
    type Products: Repository<Product>;
    type Payments: Repository<Payment>;

    fn invoices(&self) -> Self::Invoices;
    fn customers(&self) -> Self::Customers;
    fn products(&self) -> Self::Products;
    fn payments(&self) -> Self::Payments;
}

impl Storage for Database {
    type Invoices = SqliteRepository<Invoice>;
    type Customers = SqliteRepository<Customer>;
    type Products = SqliteRepository<Product>;
    type Payments = SqliteRepository<Payment>;

    fn invoices(&self) -> Self::Invoices {
        Database::invoices(self)
    }

    fn customers(&self) -> Self::Customers {
        Database::customers(self)
    }

    fn products(&self) -> Self::Products {
        Database::products(self)
    }

    fn payments(&self) -> Self::Payments {
        Database::payments(self)
    }
}

/// Storage held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    invoices: InMemoryRepository<Invoice>,
    customers: InMemoryRepository<Customer>,
    products: InMemoryRepository<Product>,
    payments: InMemoryRepository<Payment>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    type Invoices = InMemoryRepository<Invoice>;
    type Customers = InMemoryRepository<Customer>;
    type Products = InMemoryRepository<Product>;
    type Payments = InMemoryRepository<Payment>;

    fn invoices(&self) -> Self::Invoices {
        self.invoices.clone()
    }

    fn customers(&self) -> Self::Customers {
        self.customers.clone()
    }

    fn products(&self) -> Self::Products {
        self.products.clone()
    }

    fn payments(&self) -> Self::Payments {
        self.payments.clone()
    }
}

/// Number of records written by [`seed_defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub customers: usize,
    pub products: usize,
}

/// Fills empty customer and product collections with the default catalog.
///
/// Collections that already hold records are left alone, so this is safe to
/// call on every start.
pub async fn seed_defaults<S: Storage + ?Sized>(store: &S) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();

    let customers = store.customers();
    if customers.count().await? == 0 {
        for customer in default_customers() {
            customers.insert(&customer).await?;
            report.customers += 1;
        }
    }

    let products = store.products();
    if products.count().await? == 0 {
        for product in default_products() {
            products.insert(&product).await?;
            report.products += 1;
        }
    }

    info!(
        customers = report.customers,
        products = report.products,
        "Default catalog seeded"
    );
    Ok(report)
}
