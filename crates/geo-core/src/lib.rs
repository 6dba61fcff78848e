//! # geo-core: Pure Business Logic for Geo Invoice
//!
//! This crate holds every rule of the invoicing core as plain functions and
//! types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Geo Invoice Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI shell (excluded)                          │   │
//! │  │    Customer form ──► Item rows ──► Charges ──► Submit          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    geo-desk commands                            │   │
//! │  │    create_invoice, update_invoice, download_invoice, ...       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ geo-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  invoice  │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ LineItem  │  │   rules   │  │   │
//! │  │   │  Invoice  │  │  parsing  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  payment  │  │  format   │  │  catalog  │  │  report   │  │   │
//! │  │   │ registry  │  │ currency  │  │  lookups  │  │ dashboard │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            geo-db (storage)        geo-render (documents)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Invoice, Payment, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`invoice`] - Line totals, subtotal, grand total, status, submit checks
//! - [`payment`] - Payment method registry and payment records
//! - [`catalog`] - Customer directory and product catalog lookups
//! - [`format`] - Configurable currency and date display
//! - [`numbering`] - Invoice number sequence
//! - [`report`] - Dashboard aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use geo_core::invoice::compute_invoice_totals;
//! use geo_core::{LineItem, Money};
//!
//! let items = vec![
//!     LineItem::new("item-1", "2", "Slim Fit Jeans", 1, Money::from_major(1200)),
//!     LineItem::new("item-2", "1", "Premium Cotton T-shirt", 3, Money::from_major(450)),
//! ];
//!
//! let totals = compute_invoice_totals(&items, Money::from_major(100)).unwrap();
//! assert_eq!(totals.subtotal, Money::from_major(2550));
//! assert_eq!(totals.grand_total, Money::from_major(2650));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod format;
pub mod invoice;
pub mod money;
pub mod numbering;
pub mod payment;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CustomerDirectory, ProductCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::CurrencyFormat;
pub use invoice::{InvoiceDraft, InvoiceParts, InvoiceTotals};
pub use money::Money;
pub use numbering::InvoiceNumbering;
pub use payment::PaymentMethodRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on a single invoice.
///
/// ## Business Reason
/// Keeps a downloaded invoice to a handful of pages.
pub const MAX_INVOICE_ITEMS: usize = 200;

/// Maximum quantity on a single line item.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10 on wholesale orders.
pub const MAX_ITEM_QUANTITY: u32 = 9_999;

/// Highest unit price or delivery charge accepted (৳1,000,000,000).
///
/// `MAX_PRICE × MAX_ITEM_QUANTITY × MAX_INVOICE_ITEMS + MAX_PRICE` stays
/// well inside `i64` poisha, so invoice totals never overflow.
pub const MAX_PRICE: Money = Money::from_major(1_000_000_000);

/// Default payment terms, in days after the invoice date.
pub const DEFAULT_DUE_DAYS: u32 = 15;
