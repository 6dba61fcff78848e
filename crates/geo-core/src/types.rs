//! # Domain Types
//!
//! Core domain types used throughout Geo Invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Invoice     │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  customer       │   │  id             │       │
//! │  │  name, email    │   │  invoice_number │   │  method         │       │
//! │  │  address, phone │   │  items ──┐      │   │  amount         │       │
//! │  └─────────────────┘   │  status  │      │   │  status         │       │
//! │                        └──────────┼──────┘   └─────────────────┘       │
//! │  ┌─────────────────┐   ┌──────────▼──────┐                             │
//! │  │    Product      │   │    LineItem     │   ┌─────────────────┐       │
//! │  │  ─────────────  │   │  ─────────────  │   │ PaymentMethod   │       │
//! │  │  id, sku        │◄──│  product_ref    │   │  cash  bkash    │       │
//! │  │  name, price    │   │  quantity       │   │  nagad bank due │       │
//! │  └─────────────────┘   │  line_total     │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Business Keys
//! - Invoices are keyed by `invoice_number` (e.g. `INV-1001`)
//! - Customers and products are keyed by their opaque `id`
//! - Line items are owned by exactly one invoice; their `id` (`item-N`) is
//!   only unique within it
//!
//! Field names serialize in camelCase, with the line item's `product`,
//! `price` and `total` keys kept as the UI shell stores them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer the business invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier.
    pub id: String,

    /// Display name, copied onto line items as their description.
    pub name: String,

    /// Stock Keeping Unit - business identifier (e.g. `GF-TS-001`).
    pub sku: String,

    /// Catalog grouping (T-Shirts, Pants, ...).
    #[serde(default)]
    pub category: String,

    /// Unit price.
    pub price: Money,

    /// Units on hand.
    #[serde(default)]
    pub stock: u32,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product/quantity/price row on an invoice.
///
/// ## Invariant
/// `line_total == quantity × unit_price`. The mutators in
/// [`crate::invoice`] recompute the total on every change; code that
/// assigns the fields directly must call `recompute_total()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Row id, unique within the owning invoice (`item-1`, `item-2`, ...).
    pub id: String,

    /// Product id selected for this row. Empty until a product is chosen.
    #[serde(rename = "product")]
    pub product_ref: String,

    /// Free text shown in the description column.
    pub description: String,

    pub quantity: u32,

    #[serde(rename = "price")]
    pub unit_price: Money,

    #[serde(rename = "total")]
    pub line_total: Money,
}

// =============================================================================
// Payment Method
// =============================================================================

/// The five recognized ways an invoice is settled.
///
/// `Due` means the amount is unpaid and deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Bkash,
    Nagad,
    Bank,
    Due,
}

impl PaymentMethod {
    /// All methods, in the order payment pickers list them.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Bkash,
        PaymentMethod::Nagad,
        PaymentMethod::Bank,
        PaymentMethod::Due,
    ];

    /// The stored value (`cash`, `bkash`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Bkash => "bkash",
            PaymentMethod::Nagad => "nagad",
            PaymentMethod::Bank => "bank",
            PaymentMethod::Due => "due",
        }
    }

    /// Human-readable label used on screens and documents.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash Payment",
            PaymentMethod::Bkash => "bKash Mobile Banking",
            PaymentMethod::Nagad => "Nagad Mobile Banking",
            PaymentMethod::Bank => "Bank Transfer",
            PaymentMethod::Due => "Due Payment",
        }
    }

    /// Returns true when the amount is deferred rather than settled.
    pub const fn is_deferred(&self) -> bool {
        matches!(self, PaymentMethod::Due)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of the stored value.
impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "bkash" => Ok(PaymentMethod::Bkash),
            "nagad" => Ok(PaymentMethod::Nagad),
            "bank" => Ok(PaymentMethod::Bank),
            "due" => Ok(PaymentMethod::Due),
            _ => Err(CoreError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Settlement status of an invoice.
///
/// Only `Paid` and `Due` are ever derived (see
/// [`crate::invoice::derive_status`]). `Pending` exists so that records
/// written by older screens still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Due,
}

impl InvoiceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Due => "Due",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A computed invoice.
///
/// ## Invariants
/// - `subtotal == Σ items[i].line_total`
/// - `grand_total == subtotal + delivery_charge`
/// - `delivery_charge >= 0`
/// - `status == derive_status(payment_method)`
///
/// Build with [`Invoice::new`](crate::invoice) or
/// [`InvoiceDraft::finalize`](crate::invoice::InvoiceDraft::finalize),
/// which compute the derived fields. `check_invariants()` re-verifies a
/// record read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Business key (e.g. `INV-1001`).
    pub invoice_number: String,

    #[ts(as = "String")]
    pub invoice_date: NaiveDate,

    #[ts(as = "String")]
    pub due_date: NaiveDate,

    /// Customer snapshot taken at submit time.
    #[serde(default)]
    pub customer: Option<Customer>,

    /// Rows in entry order.
    pub items: Vec<LineItem>,

    pub payment_method: PaymentMethod,

    pub subtotal: Money,

    #[serde(default)]
    pub delivery_charge: Money,

    pub grand_total: Money,

    #[serde(default)]
    pub notes: String,

    pub status: InvoiceStatus,
}

// =============================================================================
// Payment
// =============================================================================

/// Status of a recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    /// Deferred (`due`) payment not yet collected.
    Pending,
    /// Money received.
    Completed,
}

/// A payment received, recorded independently of invoices.
///
/// Append-only: payments are never edited after they are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// `PAY-<uuid>`.
    pub id: String,
    pub method: PaymentMethod,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub status: PaymentStatus,
}

// =============================================================================
// Business Profile
// =============================================================================

/// Seller identity printed on every rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            name: "Geo Fashion".to_string(),
            address: "123 Fashion Street, Dhaka, Bangladesh".to_string(),
            phone: "+880 1712 345678".to_string(),
            email: "contact@geofashion.com".to_string(),
            tax_id: None,
            website: Some("www.geofashion.com".to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
