//! # Invoice Computation
//!
//! Maintains the arithmetic invariants of an in-progress or stored invoice.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Computation                              │
//! │                                                                         │
//! │   select_product ──► unit_price, description ──┐                        │
//! │   set_quantity ────────────────────────────────┼──► recompute_total    │
//! │   set_unit_price ──────────────────────────────┘         │              │
//! │                                                          ▼              │
//! │                          compute_subtotal = Σ line_total                │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │            compute_grand_total = subtotal + delivery_charge             │
//! │                                                                         │
//! │   derive_status(method): "due" ──► Due, any other known ──► Paid       │
//! │                                                                         │
//! │   validate_invoice_for_submit: items ──► customer ──► payment method   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submit Checks
//! The three pre-conditions are independent: each one fails on its own
//! with the other two inputs valid. When several are violated at once the
//! first in the order above is reported, so an empty item list wins over
//! a missing customer.
//!
//! ## Example
//! ```rust
//! use geo_core::invoice::{derive_status, InvoiceDraft};
//! use geo_core::catalog::{default_customers, default_products};
//! use geo_core::{InvoiceStatus, Money};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let mut draft = InvoiceDraft::new(date, 15);
//! let id = draft.add_item();
//! draft.select_product(&id, "1", &default_products()).unwrap();
//! draft.update_quantity(&id, 2).unwrap();
//! draft.customer_id = "1".to_string();
//! draft.payment_method = "due".to_string();
//!
//! let invoice = draft.finalize("INV-1001", &default_customers()).unwrap();
//! assert_eq!(invoice.grand_total, Money::from_major(900));
//! assert_eq!(invoice.status, InvoiceStatus::Due);
//! assert_eq!(derive_status("cash").unwrap(), InvoiceStatus::Paid);
//! ```

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{CustomerDirectory, ProductCatalog};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Customer, Invoice, InvoiceStatus, LineItem, PaymentMethod};
use crate::validation::{
    validate_delivery_charge, validate_invoice_number, validate_item_count, validate_price,
    validate_quantity,
};

/// Prefix of generated line item ids.
const ITEM_ID_PREFIX: &str = "item-";

// =============================================================================
// Line Items
// =============================================================================

impl LineItem {
    /// Creates a line item with its total already computed.
    pub fn new(
        id: impl Into<String>,
        product_ref: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        let mut item = LineItem {
            id: id.into(),
            product_ref: product_ref.into(),
            description: description.into(),
            quantity,
            unit_price,
            line_total: Money::zero(),
        };
        item.recompute_total();
        item
    }

    /// A freshly added form row: no product, quantity 1, price 0.
    pub fn blank(id: impl Into<String>) -> Self {
        LineItem::new(id, "", "", 1, Money::zero())
    }

    /// Sets `line_total = quantity × unit_price`.
    pub fn recompute_total(&mut self) {
        self.line_total = self.unit_price.multiply_quantity(self.quantity);
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_total();
    }

    pub fn set_unit_price(&mut self, unit_price: Money) {
        self.unit_price = unit_price;
        self.recompute_total();
    }

    /// Returns true when the stored total matches quantity × unit price.
    pub fn is_consistent(&self) -> bool {
        self.line_total == self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Free-function form of [`LineItem::recompute_total`].
pub fn recompute_line_total(item: &mut LineItem) {
    item.recompute_total();
}

/// Points `item` at `product_ref` and copies the catalog entry onto it.
///
/// On a catalog hit the unit price and description are overwritten from
/// the product and the total is recomputed. On a miss only `product_ref`
/// changes. Returns whether the product was found.
pub fn apply_product_selection<C>(item: &mut LineItem, product_ref: &str, catalog: &C) -> bool
where
    C: ProductCatalog + ?Sized,
{
    item.product_ref = product_ref.to_string();

    match catalog.product(product_ref) {
        Some(product) => {
            item.unit_price = product.price;
            item.description = product.name;
            item.recompute_total();
            true
        }
        None => false,
    }
}

// =============================================================================
// Totals
// =============================================================================

/// The two derived sums of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub grand_total: Money,
}

/// Sum of line totals, in order. Zero for an empty list.
pub fn compute_subtotal(items: &[LineItem]) -> Money {
    items.iter().map(|item| item.line_total).sum()
}

/// `subtotal + delivery_charge`.
///
/// A negative delivery charge is rejected, not clamped. One above
/// [`crate::MAX_PRICE`] is out of range.
pub fn compute_grand_total(subtotal: Money, delivery_charge: Money) -> CoreResult<Money> {
    if delivery_charge.is_negative() {
        return Err(CoreError::NegativeDeliveryCharge);
    }
    validate_delivery_charge(delivery_charge)?;
    Ok(subtotal + delivery_charge)
}

/// Computes subtotal and grand total in one call.
pub fn compute_invoice_totals(items: &[LineItem], delivery_charge: Money) -> CoreResult<InvoiceTotals> {
    let subtotal = compute_subtotal(items);
    let grand_total = compute_grand_total(subtotal, delivery_charge)?;
    Ok(InvoiceTotals {
        subtotal,
        grand_total,
    })
}

// =============================================================================
// Status
// =============================================================================

/// Status implied by a parsed payment method.
pub const fn status_for(method: PaymentMethod) -> InvoiceStatus {
    if method.is_deferred() {
        InvoiceStatus::Due
    } else {
        InvoiceStatus::Paid
    }
}

/// Status implied by a raw payment method value.
///
/// `"due"` gives `Due`, every other recognized method gives `Paid`.
/// Matching ignores case. Anything else is `InvalidPaymentMethod`.
pub fn derive_status(payment_method: &str) -> CoreResult<InvoiceStatus> {
    let method: PaymentMethod = payment_method.parse()?;
    Ok(status_for(method))
}

// =============================================================================
// Submit Validation
// =============================================================================

/// Pre-conditions checked before an invoice is persisted or rendered.
///
/// A blank `customer_id` counts as no customer selected. On success the
/// parsed payment method is returned.
pub fn validate_invoice_for_submit(
    customer_id: &str,
    items: &[LineItem],
    payment_method: &str,
) -> CoreResult<PaymentMethod> {
    if items.is_empty() {
        return Err(CoreError::EmptyItemList);
    }

    if customer_id.trim().is_empty() {
        return Err(CoreError::MissingCustomer);
    }

    payment_method.parse()
}

// =============================================================================
// Invoice Construction
// =============================================================================

/// Inputs to [`Invoice::new`]. Derived fields are computed, not passed.
#[derive(Debug, Clone)]
pub struct InvoiceParts {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub payment_method: PaymentMethod,
    pub delivery_charge: Money,
    pub notes: String,
}

impl Invoice {
    /// Builds an invoice, computing line totals, sums and status.
    ///
    /// ## Errors
    /// - `Validation` for a blank invoice number, an out-of-range quantity,
    ///   unit price or delivery charge
    /// - `EmptyItemList` / `TooManyItems` for the item count
    /// - `NegativeDeliveryCharge`
    pub fn new(parts: InvoiceParts) -> CoreResult<Invoice> {
        validate_invoice_number(&parts.invoice_number)?;

        if parts.items.is_empty() {
            return Err(CoreError::EmptyItemList);
        }
        validate_item_count(parts.items.len())?;

        let mut items = parts.items;
        for item in &mut items {
            validate_quantity(item.quantity)?;
            if item.unit_price.is_negative() {
                return Err(ValidationError::MustBePositive {
                    field: "price".to_string(),
                }
                .into());
            }
            validate_price(item.unit_price)?;
            item.recompute_total();
        }

        let totals = compute_invoice_totals(&items, parts.delivery_charge)?;

        Ok(Invoice {
            invoice_number: parts.invoice_number.trim().to_string(),
            invoice_date: parts.invoice_date,
            due_date: parts.due_date,
            customer: Some(parts.customer),
            items,
            payment_method: parts.payment_method,
            subtotal: totals.subtotal,
            delivery_charge: parts.delivery_charge,
            grand_total: totals.grand_total,
            notes: parts.notes,
            status: status_for(parts.payment_method),
        })
    }

    /// Re-verifies the derived fields of a record read from storage.
    pub fn check_invariants(&self) -> CoreResult<()> {
        let inconsistent = |reason: &str| CoreError::InconsistentInvoice {
            invoice_number: self.invoice_number.clone(),
            reason: reason.to_string(),
        };

        let out_of_range = self
            .items
            .iter()
            .find(|item| validate_price(item.unit_price).is_err());
        if let Some(item) = out_of_range {
            return Err(inconsistent(&format!("unit price of {} is out of range", item.id)));
        }
        if let Some(item) = self.items.iter().find(|item| !item.is_consistent()) {
            return Err(inconsistent(&format!("line total of {} is stale", item.id)));
        }
        if self.subtotal != compute_subtotal(&self.items) {
            return Err(inconsistent("subtotal does not match line totals"));
        }
        if self.delivery_charge.is_negative() {
            return Err(inconsistent("delivery charge is negative"));
        }
        if self.grand_total != self.subtotal + self.delivery_charge {
            return Err(inconsistent("grand total does not match subtotal plus delivery"));
        }
        if self.status != status_for(self.payment_method) {
            return Err(inconsistent("status does not match payment method"));
        }
        Ok(())
    }

    /// Current totals of the invoice.
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals {
            subtotal: self.subtotal,
            grand_total: self.grand_total,
        }
    }
}

/// Due date for the given payment terms.
pub fn due_date_for(invoice_date: NaiveDate, due_days: u32) -> NaiveDate {
    invoice_date + Duration::days(i64::from(due_days))
}

// =============================================================================
// Draft
// =============================================================================

/// Form state of an invoice being created or edited.
///
/// Every mutator keeps the touched line total current, so `totals()` is
/// always valid while the user types. `finalize` runs the submit checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    /// Selected customer id, empty when none is selected.
    pub customer_id: String,
    #[ts(as = "String")]
    pub invoice_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub items: Vec<LineItem>,
    /// Raw payment method value from the picker, empty when unset.
    pub payment_method: String,
    pub delivery_charge: Money,
    pub notes: String,
    next_item_id: u32,
}

impl InvoiceDraft {
    /// An empty draft dated `invoice_date`, due after `due_days`.
    pub fn new(invoice_date: NaiveDate, due_days: u32) -> Self {
        InvoiceDraft {
            customer_id: String::new(),
            invoice_date,
            due_date: due_date_for(invoice_date, due_days),
            items: Vec::new(),
            payment_method: String::new(),
            delivery_charge: Money::zero(),
            notes: String::new(),
            next_item_id: 1,
        }
    }

    /// Reopens a stored invoice for editing.
    ///
    /// New rows continue numbering after the highest `item-N` on the
    /// invoice. Ids that do not follow that pattern count as zero.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let highest = invoice
            .items
            .iter()
            .filter_map(|item| item.id.strip_prefix(ITEM_ID_PREFIX))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);

        InvoiceDraft {
            customer_id: invoice
                .customer
                .as_ref()
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            items: invoice.items.clone(),
            payment_method: invoice.payment_method.as_str().to_string(),
            delivery_charge: invoice.delivery_charge,
            notes: invoice.notes.clone(),
            next_item_id: highest.saturating_add(1),
        }
    }

    /// Appends a blank row and returns its id.
    pub fn add_item(&mut self) -> String {
        let id = format!("{ITEM_ID_PREFIX}{}", self.next_item_id);
        self.next_item_id = self.next_item_id.saturating_add(1);
        self.items.push(LineItem::blank(id.clone()));
        id
    }

    /// Removes a row. Unknown ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|item| item.id != item_id);
    }

    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> CoreResult<()> {
        self.item_mut(item_id)?.set_quantity(quantity);
        Ok(())
    }

    pub fn update_unit_price(&mut self, item_id: &str, unit_price: Money) -> CoreResult<()> {
        if unit_price.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            }
            .into());
        }
        validate_price(unit_price)?;
        self.item_mut(item_id)?.set_unit_price(unit_price);
        Ok(())
    }

    pub fn update_description(&mut self, item_id: &str, description: &str) -> CoreResult<()> {
        self.item_mut(item_id)?.description = description.to_string();
        Ok(())
    }

    /// Applies a product choice to a row. Returns whether the product was found.
    pub fn select_product<C>(&mut self, item_id: &str, product_ref: &str, catalog: &C) -> CoreResult<bool>
    where
        C: ProductCatalog + ?Sized,
    {
        let item = self.item_mut(item_id)?;
        Ok(apply_product_selection(item, product_ref, catalog))
    }

    /// Live totals of the current rows.
    ///
    /// A negative delivery charge typed into the form shows as zero here;
    /// `finalize` rejects it.
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = compute_subtotal(&self.items);
        let delivery = if self.delivery_charge.is_negative() {
            Money::zero()
        } else {
            self.delivery_charge
        };
        InvoiceTotals {
            subtotal,
            grand_total: subtotal + delivery,
        }
    }

    /// Runs the submit checks and produces the invoice.
    pub fn finalize<D>(&self, invoice_number: &str, customers: &D) -> CoreResult<Invoice>
    where
        D: CustomerDirectory + ?Sized,
    {
        let method = validate_invoice_for_submit(&self.customer_id, &self.items, &self.payment_method)?;

        let customer = customers
            .customer(&self.customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(self.customer_id.clone()))?;

        Invoice::new(InvoiceParts {
            invoice_number: invoice_number.to_string(),
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            customer,
            items: self.items.clone(),
            payment_method: method,
            delivery_charge: self.delivery_charge,
            notes: self.notes.clone(),
        })
    }

    fn item_mut(&mut self, item_id: &str) -> CoreResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
