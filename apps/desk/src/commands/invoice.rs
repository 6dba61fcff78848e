//! # Invoice Commands
//!
//! Create, edit, view, delete, print and download invoices.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  new_invoice_draft ──► form edits (InvoiceDraft mutators, live totals)  │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  create_invoice(draft)                                                  │
//! │     1. submit checks (items, customer, payment method)                  │
//! │     2. lock numbering, take the next number                             │
//! │     3. finalize: customer lookup, totals, status                        │
//! │     4. insert by invoice number (duplicate → DUPLICATE)                 │
//! │     5. advance the counter, release the lock                            │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  print_invoice / download_invoice ──► geo-render ──► export dir         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed submit leaves nothing behind: no record, no consumed number.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use geo_core::invoice::validate_invoice_for_submit;
use geo_core::payment::PaymentMethodOption;
use geo_core::{Customer, Invoice, InvoiceDraft, InvoiceTotals};
use geo_db::{snapshot, Repository, Storage};
use geo_render::{export_invoice_binary, print_invoice as show_invoice, render_invoice_markup};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::Desk;

/// A fresh form: the number it will most likely get, and the empty draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoiceForm {
    /// Shown on the form; the number is only taken on submit.
    pub suggested_number: String,
    pub draft: InvoiceDraft,
}

/// Opens a new invoice form dated today.
pub async fn new_invoice_draft<S: Storage>(desk: &Desk<S>) -> ApiResult<NewInvoiceForm> {
    new_invoice_draft_on(desk, Local::now().date_naive()).await
}

/// Opens a new invoice form dated `invoice_date`.
pub async fn new_invoice_draft_on<S: Storage>(
    desk: &Desk<S>,
    invoice_date: NaiveDate,
) -> ApiResult<NewInvoiceForm> {
    let settings = &desk.config().invoice;
    let mut draft = InvoiceDraft::new(invoice_date, settings.default_due_days);
    draft.notes = settings.default_notes.clone();

    Ok(NewInvoiceForm {
        suggested_number: desk.numbering().lock().await.peek(),
        draft,
    })
}

/// Live totals of a draft, for the form's summary panel.
pub fn draft_totals(draft: &InvoiceDraft) -> InvoiceTotals {
    draft.totals()
}

/// Options of the payment method picker.
pub fn payment_method_options<S: Storage>(desk: &Desk<S>) -> Vec<PaymentMethodOption> {
    desk.payment_methods().options()
}

/// Submits a new invoice.
pub async fn create_invoice<S: Storage>(desk: &Desk<S>, draft: InvoiceDraft) -> ApiResult<Invoice> {
    validate_invoice_for_submit(&draft.customer_id, &draft.items, &draft.payment_method)?;

    let customers = snapshot::<Customer, _>(&desk.store().customers()).await?;

    let mut numbering = desk.numbering().lock().await;
    let number = numbering.peek();
    let invoice = draft.finalize(&number, &customers)?;

    desk.store().invoices().insert(&invoice).await?;
    numbering.issue()?;
    drop(numbering);

    info!(
        invoice_number = %invoice.invoice_number,
        grand_total = %invoice.grand_total,
        status = %invoice.status,
        "Invoice created"
    );
    Ok(invoice)
}

/// Reopens a stored invoice for editing.
///
/// Derived fields are not checked here: saving the draft recomputes them,
/// which is how a damaged record gets repaired.
pub async fn edit_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<InvoiceDraft> {
    let invoice = load_invoice(desk, invoice_number).await?;
    Ok(InvoiceDraft::from_invoice(&invoice))
}

/// Replaces a stored invoice with the edited draft. The number is kept.
pub async fn update_invoice<S: Storage>(
    desk: &Desk<S>,
    invoice_number: &str,
    draft: InvoiceDraft,
) -> ApiResult<Invoice> {
    validate_invoice_for_submit(&draft.customer_id, &draft.items, &draft.payment_method)?;

    let invoices = desk.store().invoices();
    if invoices.get(invoice_number).await?.is_none() {
        return Err(ApiError::not_found("Invoice", invoice_number));
    }

    let customers = snapshot::<Customer, _>(&desk.store().customers()).await?;
    let invoice = draft.finalize(invoice_number, &customers)?;
    invoices.update(&invoice).await?;

    info!(
        invoice_number = %invoice.invoice_number,
        grand_total = %invoice.grand_total,
        status = %invoice.status,
        "Invoice updated"
    );
    Ok(invoice)
}

/// Fetches one invoice.
///
/// Totals, line totals and status are re-verified, so a record altered
/// outside the desk is reported as `INTERNAL` instead of being printed.
pub async fn get_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<Invoice> {
    let invoice = load_invoice(desk, invoice_number).await?;
    invoice.check_invariants()?;
    Ok(invoice)
}

async fn load_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<Invoice> {
    desk.store()
        .invoices()
        .get(invoice_number)
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice", invoice_number))
}

/// All invoices, newest invoice date first.
pub async fn list_invoices<S: Storage>(desk: &Desk<S>) -> ApiResult<Vec<Invoice>> {
    let mut invoices = desk.store().invoices().list().await?;
    // Stable: invoices on the same date keep their stored order reversed.
    invoices.reverse();
    invoices.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
    debug!(count = invoices.len(), "Invoices listed");
    Ok(invoices)
}

/// Deletes an invoice. Its number is not handed out again.
pub async fn delete_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<()> {
    if !desk.store().invoices().delete(invoice_number).await? {
        return Err(ApiError::not_found("Invoice", invoice_number));
    }
    info!(invoice_number = %invoice_number, "Invoice deleted");
    Ok(())
}

/// The printable page of an invoice, for an in-app preview.
pub async fn invoice_markup<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<String> {
    let invoice = get_invoice(desk, invoice_number).await?;
    let config = desk.config();
    Ok(render_invoice_markup(&invoice, &config.business, &config.currency)?)
}

/// Writes the printable page and returns where it went.
pub async fn print_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<PathBuf> {
    let invoice = get_invoice(desk, invoice_number).await?;
    let config = desk.config();
    let surface = desk.print_surface();
    Ok(show_invoice(&invoice, &config.business, &config.currency, &surface)?)
}

/// Saves the invoice PDF into the export directory.
pub async fn download_invoice<S: Storage>(desk: &Desk<S>, invoice_number: &str) -> ApiResult<PathBuf> {
    let invoice = get_invoice(desk, invoice_number).await?;
    let config = desk.config();
    let sink = desk.file_sink();
    let path = export_invoice_binary(
        &invoice,
        &config.business,
        &config.currency,
        &config.invoice.pdf_prefix,
        &sink,
    )
    .await?;
    Ok(path)
}
