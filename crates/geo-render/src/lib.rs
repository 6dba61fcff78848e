//! # geo-render: Invoice Documents
//!
//! Projects a computed [`Invoice`](geo_core::Invoice) into the two document
//! forms the business hands to customers:
//!
//! - **Markup**: a self-contained HTML page for on-screen preview and
//!   printing ([`render_invoice_markup`])
//! - **Binary**: a paginated A4 PDF for download ([`export_invoice_binary`])
//!
//! ## Rendering Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Invoice ─┬─► markup::render_invoice_markup ──► String                │
//! │            │                                     │                      │
//! │            │                                     └──► PrintSurface      │
//! │            │                                                            │
//! │            └─► layout::layout_invoice ──► DocumentLayout               │
//! │                      │ pagination, row shading, word wrap               │
//! │                      ▼                                                  │
//! │                pdf::write_pdf ──► Vec<u8> ──► ArtifactSink (async)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both forms are deterministic: the same invoice, profile and currency
//! format always give the same output. Nothing reads the clock.
//!
//! The renderer trusts the invoice's computed totals. It only refuses
//! invoices without items or without a customer
//! ([`RenderError`]); those reach here only when a caller skipped the
//! submit checks.

pub mod error;
pub mod export;
pub mod layout;
pub mod markup;
pub mod pdf;
pub mod wrap;

pub use error::{ExportError, ExportResult, RenderError, RenderResult};
pub use export::{
    artifact_filename, export_invoice_binary, print_invoice, render_invoice_pdf, ArtifactSink,
    FileSink, HtmlFileSurface, PrintSurface, DEFAULT_ARTIFACT_PREFIX,
};
pub use layout::{layout_invoice, DocumentLayout, PageSpec};
pub use markup::render_invoice_markup;
pub use pdf::write_pdf;

/// First footer line of every document.
pub const FOOTER_THANKS: &str = "Thank you for your business!";

/// Second footer line of every document.
pub const FOOTER_CONTACT: &str = "If you have any questions about this invoice, please contact us.";
