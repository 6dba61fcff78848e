//! # Render & Export Errors
//!
//! ```text
//! RenderError  - the invoice cannot be drawn (caller skipped validation,
//!                or the PDF writer failed)
//! ExportError  - the document was drawn but could not be delivered
//! ```
//!
//! A render error is a contract violation by the caller. An export error is
//! recoverable: the invoice is untouched and the user can try again.

use std::path::PathBuf;

use thiserror::Error;

/// The invoice could not be turned into a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Invoice has no line items.
    #[error("Cannot render invoice {invoice_number}: it has no items")]
    EmptyItems { invoice_number: String },

    /// Invoice has no customer, or the customer has no name.
    #[error("Cannot render invoice {invoice_number}: no customer")]
    MissingCustomer { invoice_number: String },

    /// The PDF writer rejected the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}

/// The document could not be saved or shown.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing the artifact failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The print surface refused to open.
    #[error("Print surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

impl ExportError {
    /// Returns true when the failure came from the caller's input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ExportError::Render(_))
    }
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for exports.
pub type ExportResult<T> = Result<T, ExportError>;
