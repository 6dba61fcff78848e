//! # Error Types
//!
//! Domain-specific error types for geo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  geo-core errors (this file)                                           │
//! │  ├── CoreError        - Submit checks and domain rule failures         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  geo-render errors     RenderError / ExportError                       │
//! │  geo-db errors         DbError                                         │
//! │  geo-desk errors       ApiError (what the UI shell sees)               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (invoice number, id, value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The first three variants are the submit pre-conditions of an invoice.
/// They are user-correctable: the boundary shows them as a blocking message
/// and stops before computing or rendering anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No customer was selected on the invoice form.
    #[error("Please select a customer")]
    MissingCustomer,

    /// The invoice has no line items.
    #[error("Please add at least one item to the invoice")]
    EmptyItemList,

    /// Payment method is unset or not one of the recognized values.
    ///
    /// ## When This Occurs
    /// - Form submitted with no method chosen (empty string)
    /// - Stored record carries a method that was since removed
    #[error("Invalid payment method: '{0}'")]
    InvalidPaymentMethod(String),

    /// Delivery charge below zero. Rejected, never clamped.
    #[error("Delivery charge cannot be negative")]
    NegativeDeliveryCharge,

    /// Customer id does not resolve in the customer directory.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Product id does not resolve in the product catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No invoice stored under this invoice number.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Line item id is not on the invoice being edited.
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// A stored invoice no longer satisfies its totals invariants.
    #[error("Invoice {invoice_number} is inconsistent: {reason}")]
    InconsistentInvoice {
        invoice_number: String,
        reason: String,
    },

    /// Invoice has exceeded maximum allowed items.
    #[error("Invoice cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true for the errors a user fixes by editing the form.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CoreError::MissingCustomer
                | CoreError::EmptyItemList
                | CoreError::InvalidPaymentMethod(_)
                | CoreError::NegativeDeliveryCharge
                | CoreError::TooManyItems { .. }
                | CoreError::Validation(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate invoice number).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
