//! # API Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Geo Invoice                            │
//! │                                                                         │
//! │  UI shell                    Rust desk                                  │
//! │  ────────                    ─────────                                  │
//! │                                                                         │
//! │  create_invoice(draft)                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Submit check failed? ── CoreError::MissingCustomer ──┐         │  │
//! │  │         │                                             │         │  │
//! │  │  Storage failed? ─────── DbError::UniqueViolation ────┤         │  │
//! │  │         │                                             │         │  │
//! │  │  Export failed? ──────── ExportError::Io ─────────────┼─► ApiError │
//! │  │         │                                             │         │  │
//! │  │  Render contract broken? RenderError (logged) ────────┘         │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code    = "VALIDATION_ERROR"                                         │
//! │  e.message = "Please select a customer"                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use geo_core::{CoreError, ValidationError};
use geo_db::DbError;
use geo_render::{ExportError, RenderError};
use serde::Serialize;

use crate::config::ConfigError;

/// API error returned from desk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Please add at least one item to the invoice"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed; the user can correct it
    ValidationError,

    /// A record with the same key or unique field exists
    Duplicate,

    /// Database operation failed
    DatabaseError,

    /// Saving or showing a document failed
    ExportFailed,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error (a broken invariant, not the user's doing)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a duplicate error.
    pub fn duplicate(field: &str, value: &str) -> Self {
        ApiError::new(
            ErrorCode::Duplicate,
            format!("{} '{}' already exists", field, value),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::duplicate(&field, &value),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Stored record could not be read: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Stored record is unreadable")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvoiceNotFound(id) => ApiError::not_found("Invoice", &id),
            CoreError::ItemNotFound(id) => ApiError::not_found("Line item", &id),
            CoreError::InconsistentInvoice { .. } => {
                tracing::error!("{}", err);
                ApiError::internal(err.to_string())
            }
            CoreError::Validation(ValidationError::Duplicate { field, value }) => {
                ApiError::duplicate(&field, &value)
            }
            CoreError::MissingCustomer
            | CoreError::EmptyItemList
            | CoreError::InvalidPaymentMethod(_)
            | CoreError::NegativeDeliveryCharge
            | CoreError::TooManyItems { .. }
            | CoreError::Validation(_) => ApiError::validation(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::from(CoreError::Validation(err))
    }
}

/// Render errors mean the caller handed over an invoice that should never
/// have existed. They are logged and reported as internal.
impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        tracing::error!(error = %err, "Invoice could not be rendered");
        ApiError::internal(err.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Render(e) => ApiError::from(e),
            other => ApiError::new(ErrorCode::ExportFailed, other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for desk commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_checks_are_validation_errors() {
        let err = ApiError::from(CoreError::MissingCustomer);
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please select a customer");

        let err = ApiError::from(CoreError::InvalidPaymentMethod("card".into()));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_duplicates_map_from_both_layers() {
        let from_db = ApiError::from(DbError::duplicate("invoiceNumber", "INV-1001"));
        let from_core = ApiError::from(ValidationError::Duplicate {
            field: "invoiceNumber".into(),
            value: "INV-1001".into(),
        });
        assert_eq!(from_db, from_core);
        assert_eq!(from_db.code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_render_and_export_errors() {
        let render = RenderError::EmptyItems {
            invoice_number: "INV-1001".into(),
        };
        assert_eq!(ApiError::from(render).code, ErrorCode::Internal);

        let export = ExportError::SurfaceUnavailable("no display".into());
        assert_eq!(ApiError::from(export).code, ErrorCode::ExportFailed);

        let wrapped = ExportError::Render(RenderError::MissingCustomer {
            invoice_number: "INV-1001".into(),
        });
        assert_eq!(ApiError::from(wrapped).code, ErrorCode::Internal);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Invoice", "INV-9")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Invoice not found: INV-9");
    }
}
