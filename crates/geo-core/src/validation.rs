//! # Validation Module
//!
//! Input validation for the records the invoicing screens create.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI shell                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: geo-desk command                                             │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository                                                   │
//! │  └── Business key uniqueness                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use geo_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("GF-TS-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Customer, Product};
use crate::{MAX_INVOICE_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use geo_core::validation::validate_sku;
///
/// assert!(validate_sku("GF-JN-001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    required("sku", sku)?;
    max_len("sku", sku, 50)?;

    if !sku
        .trim()
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or customer name: required, at most 200 characters.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    required(field, name)?;
    max_len(field, name, 200)
}

/// Validates an email address.
///
/// One `@` with a non-empty local part and a dotted domain. Anything
/// stricter belongs to the mail server.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;
    max_len("email", email, 254)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "invalid email address".to_string(),
    };

    let email = email.trim();
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(())
}

/// Validates a phone number: digits plus `+`, spaces, hyphens, parentheses.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    required("phone", phone)?;
    max_len("phone", phone, 30)?;

    let phone = phone.trim();
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));

    if !allowed || digits < 6 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be a phone number".to_string(),
        });
    }

    Ok(())
}

/// Validates an invoice number: required, at most 50 characters, no spaces.
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    required("invoice_number", number)?;
    max_len("invoice_number", number, 50)?;

    if number.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "invoice_number".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must not exceed MAX_ITEM_QUANTITY (9,999)
///
/// Zero is accepted: a row can be zeroed out without being removed.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Example
/// ```rust
/// use geo_core::validation::validate_price;
/// use geo_core::Money;
///
/// assert!(validate_price(Money::from_major(450)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-100)).is_err());
/// assert!(validate_price(Money::from_major(2_000_000_000)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_amount_range("price", price)
}

/// Validates a delivery charge: same range as a price.
pub fn validate_delivery_charge(charge: Money) -> ValidationResult<()> {
    validate_amount_range("delivery_charge", charge)
}

fn validate_amount_range(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE.major(),
        });
    }

    Ok(())
}

/// Validates a payment amount: must be above zero.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of rows on one invoice.
pub fn validate_item_count(count: usize) -> CoreResult<()> {
    if count > MAX_INVOICE_ITEMS {
        return Err(CoreError::TooManyItems {
            max: MAX_INVOICE_ITEMS,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of a customer form.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    validate_name("name", &customer.name)?;
    validate_email(&customer.email)?;
    required("address", &customer.address)?;
    max_len("address", &customer.address, 500)?;
    validate_phone(&customer.phone)
}

/// Validates every field of a product form.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("name", &product.name)?;
    validate_sku(&product.sku)?;
    max_len("category", &product.category, 100)?;
    validate_price(product.price)
}

// =============================================================================
// Unit Tests
// =============================================================================
