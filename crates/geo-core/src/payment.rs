//! # Payments
//!
//! The payment-method registry the pickers and documents read from, and
//! construction of standalone payment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Payment, PaymentMethod, PaymentStatus};
use crate::validation::validate_payment_amount;

/// One entry of the payment-method picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethodOption {
    pub value: String,
    pub label: String,
}

/// Ordered `{value, label}` pairs for the recognized methods.
///
/// ## Display Mapping
/// | value   | label                 |
/// |---------|-----------------------|
/// | `cash`  | Cash Payment          |
/// | `bkash` | bKash Mobile Banking  |
/// | `nagad` | Nagad Mobile Banking  |
/// | `bank`  | Bank Transfer         |
/// | `due`   | Due Payment           |
///
/// Values outside the table display verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentMethodRegistry;

impl PaymentMethodRegistry {
    pub fn new() -> Self {
        PaymentMethodRegistry
    }

    /// Options in picker order.
    pub fn options(&self) -> Vec<PaymentMethodOption> {
        PaymentMethod::ALL
            .iter()
            .map(|m| PaymentMethodOption {
                value: m.as_str().to_string(),
                label: m.label().to_string(),
            })
            .collect()
    }

    /// Display label for a raw value; unknown values come back unchanged.
    pub fn label_for(&self, value: &str) -> String {
        value
            .parse::<PaymentMethod>()
            .map(|m| m.label().to_string())
            .unwrap_or_else(|_| value.to_string())
    }

    /// Returns true when `value` is one of the recognized methods.
    pub fn is_valid(&self, value: &str) -> bool {
        value.parse::<PaymentMethod>().is_ok()
    }
}

/// Status a payment is recorded with: deferred methods stay pending.
pub const fn payment_status_for(method: PaymentMethod) -> PaymentStatus {
    if method.is_deferred() {
        PaymentStatus::Pending
    } else {
        PaymentStatus::Completed
    }
}

impl Payment {
    /// Records a payment received at `date`.
    ///
    /// The method is parsed case-insensitively and the amount must be
    /// above zero. The id is `PAY-` followed by a fresh UUID.
    pub fn record(
        method: &str,
        amount: Money,
        description: &str,
        date: DateTime<Utc>,
    ) -> CoreResult<Payment> {
        let method: PaymentMethod = method.parse()?;
        validate_payment_amount(amount)?;

        Ok(Payment {
            id: format!("PAY-{}", Uuid::new_v4()),
            method,
            amount,
            description: description.trim().to_string(),
            date,
            status: payment_status_for(method),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_registry_order_and_labels() {
        let options = PaymentMethodRegistry::new().options();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["cash", "bkash", "nagad", "bank", "due"]);
        assert_eq!(options[1].label, "bKash Mobile Banking");
    }

    #[test]
    fn test_label_for_unknown_is_verbatim() {
        let registry = PaymentMethodRegistry::new();
        assert_eq!(registry.label_for("due"), "Due Payment");
        assert_eq!(registry.label_for("Nagad"), "Nagad Mobile Banking");
        assert_eq!(registry.label_for("cheque"), "cheque");
        assert!(!registry.is_valid("cheque"));
    }

    #[test]
    fn test_record_payment_status() {
        let now = Utc::now();
        let paid = Payment::record("bank", Money::from_major(500), " March rent ", now).unwrap();
        assert_eq!(paid.status, PaymentStatus::Completed);
        assert!(paid.id.starts_with("PAY-"));
        assert_eq!(paid.description, "March rent");

        let deferred = Payment::record("due", Money::from_major(500), "", now).unwrap();
        assert_eq!(deferred.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_record_payment_rejects_bad_input() {
        let now = Utc::now();
        assert!(matches!(
            Payment::record("card", Money::from_major(1), "", now),
            Err(CoreError::InvalidPaymentMethod(_))
        ));
        assert!(matches!(
            Payment::record("cash", Money::zero(), "", now),
            Err(CoreError::Validation(_))
        ));
    }
}
