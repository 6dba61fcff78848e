//! # Invoice Numbering
//!
//! Invoice numbers are the business key of an invoice: the configured
//! prefix followed by a counter (`INV-1001`, `INV-1002`, ...). The counter
//! only moves forward, so a deleted invoice's number is never reissued.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Default prefix of invoice numbers.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV-";

/// First counter value of a fresh install.
pub const DEFAULT_NEXT_NUMBER: u64 = 1001;

/// Prefix and next counter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceNumbering {
    pub prefix: String,
    #[ts(type = "number")]
    pub next_number: u64,
}

impl Default for InvoiceNumbering {
    fn default() -> Self {
        InvoiceNumbering {
            prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            next_number: DEFAULT_NEXT_NUMBER,
        }
    }
}

impl InvoiceNumbering {
    pub fn new(prefix: impl Into<String>, next_number: u64) -> Self {
        InvoiceNumbering {
            prefix: prefix.into(),
            next_number,
        }
    }

    /// The number the next invoice will get, without consuming it.
    pub fn peek(&self) -> String {
        format!("{}{}", self.prefix, self.next_number)
    }

    /// Returns the next number and advances the counter.
    pub fn issue(&mut self) -> CoreResult<String> {
        let number = self.peek();
        self.next_number = self.next_number.checked_add(1).ok_or_else(|| {
            CoreError::Validation(ValidationError::OutOfRange {
                field: "next_number".to_string(),
                min: 0,
                max: i64::MAX,
            })
        })?;
        Ok(number)
    }

    /// Moves the counter past `number` if it carries this prefix.
    ///
    /// Used when an invoice is stored under a number that was typed in or
    /// imported, so the sequence never hands it out again.
    pub fn observe(&mut self, number: &str) {
        let counter = number
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.parse::<u64>().ok());
        if let Some(n) = counter {
            if n >= self.next_number {
                self.next_number = n.saturating_add(1);
            }
        }
    }
}
