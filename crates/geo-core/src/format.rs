//! # Display Formatting
//!
//! Currency and date display for screens and rendered documents.
//!
//! ## Currency
//! The currency format is configuration, not a literal. Two presets cover
//! the styles the business has used:
//!
//! ```text
//! taka_symbol()   ৳1234.50          (symbol, no grouping)
//! bdt_code()      BDT 1,234.50      (code, thousands grouping)
//! ```
//!
//! Indian grouping (`12,34,567.00`) is available for either style.
//!
//! ## Dates
//! Dates display as `Mar 1, 2025`. A stored date string that does not
//! parse is shown as-is rather than rejected.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// Where the symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Prefix,
    Suffix,
}

/// Digit grouping of the whole part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    #[default]
    None,
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

/// How money is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Symbol shown next to amounts (`৳`, `BDT`, `Tk`).
    pub symbol: String,
    /// ISO code, used where the symbol cannot be drawn.
    pub code: String,
    pub position: SymbolPosition,
    /// Text between symbol and amount.
    pub separator: String,
    pub grouping: Grouping,
    /// Fraction digits shown, 0 to 2.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::taka_symbol()
    }
}

impl CurrencyFormat {
    /// `৳1234.50`
    pub fn taka_symbol() -> Self {
        CurrencyFormat {
            symbol: "৳".to_string(),
            code: "BDT".to_string(),
            position: SymbolPosition::Prefix,
            separator: String::new(),
            grouping: Grouping::None,
            decimals: 2,
        }
    }

    /// `BDT 1,234.50`
    pub fn bdt_code() -> Self {
        CurrencyFormat {
            symbol: "BDT".to_string(),
            code: "BDT".to_string(),
            position: SymbolPosition::Prefix,
            separator: " ".to_string(),
            grouping: Grouping::Thousands,
            decimals: 2,
        }
    }

    /// Same format with a symbol the standard PDF fonts can draw.
    ///
    /// The built-in Helvetica covers Latin-1 only. A symbol outside it is
    /// replaced by the currency code followed by a space.
    pub fn for_builtin_fonts(&self) -> Self {
        let drawable = self
            .symbol
            .chars()
            .all(|c| (' '..='~').contains(&c) || ('\u{a0}'..='\u{ff}').contains(&c));
        if drawable {
            return self.clone();
        }

        CurrencyFormat {
            symbol: self.code.clone(),
            separator: " ".to_string(),
            ..self.clone()
        }
    }

    /// Formats an amount.
    ///
    /// ## Example
    /// ```rust
    /// use geo_core::{CurrencyFormat, Money};
    ///
    /// let amount = Money::from_major_minor(1234, 50);
    /// assert_eq!(CurrencyFormat::taka_symbol().format(amount), "৳1234.50");
    /// assert_eq!(CurrencyFormat::bdt_code().format(amount), "BDT 1,234.50");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let decimals = self.decimals.min(2);
        let minor = amount.minor().unsigned_abs();

        // Round half away from zero to the shown precision.
        let step = 10u64.pow(u32::from(2 - decimals));
        let rounded = (minor + step / 2) / step * step;

        let whole = group_digits(&(rounded / 100).to_string(), self.grouping);
        let number = if decimals == 0 {
            whole
        } else {
            let fraction = format!("{:02}", rounded % 100);
            format!("{whole}.{}", &fraction[..usize::from(decimals)])
        };

        let sign = if amount.is_negative() && rounded != 0 { "-" } else { "" };
        match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{}{number}", self.symbol, self.separator),
            SymbolPosition::Suffix => format!("{sign}{number}{}{}", self.separator, self.symbol),
        }
    }
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    if grouping == Grouping::None || len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let group = match grouping {
        Grouping::Indian => 2,
        _ => 3,
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        parts.push(&head[start..end]);
        end = start;
    }
    parts.reverse();
    parts.push(tail);
    parts.join(",")
}

// =============================================================================
// Dates
// =============================================================================

const DISPLAY_DATE: &str = "%b %-d, %Y";

/// `Mar 1, 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE).to_string()
}

/// Formats a stored date string, returning it unchanged if it is not a date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn format_date_str(value: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        return format_date(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value.trim()) {
        return format_date(ts.date_naive());
    }
    value.to_string()
}
