//! # Config Commands
//!
//! Read-only views of the desk settings for the UI shell.

use geo_core::{BusinessProfile, CurrencyFormat, Money};
use geo_db::Storage;
use serde::Serialize;

use crate::state::Desk;

/// Settings the UI needs to render forms and amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSettings {
    pub business: BusinessProfile,
    pub currency: CurrencyFormat,
    pub invoice_prefix: String,
    pub default_due_days: u32,
    pub default_notes: String,
}

pub fn get_settings<S: Storage>(desk: &Desk<S>) -> DeskSettings {
    let config = desk.config();
    DeskSettings {
        business: config.business.clone(),
        currency: config.currency.clone(),
        invoice_prefix: config.invoice.prefix.clone(),
        default_due_days: config.invoice.default_due_days,
        default_notes: config.invoice.default_notes.clone(),
    }
}

/// Formats an amount with the configured currency.
pub fn format_amount<S: Storage>(desk: &Desk<S>, amount: Money) -> String {
    desk.config().currency.format(amount)
}
