//! # Payment Commands
//!
//! Payments are append-only: recorded once, listed, never edited.
//! `Due` payments are recorded as pending, every other method as completed.

use chrono::{DateTime, Utc};
use geo_core::{Money, Payment};
use geo_db::{Repository, Storage};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::state::Desk;

/// Payment form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Raw method value from the picker.
    pub method: String,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
}

/// Records a payment dated now.
pub async fn record_payment<S: Storage>(desk: &Desk<S>, input: PaymentInput) -> ApiResult<Payment> {
    record_payment_at(desk, input, Utc::now()).await
}

/// Records a payment with an explicit timestamp.
pub async fn record_payment_at<S: Storage>(
    desk: &Desk<S>,
    input: PaymentInput,
    date: DateTime<Utc>,
) -> ApiResult<Payment> {
    let payment = Payment::record(&input.method, input.amount, input.description.trim(), date)?;
    desk.store().payments().insert(&payment).await?;

    info!(
        payment_id = %payment.id,
        method = %payment.method,
        amount = %payment.amount,
        "Payment recorded"
    );
    Ok(payment)
}

/// All payments, newest first.
pub async fn list_payments<S: Storage>(desk: &Desk<S>) -> ApiResult<Vec<Payment>> {
    let mut payments = desk.store().payments().list().await?;
    payments.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(payments)
}
