//! # Report Commands
//!
//! The dashboard: counts, revenue, outstanding dues, method shares, top
//! products and recent invoices, all aggregated from stored records.

use geo_core::report::{summarize, DashboardSummary};
use geo_db::{Repository, Storage};
use tracing::debug;

use crate::error::ApiResult;
use crate::state::Desk;

pub async fn dashboard_summary<S: Storage>(desk: &Desk<S>) -> ApiResult<DashboardSummary> {
    let store = desk.store();
    let invoices = store.invoices().list().await?;
    let customers = store.customers().count().await?;
    let products = store.products().count().await?;

    let summary = summarize(&invoices, customers, products);
    debug!(
        invoices = summary.invoice_count,
        revenue = %summary.revenue,
        outstanding = %summary.outstanding,
        "Dashboard aggregated"
    );
    Ok(summary)
}
