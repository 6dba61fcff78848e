//! # Dashboard & Reports
//!
//! Aggregates stored invoices into the figures the dashboard and reports
//! screens show. Pure: callers pass the records in.
//!
//! ```text
//! invoices ──┬──► revenue (Paid grand totals)
//!            ├──► outstanding (Due grand totals)
//!            ├──► status counts, payment method share
//!            ├──► daily sales by invoice date
//!            ├──► top products by line revenue
//!            └──► most recent invoices
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Invoice, InvoiceStatus, PaymentMethod};

/// Invoices listed under "recent" on the dashboard.
pub const RECENT_INVOICE_LIMIT: usize = 5;

/// Products listed under "top products".
pub const TOP_PRODUCT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecentInvoice {
    pub invoice_number: String,
    pub customer: String,
    pub amount: Money,
    pub status: InvoiceStatus,
    #[ts(as = "String")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    /// Line item description the sales were recorded under.
    pub name: String,
    #[ts(type = "number")]
    pub sold: u64,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MethodShare {
    pub method: PaymentMethod,
    pub label: String,
    pub invoices: usize,
    /// Share of all invoices, whole percent rounded half up.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub amount: Money,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub invoice_count: usize,
    pub customer_count: usize,
    pub product_count: usize,
    /// Grand totals of paid invoices.
    pub revenue: Money,
    /// Grand totals of invoices still due.
    pub outstanding: Money,
    pub paid_count: usize,
    pub pending_count: usize,
    pub due_count: usize,
    pub payment_methods: Vec<MethodShare>,
    pub daily_sales: Vec<DailySales>,
    pub top_products: Vec<ProductSales>,
    pub recent_invoices: Vec<RecentInvoice>,
}

/// Builds the dashboard from stored records.
///
/// Recent invoices are ordered by invoice date, newest first, ties broken
/// by invoice number descending. Top products group line items by
/// description and rank by revenue.
pub fn summarize(invoices: &[Invoice], customer_count: usize, product_count: usize) -> DashboardSummary {
    let mut revenue = Money::zero();
    let mut outstanding = Money::zero();
    let (mut paid_count, mut pending_count, mut due_count) = (0, 0, 0);

    for invoice in invoices {
        match invoice.status {
            InvoiceStatus::Paid => {
                paid_count += 1;
                revenue += invoice.grand_total;
            }
            InvoiceStatus::Pending => pending_count += 1,
            InvoiceStatus::Due => {
                due_count += 1;
                outstanding += invoice.grand_total;
            }
        }
    }

    DashboardSummary {
        invoice_count: invoices.len(),
        customer_count,
        product_count,
        revenue,
        outstanding,
        paid_count,
        pending_count,
        due_count,
        payment_methods: method_shares(invoices),
        daily_sales: daily_sales(invoices),
        top_products: top_products(invoices, TOP_PRODUCT_LIMIT),
        recent_invoices: recent_invoices(invoices, RECENT_INVOICE_LIMIT),
    }
}

/// Invoice count per payment method, in picker order, with percentages.
pub fn method_shares(invoices: &[Invoice]) -> Vec<MethodShare> {
    let total = invoices.len();
    PaymentMethod::ALL
        .iter()
        .map(|&method| {
            let count = invoices.iter().filter(|i| i.payment_method == method).count();
            let percent = if total == 0 {
                0
            } else {
                ((count * 100 * 2 + total) / (total * 2)) as u32
            };
            MethodShare {
                method,
                label: method.label().to_string(),
                invoices: count,
                percent,
            }
        })
        .collect()
}

/// Grand totals summed per invoice date, oldest first.
pub fn daily_sales(invoices: &[Invoice]) -> Vec<DailySales> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for invoice in invoices {
        *by_day.entry(invoice.invoice_date).or_default() += invoice.grand_total;
    }
    by_day
        .into_iter()
        .map(|(date, amount)| DailySales { date, amount })
        .collect()
}

/// Best selling products by line revenue.
pub fn top_products(invoices: &[Invoice], limit: usize) -> Vec<ProductSales> {
    let mut by_name: BTreeMap<&str, (u64, Money)> = BTreeMap::new();
    for item in invoices.iter().flat_map(|i| i.items.iter()) {
        if item.description.trim().is_empty() {
            continue;
        }
        let entry = by_name.entry(item.description.as_str()).or_default();
        entry.0 += u64::from(item.quantity);
        entry.1 += item.line_total;
    }

    let mut products: Vec<ProductSales> = by_name
        .into_iter()
        .map(|(name, (sold, revenue))| ProductSales {
            name: name.to_string(),
            sold,
            revenue,
        })
        .collect();
    // Stable sort keeps name order among equal revenues.
    products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    products.truncate(limit);
    products
}

/// Newest invoices first.
pub fn recent_invoices(invoices: &[Invoice], limit: usize) -> Vec<RecentInvoice> {
    let mut sorted: Vec<&Invoice> = invoices.iter().collect();
    sorted.sort_by(|a, b| {
        b.invoice_date
            .cmp(&a.invoice_date)
            .then_with(|| b.invoice_number.cmp(&a.invoice_number))
    });

    sorted
        .into_iter()
        .take(limit)
        .map(|invoice| RecentInvoice {
            invoice_number: invoice.invoice_number.clone(),
            customer: invoice
                .customer
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            amount: invoice.grand_total,
            status: invoice.status,
            date: invoice.invoice_date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_customers;
    use crate::invoice::{due_date_for, InvoiceParts};
    use crate::types::LineItem;

    fn invoice(number: &str, day: u32, method: PaymentMethod, items: Vec<(&str, u32, i64)>) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 4, day).unwrap();
        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, (name, qty, price))| {
                LineItem::new(format!("item-{}", i + 1), "", name, qty, Money::from_major(price))
            })
            .collect();
        Invoice::new(InvoiceParts {
            invoice_number: number.to_string(),
            invoice_date: date,
            due_date: due_date_for(date, 15),
            customer: default_customers().remove(0),
            items,
            payment_method: method,
            delivery_charge: Money::zero(),
            notes: String::new(),
        })
        .unwrap()
    }

    fn sample() -> Vec<Invoice> {
        vec![
            invoice("INV-1001", 25, PaymentMethod::Cash, vec![("Slim Fit Jeans", 2, 1200)]),
            invoice("INV-1002", 26, PaymentMethod::Due, vec![("Oxford Shirt", 1, 850)]),
            invoice(
                "INV-1003",
                26,
                PaymentMethod::Bkash,
                vec![("Slim Fit Jeans", 1, 1200), ("Casual Polo", 3, 650)],
            ),
        ]
    }

    #[test]
    fn test_revenue_and_outstanding() {
        let summary = summarize(&sample(), 5, 5);
        assert_eq!(summary.invoice_count, 3);
        assert_eq!(summary.revenue, Money::from_major(2400 + 1200 + 1950));
        assert_eq!(summary.outstanding, Money::from_major(850));
        assert_eq!((summary.paid_count, summary.due_count), (2, 1));
        assert_eq!(summary.pending_count, 0);
    }

    #[test]
    fn test_method_shares() {
        let shares = method_shares(&sample());
        assert_eq!(shares.len(), 5);
        assert_eq!(shares[0].invoices, 1);
        assert_eq!(shares[0].percent, 33);
        assert_eq!(shares[4].label, "Due Payment");
        assert!(method_shares(&[]).iter().all(|s| s.percent == 0));
    }

    #[test]
    fn test_top_products_ranked_by_revenue() {
        let top = top_products(&sample(), 2);
        assert_eq!(top[0].name, "Slim Fit Jeans");
        assert_eq!(top[0].sold, 3);
        assert_eq!(top[0].revenue, Money::from_major(3600));
        assert_eq!(top[1].name, "Casual Polo");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_recent_and_daily() {
        let recent = recent_invoices(&sample(), 2);
        assert_eq!(recent[0].invoice_number, "INV-1003");
        assert_eq!(recent[1].invoice_number, "INV-1002");
        assert_eq!(recent[0].customer, "Rahman Clothing");

        let daily = daily_sales(&sample());
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[1].amount, Money::from_major(850 + 3150));
    }
}
