//! # HTML Markup
//!
//! Renders an invoice as a self-contained HTML page for preview and print.
//! Styles are inlined in a `<style>` block; the page loads nothing else.
//!
//! Every interpolated value goes through [`escape_html`].

use std::fmt::Write as _;

use geo_core::format::{format_date, CurrencyFormat};
use geo_core::{BusinessProfile, Invoice, PaymentMethodRegistry};

use crate::error::RenderResult;
use crate::layout::ensure_renderable;
use crate::{FOOTER_CONTACT, FOOTER_THANKS};

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; color: #374151; }
.header { display: flex; justify-content: space-between; margin-bottom: 30px; }
.company-info h2 { margin: 0; font-size: 24px; }
.invoice-info h1 { margin: 0; color: #2563eb; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th { background-color: #f3f4f6; padding: 12px; text-align: left; }
td { padding: 8px; border-bottom: 1px solid #e5e7eb; }
.num { text-align: right; }
.summary { float: right; width: 300px; margin-top: 20px; }
.summary td { border-bottom: none; }
.total { font-weight: bold; font-size: 18px; }
.status { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 12px; }
.status-paid { background-color: #dcfce7; color: #166534; }
.status-pending { background-color: #fef3c7; color: #92400e; }
.status-due { background-color: #fee2e2; color: #991b1b; }
.notes { clear: both; margin-top: 40px; }
.footer { clear: both; margin-top: 50px; padding-top: 20px; border-top: 1px solid #e5e7eb; text-align: center; color: #6b7280; }
";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the printable invoice page.
///
/// The output depends only on the arguments: no clock, no random ids.
pub fn render_invoice_markup(
    invoice: &Invoice,
    profile: &BusinessProfile,
    fmt: &CurrencyFormat,
) -> RenderResult<String> {
    let customer = ensure_renderable(invoice)?;
    let e = escape_html;

    let mut html = String::with_capacity(4096);

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Invoice {}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n",
        e(&invoice.invoice_number)
    );

    // Header
    html.push_str("<div class=\"header\">\n<div class=\"company-info\">\n");
    let _ = writeln!(html, "<h2>{}</h2>", e(&profile.name));
    for line in [&profile.address, &profile.phone, &profile.email] {
        let _ = writeln!(html, "<p>{}</p>", e(line));
    }
    if let Some(website) = &profile.website {
        let _ = writeln!(html, "<p>{}</p>", e(website));
    }
    if let Some(tax_id) = &profile.tax_id {
        let _ = writeln!(html, "<p>Tax ID: {}</p>", e(tax_id));
    }
    html.push_str("</div>\n<div class=\"invoice-info\">\n<h1>INVOICE</h1>\n");
    let _ = writeln!(html, "<p><strong>{}</strong></p>", e(&invoice.invoice_number));
    let _ = writeln!(html, "<p>Date: {}</p>", format_date(invoice.invoice_date));
    let _ = writeln!(html, "<p>Due Date: {}</p>", format_date(invoice.due_date));
    html.push_str("</div>\n</div>\n");

    // Bill to
    html.push_str("<div class=\"bill-to\">\n<h3>Bill To:</h3>\n");
    let _ = writeln!(html, "<p><strong>{}</strong></p>", e(&customer.name));
    for line in [&customer.address, &customer.phone, &customer.email] {
        let _ = writeln!(html, "<p>{}</p>", e(line));
    }
    html.push_str("</div>\n");

    // Items
    html.push_str(
        "<table class=\"items\">\n<thead>\n<tr><th>Item</th><th>Description</th>\
         <th class=\"num\">Qty</th><th class=\"num\">Price</th><th class=\"num\">Total</th></tr>\n\
         </thead>\n<tbody>\n",
    );
    for item in &invoice.items {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            e(&item.product_ref),
            e(&item.description),
            item.quantity,
            e(&fmt.format(item.unit_price)),
            e(&fmt.format(item.line_total)),
        );
    }
    html.push_str("</tbody>\n</table>\n");

    // Summary
    html.push_str("<div class=\"summary\">\n<table>\n");
    let _ = writeln!(
        html,
        "<tr><td>Subtotal:</td><td class=\"num\">{}</td></tr>",
        e(&fmt.format(invoice.subtotal))
    );
    let _ = writeln!(
        html,
        "<tr><td>Delivery Charge:</td><td class=\"num\">{}</td></tr>",
        e(&fmt.format(invoice.delivery_charge))
    );
    let _ = writeln!(
        html,
        "<tr class=\"total\"><td>Total:</td><td class=\"num\">{}</td></tr>",
        e(&fmt.format(invoice.grand_total))
    );
    html.push_str("</table>\n");

    let status = invoice.status.as_str();
    let method = PaymentMethodRegistry::new().label_for(invoice.payment_method.as_str());
    let _ = writeln!(
        html,
        "<p><strong>Payment Status:</strong> <span class=\"status status-{}\">{}</span></p>",
        status.to_lowercase(),
        status
    );
    let _ = writeln!(html, "<p><strong>Payment Method:</strong> {}</p>", e(&method));
    html.push_str("</div>\n");

    // Notes
    if !invoice.notes.trim().is_empty() {
        let notes = e(&invoice.notes).replace('\n', "<br>\n");
        let _ = writeln!(html, "<div class=\"notes\">\n<h3>Notes:</h3>\n<p>{notes}</p>\n</div>");
    }

    // Footer
    let _ = writeln!(
        html,
        "<div class=\"footer\">\n<p>{FOOTER_THANKS}</p>\n<p>{FOOTER_CONTACT}</p>\n</div>"
    );
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geo_core::catalog::default_customers;
    use geo_core::{InvoiceParts, LineItem, Money, PaymentMethod};

    fn invoice(method: PaymentMethod, notes: &str) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        Invoice::new(InvoiceParts {
            invoice_number: "INV-1001".to_string(),
            invoice_date: date,
            due_date: NaiveDate::from_ymd_opt(2025, 5, 16).unwrap(),
            customer: default_customers().remove(1),
            items: vec![
                LineItem::new("item-1", "2", "Slim Fit Jeans", 1, Money::from_major(1200)),
                LineItem::new("item-2", "1", "Premium Cotton T-shirt", 3, Money::from_major(450)),
            ],
            payment_method: method,
            delivery_charge: Money::from_major(100),
            notes: notes.to_string(),
        })
        .unwrap()
    }

    fn render(invoice: &Invoice) -> String {
        render_invoice_markup(invoice, &BusinessProfile::default(), &CurrencyFormat::taka_symbol()).unwrap()
    }

    #[test]
    fn test_summary_shows_totals_in_order() {
        let html = render(&invoice(PaymentMethod::Cash, ""));
        let sub = html.find("৳2550.00").unwrap();
        let delivery = html.find("৳100.00").unwrap();
        let total = html.find("৳2650.00").unwrap();
        assert!(sub < delivery && delivery < total);
        assert!(html.contains("status-paid"));
        assert!(html.contains("Cash Payment"));
    }

    #[test]
    fn test_due_invoice_shows_due_label() {
        let html = render(&invoice(PaymentMethod::Due, ""));
        assert!(html.contains("<span class=\"status status-due\">Due</span>"));
        assert!(html.contains("<strong>Payment Method:</strong> Due Payment"));
    }

    #[test]
    fn test_notes_block_only_when_present() {
        assert!(!render(&invoice(PaymentMethod::Cash, "  ")).contains("Notes:"));
        let html = render(&invoice(PaymentMethod::Cash, "Exchange within 7 days"));
        assert!(html.contains("<h3>Notes:</h3>"));
        assert!(html.contains("Exchange within 7 days"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut inv = invoice(PaymentMethod::Cash, "<script>alert(1)</script>");
        inv.items[0].description = "Jeans & \"Chinos\"".to_string();
        let html = render(&inv);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Jeans &amp; &quot;Chinos&quot;"));
    }

    #[test]
    fn test_markup_is_deterministic() {
        let inv = invoice(PaymentMethod::Bkash, "Thanks");
        assert_eq!(render(&inv), render(&inv));
    }

    #[test]
    fn test_header_and_dates() {
        let html = render(&invoice(PaymentMethod::Nagad, ""));
        assert!(html.contains("<title>Invoice INV-1001</title>"));
        assert!(html.contains("<h2>Geo Fashion</h2>"));
        assert!(html.contains("Date: May 1, 2025"));
        assert!(html.contains("Due Date: May 16, 2025"));
        assert!(html.contains("Dhaka Fashion Store"));
    }
}
