//! # Page Layout
//!
//! Places a computed invoice onto fixed-size pages as a list of draw
//! operations. Coordinates are millimetres from the top-left corner of
//! the page; the PDF writer flips them into PDF user space.
//!
//! ## Page 1
//! ```text
//! ┌───────────────────────────────────────────────┐ 0
//! │█ Company name ███████████████████ INVOICE █████│ header band (40)
//! ├───────────────────────────────────────────────┤
//! │ address                    Invoice Number: …  │ 50
//! │ phone                      Invoice Date:   …  │ 57
//! │ email                      Due Date:       …  │ 64
//! │ ┌───────────────────────────────────────────┐ │ 80
//! │ │ Bill To: name / address / phone | email   │ │
//! │ └───────────────────────────────────────────┘ │ 120
//! │ ┌Item──Description──Qty──Price────────Total─┐ │ 140 table header
//! │ │░░░░░░░░░░░░░░░░ row 0 ░░░░░░░░░░░░░░░░░░░░│ │ 152 first row
//! │ │                 row 1                     │ │
//! │ │ ...                                       │ │
//! │ └───────────────────────────────────────────┘ │ page_height - bottom_margin
//! │                                               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Pagination
//! Before each row, if the cursor is past `height - bottom_margin` a new
//! page starts and the cursor resets to `top_margin`. The row that
//! triggered the break is drawn at the top margin of the new page.
//! Even rows (zero-based) are shaded.
//!
//! ## Wrapping
//! Descriptions are wrapped to the column width but only the first line is
//! drawn in the row; rows have a fixed height. Notes are wrapped to the
//! content width and every line is drawn.

use geo_core::format::{format_date, CurrencyFormat};
use geo_core::{BusinessProfile, Customer, Invoice, PaymentMethodRegistry};
use serde::Serialize;

use crate::error::{RenderError, RenderResult};
use crate::wrap::{text_width, wrap_text};
use crate::{FOOTER_CONTACT, FOOTER_THANKS};

// =============================================================================
// Geometry
// =============================================================================

/// Page dimensions and the fixed margins of the items table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    /// Cursor position on continuation pages.
    pub top_margin: f32,
    /// Rows start on a new page once the cursor passes `height - bottom_margin`.
    pub bottom_margin: f32,
    pub row_height: f32,
}

impl PageSpec {
    /// ISO A4 portrait.
    pub const fn a4() -> Self {
        PageSpec {
            width: 210.0,
            height: 297.0,
            top_margin: 20.0,
            bottom_margin: 60.0,
            row_height: 15.0,
        }
    }

    /// Last cursor position at which a row may still start.
    pub fn row_limit(&self) -> f32 {
        self.height - self.bottom_margin
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::a4()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

pub const PRIMARY: Color = Color::rgb(37, 99, 235);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const MUTED: Color = Color::rgb(107, 114, 128);
pub const TEXT: Color = Color::rgb(55, 65, 81);
pub const PANEL: Color = Color::rgb(248, 250, 252);
pub const ROW_SHADE: Color = Color::rgb(249, 250, 251);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Filled rectangle, `y` is the top edge.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// Single line of text, `y` is the baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        weight: FontWeight,
        color: Color,
        align: Align,
    },
}

impl DrawOp {
    /// Left edge of the op after alignment.
    pub fn left(&self) -> f32 {
        match self {
            DrawOp::Rect { x, .. } => *x,
            DrawOp::Line { x1, x2, .. } => x1.min(*x2),
            DrawOp::Text {
                x,
                text,
                size,
                weight,
                align,
                ..
            } => {
                let w = text_width(text, *size, *weight);
                match align {
                    Align::Left => *x,
                    Align::Center => *x - w / 2.0,
                    Align::Right => *x - w,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Where a line item row landed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowPlacement {
    pub item_index: usize,
    /// Zero-based page index.
    pub page: usize,
    /// Top edge of the row.
    pub y: f32,
    pub shaded: bool,
}

/// The laid-out document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub title: String,
    pub spec: PageSpec,
    pub pages: Vec<Page>,
    pub rows: Vec<RowPlacement>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs, in drawing order, with their page index.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> {
        self.pages.iter().enumerate().flat_map(|(index, page)| {
            page.ops.iter().filter_map(move |op| match op {
                DrawOp::Text { text, .. } => Some((index, text.as_str())),
                _ => None,
            })
        })
    }
}

// =============================================================================
// Table Columns
// =============================================================================

const CONTENT_LEFT: f32 = 20.0;
const CELL_PAD: f32 = 5.0;
const COL_ITEM: f32 = 25.0;
const COL_DESCRIPTION: f32 = 70.0;
const COL_QTY_CENTER: f32 = 112.0;
const COL_PRICE_RIGHT: f32 = 150.0;
const HEADER_BAND: f32 = 40.0;
const TABLE_TOP: f32 = 140.0;
const TABLE_HEADER_HEIGHT: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const NOTE_LINE_HEIGHT: f32 = 5.0;
const SUMMARY_WIDTH: f32 = 60.0;
const SUMMARY_HEIGHT: f32 = 50.0;
const FOOTER_ZONE: f32 = 30.0;

/// Usable width of the description column.
pub const DESCRIPTION_WIDTH: f32 = COL_QTY_CENTER - COL_DESCRIPTION - 10.0;

const ITEM_WIDTH: f32 = COL_DESCRIPTION - COL_ITEM - CELL_PAD;

// =============================================================================
// Builder
// =============================================================================

struct Builder {
    spec: PageSpec,
    pages: Vec<Page>,
}

impl Builder {
    fn new(spec: PageSpec) -> Self {
        Builder {
            spec,
            pages: vec![Page::default()],
        }
    }

    fn new_page(&mut self) -> f32 {
        self.pages.push(Page::default());
        self.spec.top_margin
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        size: f32,
        weight: FontWeight,
        color: Color,
        align: Align,
    ) {
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size,
            weight,
            color,
            align,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        });
    }
}

/// Rejects invoices that cannot produce a meaningful document and returns
/// the customer to bill.
pub(crate) fn ensure_renderable(invoice: &Invoice) -> RenderResult<&Customer> {
    if invoice.items.is_empty() {
        return Err(RenderError::EmptyItems {
            invoice_number: invoice.invoice_number.clone(),
        });
    }
    match &invoice.customer {
        Some(c) if !c.name.trim().is_empty() => Ok(c),
        _ => Err(RenderError::MissingCustomer {
            invoice_number: invoice.invoice_number.clone(),
        }),
    }
}

/// Lays out `invoice` onto pages of `spec`.
///
/// Amounts are formatted with `fmt` as given; callers drawing with the
/// built-in PDF fonts should pass `fmt.for_builtin_fonts()`.
pub fn layout_invoice(
    invoice: &Invoice,
    profile: &BusinessProfile,
    fmt: &CurrencyFormat,
    spec: &PageSpec,
) -> RenderResult<DocumentLayout> {
    let customer = ensure_renderable(invoice)?;

    let w = spec.width;
    let right = w - 20.0;
    let amount_right = w - 25.0;
    let mut b = Builder::new(*spec);

    // Header band
    b.rect(0.0, 0.0, w, HEADER_BAND, PRIMARY);
    b.text(20.0, 25.0, &profile.name, 24.0, FontWeight::Bold, WHITE, Align::Left);
    b.text(right, 25.0, "INVOICE", 18.0, FontWeight::Bold, WHITE, Align::Right);

    // Seller details
    for (y, value) in [(50.0, &profile.address), (57.0, &profile.phone), (64.0, &profile.email)] {
        b.text(20.0, y, value, BODY_SIZE, FontWeight::Regular, MUTED, Align::Left);
    }

    // Invoice meta
    let meta = [
        (50.0, "Invoice Number:", invoice.invoice_number.clone()),
        (57.0, "Invoice Date:", format_date(invoice.invoice_date)),
        (64.0, "Due Date:", format_date(invoice.due_date)),
    ];
    for (y, label, value) in meta {
        b.text(w - 80.0, y, label, 12.0, FontWeight::Bold, TEXT, Align::Left);
        b.text(right, y, value, 12.0, FontWeight::Regular, TEXT, Align::Right);
    }

    // Bill to
    b.rect(CONTENT_LEFT, 80.0, w - 40.0, 40.0, PANEL);
    b.text(COL_ITEM, 95.0, "Bill To:", 14.0, FontWeight::Bold, TEXT, Align::Left);
    b.text(COL_ITEM, 105.0, &customer.name, 12.0, FontWeight::Bold, TEXT, Align::Left);
    b.text(COL_ITEM, 112.0, &customer.address, BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);
    b.text(
        COL_ITEM,
        119.0,
        format!("{} | {}", customer.phone, customer.email),
        BODY_SIZE,
        FontWeight::Regular,
        TEXT,
        Align::Left,
    );

    // Table header
    let header_text = TABLE_TOP + 8.0;
    b.rect(CONTENT_LEFT, TABLE_TOP, w - 40.0, TABLE_HEADER_HEIGHT, PRIMARY);
    for (x, label, align) in [
        (COL_ITEM, "Item", Align::Left),
        (COL_DESCRIPTION, "Description", Align::Left),
        (COL_QTY_CENTER, "Qty", Align::Center),
        (COL_PRICE_RIGHT, "Price", Align::Right),
        (amount_right, "Total", Align::Right),
    ] {
        b.text(x, header_text, label, BODY_SIZE, FontWeight::Bold, WHITE, align);
    }

    // Rows
    let mut rows = Vec::with_capacity(invoice.items.len());
    let mut y = TABLE_TOP + TABLE_HEADER_HEIGHT;
    for (index, item) in invoice.items.iter().enumerate() {
        if y > spec.row_limit() {
            y = b.new_page();
        }

        let shaded = index % 2 == 0;
        if shaded {
            b.rect(CONTENT_LEFT, y, w - 40.0, spec.row_height, ROW_SHADE);
        }

        let baseline = y + 10.0;
        let item_label = first_line(&item.product_ref, ITEM_WIDTH);
        let description = first_line(&item.description, DESCRIPTION_WIDTH);
        b.text(COL_ITEM, baseline, item_label, BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);
        b.text(COL_DESCRIPTION, baseline, description, BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);
        b.text(
            COL_QTY_CENTER,
            baseline,
            item.quantity.to_string(),
            BODY_SIZE,
            FontWeight::Regular,
            TEXT,
            Align::Center,
        );
        b.text(
            COL_PRICE_RIGHT,
            baseline,
            fmt.format(item.unit_price),
            BODY_SIZE,
            FontWeight::Regular,
            TEXT,
            Align::Right,
        );
        b.text(
            amount_right,
            baseline,
            fmt.format(item.line_total),
            BODY_SIZE,
            FontWeight::Regular,
            TEXT,
            Align::Right,
        );

        rows.push(RowPlacement {
            item_index: index,
            page: b.page_index(),
            y,
            shaded,
        });
        y += spec.row_height;
    }

    // Summary and payment block must share a page.
    y += 10.0;
    if y + SUMMARY_HEIGHT + 13.0 > spec.height - FOOTER_ZONE {
        y = b.new_page();
    }
    let summary_top = y;
    let label_x = w - 75.0;
    b.rect(w - 80.0, summary_top, SUMMARY_WIDTH, SUMMARY_HEIGHT, PANEL);
    b.text(label_x, summary_top + 12.0, "Subtotal:", BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);
    b.text(
        amount_right,
        summary_top + 12.0,
        fmt.format(invoice.subtotal),
        BODY_SIZE,
        FontWeight::Regular,
        TEXT,
        Align::Right,
    );
    b.text(
        label_x,
        summary_top + 22.0,
        "Delivery Charge:",
        BODY_SIZE,
        FontWeight::Regular,
        TEXT,
        Align::Left,
    );
    b.text(
        amount_right,
        summary_top + 22.0,
        fmt.format(invoice.delivery_charge),
        BODY_SIZE,
        FontWeight::Regular,
        TEXT,
        Align::Right,
    );
    b.line(label_x, summary_top + 28.0, amount_right, summary_top + 28.0, 0.5, MUTED);
    b.text(label_x, summary_top + 38.0, "Total:", 12.0, FontWeight::Bold, TEXT, Align::Left);
    b.text(
        amount_right,
        summary_top + 38.0,
        fmt.format(invoice.grand_total),
        12.0,
        FontWeight::Bold,
        TEXT,
        Align::Right,
    );

    // Payment
    let mut y = summary_top + 55.0;
    let method_label = PaymentMethodRegistry::new().label_for(invoice.payment_method.as_str());
    b.text(COL_ITEM, y, "Payment Status:", BODY_SIZE, FontWeight::Bold, TEXT, Align::Left);
    b.text(COL_ITEM, y + 8.0, "Payment Method:", BODY_SIZE, FontWeight::Bold, TEXT, Align::Left);
    b.text(
        COL_DESCRIPTION,
        y,
        invoice.status.as_str(),
        BODY_SIZE,
        FontWeight::Regular,
        TEXT,
        Align::Left,
    );
    b.text(COL_DESCRIPTION, y + 8.0, method_label, BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);

    // Notes
    if !invoice.notes.trim().is_empty() {
        y += 25.0;
        if y > spec.height - FOOTER_ZONE {
            y = b.new_page();
        }
        b.text(COL_ITEM, y, "Notes:", BODY_SIZE, FontWeight::Bold, TEXT, Align::Left);
        y += 8.0;
        for line in wrap_text(&invoice.notes, w - 50.0, BODY_SIZE, FontWeight::Regular) {
            if y > spec.height - FOOTER_ZONE {
                y = b.new_page();
            }
            b.text(COL_ITEM, y, line, BODY_SIZE, FontWeight::Regular, TEXT, Align::Left);
            y += NOTE_LINE_HEIGHT;
        }
    }

    // Footer
    let h = spec.height;
    b.text(w / 2.0, h - 20.0, FOOTER_THANKS, 8.0, FontWeight::Regular, MUTED, Align::Center);
    b.text(w / 2.0, h - 15.0, FOOTER_CONTACT, 8.0, FontWeight::Regular, MUTED, Align::Center);

    Ok(DocumentLayout {
        title: format!("Invoice {}", invoice.invoice_number),
        spec: *spec,
        pages: b.pages,
        rows,
    })
}

/// First wrapped line of a cell value.
fn first_line(text: &str, width: f32) -> String {
    wrap_text(text, width, BODY_SIZE, FontWeight::Regular)
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geo_core::catalog::default_customers;
    use geo_core::{InvoiceParts, LineItem, Money, PaymentMethod};

    fn invoice(count: usize) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let items = (1..=count)
            .map(|n| LineItem::new(format!("item-{n}"), "1", "Premium Cotton T-shirt", 1, Money::from_major(450)))
            .collect();
        Invoice::new(InvoiceParts {
            invoice_number: "INV-1001".to_string(),
            invoice_date: date,
            due_date: date,
            customer: default_customers().remove(0),
            items,
            payment_method: PaymentMethod::Due,
            delivery_charge: Money::zero(),
            notes: String::new(),
        })
        .unwrap()
    }

    fn layout(invoice: &Invoice) -> DocumentLayout {
        layout_invoice(
            invoice,
            &BusinessProfile::default(),
            &CurrencyFormat::bdt_code(),
            &PageSpec::a4(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_page_capacity() {
        // Rows start at 152 and may start up to 237: six fit on page one.
        let doc = layout(&invoice(6));
        assert!(doc.rows.iter().all(|r| r.page == 0));
        assert_eq!(doc.rows[0].y, 152.0);
        assert_eq!(doc.rows[5].y, 227.0);
    }

    #[test]
    fn test_overflow_row_starts_next_page_at_top_margin() {
        let doc = layout(&invoice(7));
        assert!(doc.page_count() > 1);
        let overflow = doc.rows[6];
        assert_eq!(overflow.page, 1);
        assert_eq!(overflow.y, PageSpec::a4().top_margin);
        assert!(doc.rows[..6].iter().all(|r| r.page == 0));
    }

    #[test]
    fn test_rows_never_start_past_limit() {
        let spec = PageSpec::a4();
        let doc = layout(&invoice(60));
        for row in &doc.rows {
            assert!(row.y <= spec.row_limit());
        }
        let pages: Vec<usize> = doc.rows.iter().map(|r| r.page).collect();
        assert!(pages.windows(2).all(|p| p[0] <= p[1]));
    }

    #[test]
    fn test_even_rows_shaded() {
        let doc = layout(&invoice(9));
        for row in &doc.rows {
            assert_eq!(row.shaded, row.item_index % 2 == 0);
        }
    }

    #[test]
    fn test_summary_order_and_labels() {
        let doc = layout(&invoice(2));
        let texts: Vec<&str> = doc.texts().map(|(_, t)| t).collect();
        let pos = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(pos("Subtotal:") < pos("Delivery Charge:"));
        assert!(pos("Delivery Charge:") < pos("Total:"));
        assert!(pos("Total:") < pos("Payment Status:"));
        assert!(pos("Payment Status:") < pos("Payment Method:"));
        assert!(texts.contains(&"Due Payment"));
        assert!(texts.contains(&"Due"));
    }

    #[test]
    fn test_long_description_draws_first_line_only() {
        let mut inv = invoice(1);
        inv.items[0].description =
            "Hand-finished organic cotton tee with contrast stitching and woven label".to_string();
        let doc = layout(&inv);

        let wrapped = wrap_text(&inv.items[0].description, DESCRIPTION_WIDTH, BODY_SIZE, FontWeight::Regular);
        assert!(wrapped.len() > 1);
        let texts: Vec<&str> = doc.texts().map(|(_, t)| t).collect();
        assert!(texts.contains(&wrapped[0].as_str()));
        for rest in &wrapped[1..] {
            assert!(!texts.contains(&rest.as_str()));
        }
    }

    #[test]
    fn test_notes_render_every_wrapped_line() {
        let mut inv = invoice(1);
        inv.notes = "Goods once sold are exchangeable within seven days with the original receipt. \
                     Delivery inside Dhaka is free for orders above three thousand taka."
            .to_string();
        let doc = layout(&inv);
        let wrapped = wrap_text(&inv.notes, 160.0, BODY_SIZE, FontWeight::Regular);
        let texts: Vec<&str> = doc.texts().map(|(_, t)| t).collect();
        assert!(texts.contains(&"Notes:"));
        for line in &wrapped {
            assert!(texts.contains(&line.as_str()));
        }
    }

    #[test]
    fn test_no_notes_block_without_notes() {
        let doc = layout(&invoice(1));
        assert!(doc.texts().all(|(_, t)| t != "Notes:"));
    }

    #[test]
    fn test_footer_on_last_page() {
        let doc = layout(&invoice(30));
        let last = doc.page_count() - 1;
        let footer: Vec<usize> = doc
            .texts()
            .filter(|(_, t)| *t == FOOTER_THANKS)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(footer, vec![last]);
    }

    #[test]
    fn test_rejects_unrenderable_invoices() {
        let mut inv = invoice(1);
        inv.items.clear();
        assert!(matches!(
            layout_invoice(&inv, &BusinessProfile::default(), &CurrencyFormat::default(), &PageSpec::a4()),
            Err(RenderError::EmptyItems { .. })
        ));

        let mut inv = invoice(1);
        inv.customer = None;
        assert!(matches!(
            layout_invoice(&inv, &BusinessProfile::default(), &CurrencyFormat::default(), &PageSpec::a4()),
            Err(RenderError::MissingCustomer { .. })
        ));

        let mut inv = invoice(1);
        if let Some(customer) = inv.customer.as_mut() {
            customer.name = "   ".to_string();
        }
        assert!(matches!(ensure_renderable(&inv), Err(RenderError::MissingCustomer { .. })));
    }

    #[test]
    fn test_renderable_invoice_yields_its_customer() {
        let inv = invoice(1);
        let customer = ensure_renderable(&inv).unwrap();
        assert_eq!(Some(customer), inv.customer.as_ref());
    }
}
