//! Desk commands end to end: draft → create → edit → print/download,
//! catalog maintenance, payments and the dashboard.

use chrono::{NaiveDate, TimeZone, Utc};
use geo_core::{InvoiceDraft, InvoiceStatus, Money, PaymentMethod, PaymentStatus};
use geo_desk::commands::customer::{self, CustomerInput};
use geo_desk::commands::payment::{self, PaymentInput};
use geo_desk::commands::product::{self, ProductInput};
use geo_desk::commands::{config as settings, invoice, report};
use geo_desk::{open_desk, open_memory_desk, Desk, DeskConfig, ErrorCode};
use geo_db::{MemoryStore, Repository, Storage};
use tempfile::TempDir;

fn config(dir: &TempDir) -> DeskConfig {
    let mut config = DeskConfig::default();
    config.export.directory = Some(dir.path().join("exports"));
    config.storage.database_path = Some(dir.path().join("geo-invoice.db"));
    config
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
}

/// Customer 1; one Slim Fit Jeans and three T-shirts; 100 delivery.
async fn filled_draft(desk: &Desk<MemoryStore>, method: &str) -> InvoiceDraft {
    let products = product::list_products(desk).await.unwrap();
    let mut draft = invoice::new_invoice_draft_on(desk, date()).await.unwrap().draft;

    let jeans = draft.add_item();
    draft.select_product(&jeans, "2", &products).unwrap();
    let shirts = draft.add_item();
    draft.select_product(&shirts, "1", &products).unwrap();
    draft.update_quantity(&shirts, 3).unwrap();

    draft.customer_id = "1".to_string();
    draft.payment_method = method.to_string();
    draft.delivery_charge = Money::from_major(100);
    draft
}

// =============================================================================
// Invoices
// =============================================================================

#[tokio::test]
async fn test_create_invoice_computes_and_numbers() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();

    let form = invoice::new_invoice_draft_on(&desk, date()).await.unwrap();
    assert_eq!(form.suggested_number, "INV-1001");
    assert_eq!(form.draft.due_date, NaiveDate::from_ymd_opt(2025, 5, 16).unwrap());

    let draft = filled_draft(&desk, "cash").await;
    assert_eq!(invoice::draft_totals(&draft).grand_total, Money::from_major(2650));

    let created = invoice::create_invoice(&desk, draft).await.unwrap();
    assert_eq!(created.invoice_number, "INV-1001");
    assert_eq!(created.subtotal, Money::from_major(2550));
    assert_eq!(created.grand_total, Money::from_major(2650));
    assert_eq!(created.status, InvoiceStatus::Paid);
    assert_eq!(created.customer.as_ref().unwrap().name, "Rahman Clothing");

    let second = invoice::create_invoice(&desk, filled_draft(&desk, "due").await)
        .await
        .unwrap();
    assert_eq!(second.invoice_number, "INV-1002");
    assert_eq!(second.status, InvoiceStatus::Due);

    let stored = invoice::get_invoice(&desk, "INV-1001").await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_failed_submit_consumes_nothing() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();

    let mut no_customer = filled_draft(&desk, "cash").await;
    no_customer.customer_id.clear();
    let err = invoice::create_invoice(&desk, no_customer).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(err.message, "Please select a customer");

    let mut no_items = filled_draft(&desk, "cash").await;
    no_items.items.clear();
    no_items.customer_id.clear();
    let err = invoice::create_invoice(&desk, no_items).await.unwrap_err();
    assert_eq!(err.message, "Please add at least one item to the invoice");

    let err = invoice::create_invoice(&desk, filled_draft(&desk, "card").await)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let mut unknown = filled_draft(&desk, "cash").await;
    unknown.customer_id = "99".to_string();
    let err = invoice::create_invoice(&desk, unknown).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let mut negative = filled_draft(&desk, "cash").await;
    negative.delivery_charge = Money::from_major(-10);
    let err = invoice::create_invoice(&desk, negative).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    assert!(invoice::list_invoices(&desk).await.unwrap().is_empty());
    let form = invoice::new_invoice_draft_on(&desk, date()).await.unwrap();
    assert_eq!(form.suggested_number, "INV-1001");
}

#[tokio::test]
async fn test_edit_keeps_number_and_rederives_status() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    let created = invoice::create_invoice(&desk, filled_draft(&desk, "bkash").await)
        .await
        .unwrap();

    let mut draft = invoice::edit_invoice(&desk, &created.invoice_number).await.unwrap();
    let extra = draft.add_item();
    assert_eq!(extra, "item-3");
    draft.update_description(&extra, "Gift wrapping").unwrap();
    draft.update_unit_price(&extra, Money::from_major(50)).unwrap();
    draft.payment_method = "due".to_string();

    let updated = invoice::update_invoice(&desk, "INV-1001", draft).await.unwrap();
    assert_eq!(updated.invoice_number, "INV-1001");
    assert_eq!(updated.items.len(), 3);
    assert_eq!(updated.subtotal, Money::from_major(2600));
    assert_eq!(updated.grand_total, Money::from_major(2700));
    assert_eq!(updated.status, InvoiceStatus::Due);
    assert_eq!(invoice::list_invoices(&desk).await.unwrap().len(), 1);

    let err = invoice::update_invoice(&desk, "INV-4040", filled_draft(&desk, "cash").await)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_delete_does_not_reuse_number() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    invoice::create_invoice(&desk, filled_draft(&desk, "cash").await)
        .await
        .unwrap();

    invoice::delete_invoice(&desk, "INV-1001").await.unwrap();
    let err = invoice::delete_invoice(&desk, "INV-1001").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let next = invoice::create_invoice(&desk, filled_draft(&desk, "cash").await)
        .await
        .unwrap();
    assert_eq!(next.invoice_number, "INV-1002");
}

#[tokio::test]
async fn test_download_and_print_write_files() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    invoice::create_invoice(&desk, filled_draft(&desk, "nagad").await)
        .await
        .unwrap();

    let pdf = invoice::download_invoice(&desk, "INV-1001").await.unwrap();
    assert_eq!(pdf, dir.path().join("exports").join("Invoice-INV-1001.pdf"));
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF"));

    let page = invoice::print_invoice(&desk, "INV-1001").await.unwrap();
    let html = std::fs::read_to_string(page).unwrap();
    assert!(html.contains("Nagad Mobile Banking"));
    assert!(html.contains("৳2650.00"));

    let preview = invoice::invoice_markup(&desk, "INV-1001").await.unwrap();
    assert_eq!(preview, html);

    let err = invoice::download_invoice(&desk, "INV-9999").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_altered_record_is_not_rendered() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    let mut invoice = invoice::create_invoice(&desk, filled_draft(&desk, "cash").await)
        .await
        .unwrap();

    invoice.grand_total = Money::from_major(1);
    desk.store().invoices().upsert(&invoice).await.unwrap();

    let err = invoice::download_invoice(&desk, "INV-1001").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
    let err = invoice::print_invoice(&desk, "INV-1001").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Internal);
    assert!(!dir.path().join("exports").join("Invoice-INV-1001.pdf").exists());

    // Saving it again through the form recomputes the totals.
    let draft = invoice::edit_invoice(&desk, "INV-1001").await.unwrap();
    let repaired = invoice::update_invoice(&desk, "INV-1001", draft).await.unwrap();
    assert_eq!(repaired.grand_total, Money::from_major(2650));
    assert!(invoice::download_invoice(&desk, "INV-1001").await.is_ok());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();

    let mut older = filled_draft(&desk, "cash").await;
    older.invoice_date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    invoice::create_invoice(&desk, filled_draft(&desk, "cash").await)
        .await
        .unwrap();
    invoice::create_invoice(&desk, older).await.unwrap();

    let numbers: Vec<String> = invoice::list_invoices(&desk)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.invoice_number)
        .collect();
    assert_eq!(numbers, vec!["INV-1001", "INV-1002"]);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_product_sku_must_be_unique() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();

    let input = |sku: &str| ProductInput {
        name: "Linen Kurta".to_string(),
        sku: sku.to_string(),
        category: "Shirts".to_string(),
        price: Money::from_major(1100),
        stock: 12,
    };

    let err = product::create_product(&desk, input("gf-ts-001")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Duplicate);

    let kurta = product::create_product(&desk, input("GF-KT-001")).await.unwrap();
    assert_eq!(product::list_products(&desk).await.unwrap().len(), 6);

    // Saving a product under its own SKU is fine; taking another one is not.
    product::update_product(&desk, &kurta.id, input("GF-KT-001")).await.unwrap();
    let err = product::update_product(&desk, &kurta.id, input("GF-JN-001"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Duplicate);

    let mut negative = input("GF-KT-002");
    negative.price = Money::from_minor(-1);
    let err = product::create_product(&desk, negative).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    product::delete_product(&desk, &kurta.id).await.unwrap();
    let err = product::get_product(&desk, &kurta.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn test_customer_edits_leave_invoices_alone() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    invoice::create_invoice(&desk, filled_draft(&desk, "cash").await)
        .await
        .unwrap();

    let bad = CustomerInput {
        name: "Rahman Clothing Ltd".to_string(),
        email: "not-an-email".to_string(),
        address: "45 Fashion Avenue, Dhaka".to_string(),
        phone: "+880 1712 345678".to_string(),
    };
    let err = customer::update_customer(&desk, "1", bad.clone()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let good = CustomerInput {
        email: "accounts@rahmanclothing.com".to_string(),
        ..bad
    };
    customer::update_customer(&desk, "1", good).await.unwrap();
    customer::delete_customer(&desk, "1").await.unwrap();

    let stored = invoice::get_invoice(&desk, "INV-1001").await.unwrap();
    let snapshot = stored.customer.unwrap();
    assert_eq!(snapshot.name, "Rahman Clothing");
    assert_eq!(snapshot.email, "info@rahmanclothing.com");

    let created = customer::create_customer(
        &desk,
        CustomerInput {
            name: "  Sylhet Styles ".to_string(),
            email: "hello@sylhetstyles.com".to_string(),
            address: "7 Zindabazar, Sylhet".to_string(),
            phone: "+880 1811 222333".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(created.name, "Sylhet Styles");
    assert_eq!(customer::get_customer(&desk, &created.id).await.unwrap(), created);
}

// =============================================================================
// Payments & Dashboard
// =============================================================================

#[tokio::test]
async fn test_payments_derive_status() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    let at = |day| Utc.with_ymd_and_hms(2025, 5, day, 9, 0, 0).unwrap();

    let paid = payment::record_payment_at(
        &desk,
        PaymentInput {
            method: "bKash".to_string(),
            amount: Money::from_major(500),
            description: "Advance".to_string(),
        },
        at(1),
    )
    .await
    .unwrap();
    assert_eq!(paid.method, PaymentMethod::Bkash);
    assert_eq!(paid.status, PaymentStatus::Completed);

    let owed = payment::record_payment_at(
        &desk,
        PaymentInput {
            method: "due".to_string(),
            amount: Money::from_major(2150),
            description: String::new(),
        },
        at(2),
    )
    .await
    .unwrap();
    assert_eq!(owed.status, PaymentStatus::Pending);

    let err = payment::record_payment(
        &desk,
        PaymentInput {
            method: "cash".to_string(),
            amount: Money::zero(),
            description: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let ids: Vec<String> = payment::list_payments(&desk)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![owed.id, paid.id]);
}

#[tokio::test]
async fn test_dashboard_splits_revenue_and_outstanding() {
    let dir = TempDir::new().unwrap();
    let desk = open_memory_desk(config(&dir)).await.unwrap();
    for method in ["cash", "bank", "due"] {
        invoice::create_invoice(&desk, filled_draft(&desk, method).await)
            .await
            .unwrap();
    }

    let summary = report::dashboard_summary(&desk).await.unwrap();
    assert_eq!(summary.invoice_count, 3);
    assert_eq!(summary.customer_count, 5);
    assert_eq!(summary.product_count, 5);
    assert_eq!(summary.revenue, Money::from_major(5300));
    assert_eq!(summary.outstanding, Money::from_major(2650));
    assert_eq!((summary.paid_count, summary.due_count), (2, 1));
    assert_eq!(summary.recent_invoices.len(), 3);
}

#[tokio::test]
async fn test_settings_view() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir);
    cfg.invoice.default_notes = "Exchange within 7 days".to_string();
    let desk = open_memory_desk(cfg).await.unwrap();

    let view = settings::get_settings(&desk);
    assert_eq!(view.business.name, "Geo Fashion");
    assert_eq!(view.invoice_prefix, "INV-");
    assert_eq!(settings::format_amount(&desk, Money::from_major(450)), "৳450.00");

    let form = invoice::new_invoice_draft_on(&desk, date()).await.unwrap();
    assert_eq!(form.draft.notes, "Exchange within 7 days");
    assert_eq!(invoice::payment_method_options(&desk).len(), 5);
}

// =============================================================================
// SQLite
// =============================================================================

#[tokio::test]
async fn test_sqlite_desk_resumes_numbering() {
    let dir = TempDir::new().unwrap();

    {
        let desk = open_desk(config(&dir)).await.unwrap();
        let products = product::list_products(&desk).await.unwrap();
        let mut draft = invoice::new_invoice_draft_on(&desk, date()).await.unwrap().draft;
        let row = draft.add_item();
        draft.select_product(&row, "5", &products).unwrap();
        draft.customer_id = "4".to_string();
        draft.payment_method = "cash".to_string();

        let created = invoice::create_invoice(&desk, draft).await.unwrap();
        assert_eq!(created.invoice_number, "INV-1001");
        assert_eq!(created.grand_total, Money::from_major(1500));
        desk.store().close().await;
    }

    let desk = open_desk(config(&dir)).await.unwrap();
    let form = invoice::new_invoice_draft_on(&desk, date()).await.unwrap();
    assert_eq!(form.suggested_number, "INV-1002");

    let stored = invoice::get_invoice(&desk, "INV-1001").await.unwrap();
    assert_eq!(stored.customer.unwrap().name, "Modern Apparels");
    assert_eq!(customer::list_customers(&desk).await.unwrap().len(), 5);
}
