//! SQLite record store: round trips, key rules and persistence across reopen.

use chrono::{NaiveDate, TimeZone, Utc};
use geo_core::catalog::{default_customers, default_products};
use geo_core::{Invoice, InvoiceParts, InvoiceStatus, LineItem, Money, Payment, PaymentMethod, Product};
use geo_db::{seed_defaults, snapshot, Database, DbConfig, DbError, Repository};
use tempfile::TempDir;

async fn open(dir: &TempDir) -> Database {
    Database::new(DbConfig::new(dir.path().join("geo-invoice.db")))
        .await
        .unwrap()
}

fn invoice(number: &str, method: PaymentMethod) -> Invoice {
    let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    Invoice::new(InvoiceParts {
        invoice_number: number.to_string(),
        invoice_date: date,
        due_date: NaiveDate::from_ymd_opt(2025, 5, 16).unwrap(),
        customer: default_customers().remove(0),
        items: vec![
            LineItem::new("item-1", "2", "Slim Fit Jeans", 1, Money::from_major(1200)),
            LineItem::new("item-2", "1", "Premium Cotton T-shirt", 3, Money::from_major(450)),
        ],
        payment_method: method,
        delivery_charge: Money::from_major(100),
        notes: "Exchange within 7 days".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_invoice_round_trip_keeps_every_field() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let stored = invoice("INV-1001", PaymentMethod::Due);

    db.invoices().insert(&stored).await.unwrap();
    let loaded = db.invoices().get("INV-1001").await.unwrap().unwrap();

    assert_eq!(loaded, stored);
    assert_eq!(loaded.grand_total, Money::from_major(2650));
    assert_eq!(loaded.status, InvoiceStatus::Due);
    loaded.check_invariants().unwrap();
}

#[tokio::test]
async fn test_duplicate_invoice_number_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    db.invoices().insert(&invoice("INV-1001", PaymentMethod::Cash)).await.unwrap();

    let err = db
        .invoices()
        .insert(&invoice("INV-1001", PaymentMethod::Bank))
        .await
        .unwrap_err();

    match err {
        DbError::UniqueViolation { field, value } => {
            assert_eq!(field, "invoiceNumber");
            assert_eq!(value, "INV-1001");
        }
        other => panic!("expected UniqueViolation, got {other:?}"),
    }
    assert_eq!(db.invoices().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_and_delete() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let repo = db.invoices();

    let missing = repo.update(&invoice("INV-2000", PaymentMethod::Cash)).await.unwrap_err();
    assert!(matches!(missing, DbError::NotFound { .. }));

    repo.insert(&invoice("INV-1001", PaymentMethod::Due)).await.unwrap();
    repo.update(&invoice("INV-1001", PaymentMethod::Nagad)).await.unwrap();
    let loaded = repo.get("INV-1001").await.unwrap().unwrap();
    assert_eq!(loaded.status, InvoiceStatus::Paid);

    assert!(repo.delete("INV-1001").await.unwrap());
    assert!(!repo.delete("INV-1001").await.unwrap());
    assert!(repo.get("INV-1001").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_follows_insertion_order() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;
    let repo = db.invoices();

    for number in ["INV-1003", "INV-1001", "INV-1002"] {
        repo.insert(&invoice(number, PaymentMethod::Cash)).await.unwrap();
    }
    repo.upsert(&invoice("INV-1001", PaymentMethod::Due)).await.unwrap();

    let numbers: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.invoice_number)
        .collect();
    assert_eq!(numbers, vec!["INV-1003", "INV-1001", "INV-1002"]);
}

#[tokio::test]
async fn test_collections_are_separate() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;

    // Customer "1" and product "1" share a key but not a collection.
    db.customers().insert(&default_customers().remove(0)).await.unwrap();
    db.products().insert(&default_products().remove(0)).await.unwrap();

    assert_eq!(db.customers().count().await.unwrap(), 1);
    assert_eq!(db.products().count().await.unwrap(), 1);
    assert_eq!(db.invoices().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let db = open(&dir).await;
        seed_defaults(&db).await.unwrap();
        let payment = Payment::record(
            "bkash",
            Money::from_major(500),
            "Advance for INV-1001",
            Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap(),
        )
        .unwrap();
        db.payments().insert(&payment).await.unwrap();
        db.close().await;
    }

    let db = open(&dir).await;
    let products = snapshot::<Product, _>(&db.products()).await.unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products["2"].name, "Slim Fit Jeans");

    let payments = db.payments().list().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].method, PaymentMethod::Bkash);

    // Already seeded: nothing more is written.
    let report = seed_defaults(&db).await.unwrap();
    assert_eq!((report.customers, report.products), (0, 0));
}
