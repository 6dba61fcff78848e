//! # SQLite Repository
//!
//! Stores each record as a JSON payload in the `records` table.
//!
//! ## Row Layout
//! ```text
//! ┌────────────┬────────────┬──────────────────────────┬────────────┬────────────┐
//! │ collection │ record_key │ payload (JSON)           │ created_at │ updated_at │
//! ├────────────┼────────────┼──────────────────────────┼────────────┼────────────┤
//! │ invoices   │ INV-1001   │ {"invoiceNumber":...}    │ RFC 3339   │ RFC 3339   │
//! │ products   │ 1          │ {"id":"1","sku":...}     │ RFC 3339   │ RFC 3339   │
//! └────────────┴────────────┴──────────────────────────┴────────────┴────────────┘
//!                PRIMARY KEY (collection, record_key)
//! ```
//!
//! Queries are built at runtime with `sqlx::query`, so building the crate
//! needs no live database.

use std::marker::PhantomData;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::{Record, Repository};
use crate::error::{DbError, DbResult};

/// Repository over one collection of the `records` table.
///
/// ## Usage
/// ```rust,ignore
/// let invoices = db.invoices();
/// invoices.insert(&invoice).await?;
/// let stored = invoices.get("INV-1001").await?;
/// ```
#[derive(Debug)]
pub struct SqliteRepository<T> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for SqliteRepository<T> {
    fn clone(&self) -> Self {
        SqliteRepository {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> SqliteRepository<T> {
    /// Creates a repository over `T::COLLECTION`.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteRepository {
            pool,
            _record: PhantomData,
        }
    }

    fn decode(payload: &str) -> DbResult<T> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl<T: Record> Repository<T> for SqliteRepository<T> {
    async fn get(&self, key: &str) -> DbResult<Option<T>> {
        let payload: Option<String> = sqlx::query_scalar(
            "SELECT payload FROM records WHERE collection = ?1 AND record_key = ?2",
        )
        .bind(T::COLLECTION)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        payload.as_deref().map(Self::decode).transpose()
    }

    async fn list(&self) -> DbResult<Vec<T>> {
        let payloads: Vec<String> = sqlx::query_scalar(
            "SELECT payload FROM records WHERE collection = ?1 ORDER BY rowid",
        )
        .bind(T::COLLECTION)
        .fetch_all(&self.pool)
        .await?;

        debug!(collection = T::COLLECTION, count = payloads.len(), "Records listed");
        payloads.iter().map(|p| Self::decode(p)).collect()
    }

    async fn insert(&self, record: &T) -> DbResult<()> {
        let payload = serde_json::to_string(record)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO records (collection, record_key, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(T::COLLECTION)
        .bind(record.key())
        .bind(&payload)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate(T::KEY_FIELD, record.key()),
            other => other,
        })?;

        debug!(collection = T::COLLECTION, key = %record.key(), "Record inserted");
        Ok(())
    }

    async fn update(&self, record: &T) -> DbResult<()> {
        let payload = serde_json::to_string(record)?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE records SET payload = ?3, updated_at = ?4
            WHERE collection = ?1 AND record_key = ?2
            "#,
        )
        .bind(T::COLLECTION)
        .bind(record.key())
        .bind(&payload)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(T::ENTITY, record.key()));
        }

        debug!(collection = T::COLLECTION, key = %record.key(), "Record updated");
        Ok(())
    }

    async fn upsert(&self, record: &T) -> DbResult<()> {
        let payload = serde_json::to_string(record)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO records (collection, record_key, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT (collection, record_key)
            DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at
            "#,
        )
        .bind(T::COLLECTION)
        .bind(record.key())
        .bind(&payload)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE collection = ?1 AND record_key = ?2")
            .bind(T::COLLECTION)
            .bind(key)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(collection = T::COLLECTION, key = %key, removed, "Record deleted");
        Ok(removed)
    }

    async fn count(&self) -> DbResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records WHERE collection = ?1")
            .bind(T::COLLECTION)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as usize)
    }
}
