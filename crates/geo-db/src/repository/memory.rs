//! # In-Memory Repository
//!
//! A `Repository` backed by a vector behind a `tokio::sync::RwLock`.
//! Clones share the same data, like clones of a pool.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::{Record, Repository};
use crate::error::{DbError, DbResult};

/// In-memory repository for tests and throwaway sessions.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T: Record> {
    data: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        InMemoryRepository {
            data: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a repository holding `records`, later keys replacing earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut data: Vec<T> = Vec::new();
        for record in records {
            match data.iter_mut().find(|r| r.key() == record.key()) {
                Some(slot) => *slot = record,
                None => data.push(record),
            }
        }
        InMemoryRepository {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Removes every record.
    pub async fn clear(&self) {
        self.data.write().await.clear();
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, key: &str) -> DbResult<Option<T>> {
        let data = self.data.read().await;
        Ok(data.iter().find(|r| r.key() == key).cloned())
    }

    async fn list(&self) -> DbResult<Vec<T>> {
        Ok(self.data.read().await.clone())
    }

    async fn insert(&self, record: &T) -> DbResult<()> {
        let mut data = self.data.write().await;
        if data.iter().any(|r| r.key() == record.key()) {
            return Err(DbError::duplicate(T::KEY_FIELD, record.key()));
        }
        data.push(record.clone());
        debug!(collection = T::COLLECTION, key = %record.key(), "Record inserted");
        Ok(())
    }

    async fn update(&self, record: &T) -> DbResult<()> {
        let mut data = self.data.write().await;
        let slot = data
            .iter_mut()
            .find(|r| r.key() == record.key())
            .ok_or_else(|| DbError::not_found(T::ENTITY, record.key()))?;
        *slot = record.clone();
        debug!(collection = T::COLLECTION, key = %record.key(), "Record updated");
        Ok(())
    }

    async fn upsert(&self, record: &T) -> DbResult<()> {
        let mut data = self.data.write().await;
        match data.iter_mut().find(|r| r.key() == record.key()) {
            Some(slot) => *slot = record.clone(),
            None => data.push(record.clone()),
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> DbResult<bool> {
        let mut data = self.data.write().await;
        let before = data.len();
        data.retain(|r| r.key() != key);
        let removed = data.len() != before;
        debug!(collection = T::COLLECTION, key = %key, removed, "Record deleted");
        Ok(removed)
    }

    async fn count(&self) -> DbResult<usize> {
        Ok(self.data.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::snapshot;
    use geo_core::catalog::{default_customers, default_products};
    use geo_core::{Customer, Product, ProductCatalog};

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryRepository::<Customer>::new();
        let customer = default_customers().remove(0);

        repo.insert(&customer).await.unwrap();

        assert_eq!(repo.get("1").await.unwrap(), Some(customer));
        assert_eq!(repo.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_duplicate_key_fails() {
        let repo = InMemoryRepository::<Customer>::new();
        let customer = default_customers().remove(0);
        repo.insert(&customer).await.unwrap();

        let err = repo.insert(&customer).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "1"));
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let repo = InMemoryRepository::<Product>::new();
        let product = default_products().remove(0);

        let err = repo.update(&product).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_upsert_keeps_position() {
        let repo = InMemoryRepository::with_records(default_products());
        let mut second = repo.get("2").await.unwrap().unwrap();
        second.stock = 7;

        repo.upsert(&second).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(repo.get("2").await.unwrap().unwrap().stock, 7);
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let repo = InMemoryRepository::with_records(default_products());

        assert!(repo.delete("3").await.unwrap());
        assert!(!repo.delete("3").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let repo = InMemoryRepository::<Customer>::new();
        let clone = repo.clone();
        clone.insert(&default_customers().remove(0)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        repo.clear().await;
        assert_eq!(clone.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_is_a_catalog() {
        let repo = InMemoryRepository::with_records(default_products());
        let catalog = snapshot::<Product, _>(&repo).await.unwrap();

        assert_eq!(catalog.product("4").map(|p| p.sku), Some("GF-PL-001".to_string()));
        assert!(catalog.product("99").is_none());
    }
}
