//! # Product Commands
//!
//! Catalog maintenance. SKUs are unique across the catalog.
//!
//! ```text
//! create_product(input)
//!    │
//!    ├── validate fields (name, SKU format, category, price ≥ 0)
//!    ├── SKU taken by another product? ──► DUPLICATE
//!    └── insert under a new id
//! ```

use geo_core::validation::validate_product;
use geo_core::{Money, Product, ValidationError};
use geo_db::{Repository, Storage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::Desk;

/// Product form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub category: String,
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
}

impl ProductInput {
    fn into_product(self, id: String) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price,
            stock: self.stock,
        }
    }
}

pub async fn list_products<S: Storage>(desk: &Desk<S>) -> ApiResult<Vec<Product>> {
    Ok(desk.store().products().list().await?)
}

pub async fn get_product<S: Storage>(desk: &Desk<S>, id: &str) -> ApiResult<Product> {
    desk.store()
        .products()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// Case-insensitive SKU lookup.
pub async fn find_product_by_sku<S: Storage>(desk: &Desk<S>, sku: &str) -> ApiResult<Option<Product>> {
    let sku = sku.trim();
    let products = desk.store().products().list().await?;
    Ok(products.into_iter().find(|p| p.sku.eq_ignore_ascii_case(sku)))
}

async fn ensure_sku_free<S: Storage>(desk: &Desk<S>, product: &Product) -> ApiResult<()> {
    if let Some(existing) = find_product_by_sku(desk, &product.sku).await? {
        if existing.id != product.id {
            debug!(sku = %product.sku, existing_id = %existing.id, "SKU already in use");
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: product.sku.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Adds a product under a new id.
pub async fn create_product<S: Storage>(desk: &Desk<S>, input: ProductInput) -> ApiResult<Product> {
    let product = input.into_product(Uuid::new_v4().to_string());
    validate_product(&product)?;
    ensure_sku_free(desk, &product).await?;

    desk.store().products().insert(&product).await?;
    info!(product_id = %product.id, sku = %product.sku, "Product created");
    Ok(product)
}

pub async fn update_product<S: Storage>(
    desk: &Desk<S>,
    id: &str,
    input: ProductInput,
) -> ApiResult<Product> {
    let product = input.into_product(id.to_string());
    validate_product(&product)?;
    ensure_sku_free(desk, &product).await?;

    desk.store().products().update(&product).await?;
    info!(product_id = %product.id, sku = %product.sku, "Product updated");
    Ok(product)
}

pub async fn delete_product<S: Storage>(desk: &Desk<S>, id: &str) -> ApiResult<()> {
    if !desk.store().products().delete(id).await? {
        return Err(ApiError::not_found("Product", id));
    }
    info!(product_id = %id, "Product deleted");
    Ok(())
}
