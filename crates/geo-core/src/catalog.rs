//! # Catalog Lookups
//!
//! Read-only lookups the invoice form needs: customers by id and products
//! by id. The computation code only sees these traits; storage decides
//! where the records come from (a repository snapshot, a seeded list, a
//! test map).
//!
//! ```text
//! InvoiceDraft::select_product("2") ──► ProductCatalog::product("2")
//! InvoiceDraft::finalize(...)       ──► CustomerDirectory::customer(id)
//! ```

use std::collections::HashMap;

use crate::types::{Customer, Product};

/// Lookup of customers by id.
pub trait CustomerDirectory {
    fn customer(&self, id: &str) -> Option<Customer>;
}

/// Lookup of products by id.
pub trait ProductCatalog {
    fn product(&self, id: &str) -> Option<Product>;
}

impl CustomerDirectory for [Customer] {
    fn customer(&self, id: &str) -> Option<Customer> {
        self.iter().find(|c| c.id == id).cloned()
    }
}

impl CustomerDirectory for Vec<Customer> {
    fn customer(&self, id: &str) -> Option<Customer> {
        self.as_slice().customer(id)
    }
}

impl CustomerDirectory for HashMap<String, Customer> {
    fn customer(&self, id: &str) -> Option<Customer> {
        self.get(id).cloned()
    }
}

impl ProductCatalog for [Product] {
    fn product(&self, id: &str) -> Option<Product> {
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl ProductCatalog for Vec<Product> {
    fn product(&self, id: &str) -> Option<Product> {
        self.as_slice().product(id)
    }
}

impl ProductCatalog for HashMap<String, Product> {
    fn product(&self, id: &str) -> Option<Product> {
        self.get(id).cloned()
    }
}

impl<T: CustomerDirectory + ?Sized> CustomerDirectory for &T {
    fn customer(&self, id: &str) -> Option<Customer> {
        (**self).customer(id)
    }
}

impl<T: ProductCatalog + ?Sized> ProductCatalog for &T {
    fn product(&self, id: &str) -> Option<Product> {
        (**self).product(id)
    }
}

// =============================================================================
// Default Catalog
// =============================================================================

fn product(id: &str, name: &str, sku: &str, category: &str, price: i64, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        price: crate::Money::from_major(price),
        stock,
    }
}

fn customer(id: &str, name: &str, email: &str, address: &str, phone: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
    }
}

/// The product list a fresh install starts with.
pub fn default_products() -> Vec<Product> {
    vec![
        product("1", "Premium Cotton T-shirt", "GF-TS-001", "T-Shirts", 450, 48),
        product("2", "Slim Fit Jeans", "GF-JN-001", "Pants", 1200, 32),
        product("3", "Oxford Shirt", "GF-SH-001", "Shirts", 850, 25),
        product("4", "Casual Polo", "GF-PL-001", "T-Shirts", 650, 40),
        product("5", "Fashionable Hoodie", "GF-HD-001", "Outerwear", 1500, 18),
    ]
}

/// The customer list a fresh install starts with.
pub fn default_customers() -> Vec<Customer> {
    vec![
        customer("1", "Rahman Clothing", "info@rahmanclothing.com", "45 Fashion Avenue, Dhaka", "+880 1712 345678"),
        customer("2", "Dhaka Fashion Store", "contact@dhakafashion.com", "78 Style Street, Dhaka", "+880 1812 567890"),
        customer("3", "Style Emporium", "hello@styleemporium.com", "12 Trend Lane, Chittagong", "+880 1912 123456"),
        customer("4", "Modern Apparels", "info@modernapparels.com", "23 Design Road, Khulna", "+880 1512 987654"),
        customer("5", "Fashion World", "contact@fashionworld.com", "56 Garments Street, Dhaka", "+880 1612 456789"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_lookup() {
        let products = default_products();
        assert_eq!(products.product("2").unwrap().name, "Slim Fit Jeans");
        assert!(products.product("99").is_none());
    }

    #[test]
    fn test_map_lookup() {
        let map: HashMap<String, Customer> = default_customers()
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        assert_eq!(map.customer("1").unwrap().name, "Rahman Clothing");
        assert!(map.customer("").is_none());
    }

    #[test]
    fn test_default_catalog_skus_are_unique() {
        let products = default_products();
        let mut skus: Vec<_> = products.iter().map(|p| p.sku.as_str()).collect();
        skus.sort();
        skus.dedup();
        assert_eq!(skus.len(), products.len());
    }
}
