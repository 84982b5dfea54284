//! # Catalog State
//!
//! Local read-only copy of the authority's product list.

use std::sync::{Arc, Mutex, PoisonError};

use till_core::{Product, ProductId};

/// Thread-safe product catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Arc<Mutex<Vec<Product>>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_products<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<Product>) -> R,
    {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut products)
    }

    /// Replaces the whole catalog with a fresh fetch.
    pub fn replace(&self, products: Vec<Product>) {
        self.with_products(|p| *p = products);
    }

    /// Inserts the product, or replaces the entry with the same id.
    pub fn upsert(&self, product: Product) {
        self.with_products(|products| {
            match products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => products.push(product),
            }
        });
    }

    /// Removes a product; returns it if it was present.
    pub fn remove(&self, id: ProductId) -> Option<Product> {
        self.with_products(|products| {
            let index = products.iter().position(|p| p.id == id)?;
            Some(products.remove(index))
        })
    }

    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.with_products(|products| products.iter().find(|p| p.id == id).cloned())
    }

    /// Case-insensitive substring match on the name. An empty term matches all.
    pub fn search(&self, term: &str) -> Vec<Product> {
        let needle = term.trim().to_lowercase();
        self.with_products(|products| {
            products
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        })
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.with_products(|products| products.clone())
    }

    pub fn len(&self) -> usize {
        self.with_products(|products| products.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
