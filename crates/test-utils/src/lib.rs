//! Storefront test utilities.
//!
//! Fixture builders for catalog entities and helpers for loading them into
//! an in-memory store.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use storefront::catalog::MemoryCatalogStore;
use storefront::models::{Brand, Category, Product};
use storefront::seed::SeedCatalog;

/// Create a test product with default values.
///
/// Defaults: price 10000, in stock, active, not featured, created now.
pub fn test_product(name: &str, category: &Category, brand: &Brand) -> TestProduct {
    let mut product = Product::new(name, slugify(name), 10000, category, brand);
    product.quantity = 10;
    TestProduct { product }
}

/// A product builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestProduct {
    product: Product,
}

impl TestProduct {
    /// Set a custom ID.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.product.id = id;
        self
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.product.slug = slug.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.product.description = description.to_string();
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.product.price = price;
        self
    }

    /// Set the struck-through original price.
    pub fn compare_at(mut self, price: i64) -> Self {
        self.product.compare_at_price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.product.quantity = quantity;
        self
    }

    /// Set as featured.
    pub fn featured(mut self) -> Self {
        self.product.is_featured = true;
        self
    }

    /// Set as inactive (soft-deleted).
    pub fn inactive(mut self) -> Self {
        self.product.is_active = false;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.product.created_at = at;
        self
    }

    /// Created `minutes` before now.
    pub fn aged(self, minutes: i64) -> Self {
        self.created_at(Utc::now() - Duration::minutes(minutes))
    }

    pub fn spec(mut self, key: &str, value: &str) -> Self {
        self.product.specifications.insert(key, value);
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Lowercase a name and join its alphanumeric runs with hyphens.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// An in-memory store loaded with the reference catalog.
pub fn seeded_store() -> Result<(Arc<MemoryCatalogStore>, SeedCatalog)> {
    let store = Arc::new(MemoryCatalogStore::new());
    let catalog = SeedCatalog::build()?;
    catalog.load_into_memory(&store)?;
    Ok((store, catalog))
}

/// Insert a category, brand and products into `store`.
pub fn load(
    store: &MemoryCatalogStore,
    categories: &[&Category],
    brands: &[&Brand],
    products: impl IntoIterator<Item = Product>,
) -> Result<()> {
    for category in categories {
        store.insert_category((*category).clone())?;
    }
    for brand in brands {
        store.insert_brand((*brand).clone())?;
    }
    for product in products {
        store.insert_product(product)?;
    }
    Ok(())
}
