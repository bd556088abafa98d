//! In-process catalog store.
//!
//! Holds the whole catalog behind a `parking_lot::RwLock` and evaluates
//! [`ProductFilter`] directly. Used for local development
//! (`CATALOG_BACKEND=memory`) and by the test suite.

use std::collections::HashMap;

use anyhow::{Result, bail};
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::facets::{Facet, FacetDimension, tally};
use super::filter::ProductFilter;
use super::pagination::PageRequest;
use super::sort::SortKey;
use super::store::CatalogStore;
use crate::models::{Brand, Category, Product, ProductView};

#[derive(Default)]
struct CatalogData {
    categories: HashMap<Uuid, Category>,
    brands: HashMap<Uuid, Brand>,
    products: Vec<Product>,
}

impl CatalogData {
    /// Join every product with its category and brand, keeping those that match.
    fn matching(&self, filter: &ProductFilter) -> Vec<ProductView> {
        self.products
            .iter()
            .filter_map(|product| {
                let category = self.categories.get(&product.category_id)?;
                let brand = self.brands.get(&product.brand_id)?;
                Some(ProductView::new(
                    product.clone(),
                    category.into(),
                    brand.into(),
                ))
            })
            .filter(|view| filter.matches(view))
            .collect()
    }
}

/// Catalog store backed by process memory.
#[derive(Default)]
pub struct MemoryCatalogStore {
    data: RwLock<CatalogData>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category. Slugs must be unique.
    pub fn insert_category(&self, category: Category) -> Result<()> {
        let mut data = self.data.write();
        if data.categories.values().any(|c| c.slug == category.slug) {
            bail!("category slug '{}' already exists", category.slug);
        }
        data.categories.insert(category.id, category);
        Ok(())
    }

    /// Add a brand. Slugs must be unique.
    pub fn insert_brand(&self, brand: Brand) -> Result<()> {
        let mut data = self.data.write();
        if data.brands.values().any(|b| b.slug == brand.slug) {
            bail!("brand slug '{}' already exists", brand.slug);
        }
        data.brands.insert(brand.id, brand);
        Ok(())
    }

    /// Add a product. Its slug must be unique and its category and brand must exist.
    pub fn insert_product(&self, product: Product) -> Result<()> {
        let mut data = self.data.write();
        if data.products.iter().any(|p| p.slug == product.slug) {
            bail!("product slug '{}' already exists", product.slug);
        }
        if !data.categories.contains_key(&product.category_id) {
            bail!("product '{}' references an unknown category", product.slug);
        }
        if !data.brands.contains_key(&product.brand_id) {
            bail!("product '{}' references an unknown brand", product.slug);
        }
        data.products.push(product);
        Ok(())
    }

    /// Remove every entity.
    pub fn clear(&self) {
        *self.data.write() = CatalogData::default();
    }

    /// Number of stored products, active or not.
    pub fn product_count(&self) -> usize {
        self.data.read().products.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<Vec<ProductView>> {
        let mut views = self.data.read().matching(filter);
        views.sort_by(|a, b| sort.compare(a, b));

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        Ok(views
            .into_iter()
            .skip(skip)
            .take(page.limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64> {
        Ok(self.data.read().matching(filter).len() as u64)
    }

    async fn facet_counts(
        &self,
        dimension: FacetDimension,
        filter: &ProductFilter,
    ) -> Result<Vec<Facet>> {
        let views = self.data.read().matching(filter);
        Ok(tally(dimension, &views))
    }

    async fn healthy(&self) -> bool {
        true
    }
}
