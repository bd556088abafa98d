//! Catalog listing service.
//!
//! Composes the filter, sort, pagination and facet pieces over a
//! [`CatalogStore`] to answer the two catalog read operations.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::facets::{FacetDimension, FacetPolicy, FacetSet};
use super::filter::ProductFilter;
use super::pagination::{PageRequest, Pagination};
use super::params::{ListingParams, ListingQuery};
use super::sort::SortKey;
use super::store::CatalogStore;
use crate::models::ProductView;

/// Maximum number of related products returned with a product.
pub const RELATED_LIMIT: u32 = 4;

/// One page of products with pager metadata and sidebar facets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub products: Vec<ProductView>,
    pub pagination: Pagination,
    pub filters: FacetSet,
}

/// A single product and a few others from its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Service answering catalog listing and product detail reads.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    facet_policy: FacetPolicy,
    max_page_size: u32,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>, facet_policy: FacetPolicy, max_page_size: u32) -> Self {
        Self {
            store,
            facet_policy,
            max_page_size,
        }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// List one page of active products matching the raw parameters.
    ///
    /// The page, total and both facet lists are read concurrently; the first
    /// failure aborts the listing.
    pub async fn list_products(&self, params: &ListingParams) -> Result<ProductListing> {
        let query = ListingQuery::from_params(params, self.max_page_size);
        self.list(&query).await
    }

    /// List one page for an already resolved query.
    pub async fn list(&self, query: &ListingQuery) -> Result<ProductListing> {
        let category_filter = self
            .facet_policy
            .filter_for(FacetDimension::Category, &query.filter);
        let brand_filter = self
            .facet_policy
            .filter_for(FacetDimension::Brand, &query.filter);

        debug!(
            sort = query.sort.as_str(),
            page = query.page.page,
            limit = query.page.limit,
            "listing products"
        );

        let (products, total, categories, brands) = tokio::try_join!(
            self.store.fetch_page(&query.filter, query.sort, query.page),
            self.store.count(&query.filter),
            self.store
                .facet_counts(FacetDimension::Category, &category_filter),
            self.store.facet_counts(FacetDimension::Brand, &brand_filter),
        )?;

        Ok(ProductListing {
            products,
            pagination: Pagination::new(query.page, total),
            filters: FacetSet { categories, brands },
        })
    }

    /// Find an active product by slug together with its related products.
    ///
    /// Returns `None` when no active product has this slug.
    pub async fn product_by_slug(&self, slug: &str) -> Result<Option<ProductDetail>> {
        let mut found = self
            .store
            .fetch_page(
                &ProductFilter::by_slug(slug),
                SortKey::Newest,
                PageRequest::new(1, 1),
            )
            .await?;

        let Some(product) = found.pop() else {
            return Ok(None);
        };

        let related_products = self
            .store
            .fetch_page(
                &ProductFilter::related_to(product.product.category_id, product.product.id),
                SortKey::Newest,
                PageRequest::new(1, RELATED_LIMIT),
            )
            .await?;

        Ok(Some(ProductDetail {
            product,
            related_products,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalogStore;
    use crate::models::{Brand, Category, Product};
    use chrono::{Duration, Utc};

    struct Fixture {
        store: Arc<MemoryCatalogStore>,
        phones: Category,
        cases: Category,
        apple: Brand,
        samsung: Brand,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MemoryCatalogStore::new());
            let phones = Category::new("Smartphones", "smartphones");
            let cases = Category::new("Accessories", "accessories");
            let apple = Brand::new("Apple", "apple");
            let samsung = Brand::new("Samsung", "samsung");
            for c in [&phones, &cases] {
                store.insert_category(c.clone()).unwrap();
            }
            for b in [&apple, &samsung] {
                store.insert_brand(b.clone()).unwrap();
            }
            Self {
                store,
                phones,
                cases,
                apple,
                samsung,
            }
        }

        fn add(&self, slug: &str, price: i64, category: &Category, brand: &Brand, age: i64) -> Product {
            let mut product = Product::new(slug.to_uppercase(), slug, price, category, brand);
            product.created_at = Utc::now() - Duration::minutes(age);
            self.store.insert_product(product.clone()).unwrap();
            product
        }

        fn service(&self, policy: FacetPolicy) -> CatalogService {
            CatalogService::new(self.store.clone(), policy, 100)
        }
    }

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[tokio::test]
    async fn listing_combines_page_total_and_facets() {
        let f = Fixture::new();
        f.add("iphone", 100, &f.phones, &f.apple, 3);
        f.add("galaxy", 200, &f.phones, &f.samsung, 2);
        f.add("case", 10, &f.cases, &f.apple, 1);

        let listing = f
            .service(FacetPolicy::ContextNarrowed)
            .list_products(&params(&[("brand", "apple"), ("limit", "1")]))
            .await
            .unwrap();

        assert_eq!(listing.products.len(), 1);
        assert_eq!(listing.products[0].product.slug, "case");
        assert_eq!(listing.pagination.total, 2);
        assert_eq!(listing.pagination.total_pages, 2);
        assert!(listing.pagination.has_more);

        // Category facets only see Apple; brand facets ignore the brand filter.
        let categories: Vec<(&str, i64)> = listing
            .filters
            .categories
            .iter()
            .map(|f| (f.slug.as_str(), f.count))
            .collect();
        assert_eq!(categories, [("accessories", 1), ("smartphones", 1)]);

        let brands: Vec<(&str, i64)> = listing
            .filters
            .brands
            .iter()
            .map(|f| (f.slug.as_str(), f.count))
            .collect();
        assert_eq!(brands, [("apple", 2), ("samsung", 1)]);
    }

    #[tokio::test]
    async fn global_facets_ignore_filters() {
        let f = Fixture::new();
        f.add("iphone", 100, &f.phones, &f.apple, 3);
        f.add("galaxy", 200, &f.phones, &f.samsung, 2);
        f.add("case", 10, &f.cases, &f.apple, 1);

        let listing = f
            .service(FacetPolicy::Global)
            .list_products(&params(&[("search", "galaxy")]))
            .await
            .unwrap();

        assert_eq!(listing.pagination.total, 1);
        let total: i64 = listing.filters.categories.iter().map(|f| f.count).sum();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn detail_includes_related_from_same_category() {
        let f = Fixture::new();
        let target = f.add("target", 100, &f.phones, &f.apple, 0);
        for i in 1..=6 {
            f.add(&format!("phone-{i}"), 100, &f.phones, &f.samsung, i);
        }
        f.add("case", 10, &f.cases, &f.apple, 10);

        let detail = f
            .service(FacetPolicy::default())
            .product_by_slug("target")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.product.product.id, target.id);
        let related: Vec<&str> = detail
            .related_products
            .iter()
            .map(|v| v.product.slug.as_str())
            .collect();
        assert_eq!(related, ["phone-1", "phone-2", "phone-3", "phone-4"]);
    }

    #[tokio::test]
    async fn unknown_or_inactive_slug_is_none() {
        let f = Fixture::new();
        let mut retired = Product::new("Old", "old", 100, &f.phones, &f.apple);
        retired.is_active = false;
        f.store.insert_product(retired).unwrap();

        let service = f.service(FacetPolicy::default());
        assert!(service.product_by_slug("old").await.unwrap().is_none());
        assert!(service.product_by_slug("missing").await.unwrap().is_none());
    }

    #[test]
    fn detail_serializes_camel_case() {
        let f = Fixture::new();
        let product = Product::new("iPhone", "iphone", 100, &f.phones, &f.apple);
        let detail = ProductDetail {
            product: ProductView::new(product, (&f.phones).into(), (&f.apple).into()),
            related_products: Vec::new(),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json["relatedProducts"].is_array());
        assert_eq!(json["product"]["category"]["slug"], "smartphones");
        assert_eq!(json["product"]["inStock"], false);
    }
}
