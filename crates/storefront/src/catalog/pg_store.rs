//! PostgreSQL catalog store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;
use uuid::Uuid;

use super::facets::{Facet, FacetDimension};
use super::filter::ProductFilter;
use super::pagination::PageRequest;
use super::query_builder::ProductQueryBuilder;
use super::sort::SortKey;
use super::store::CatalogStore;
use crate::db;
use crate::models::{BrandRef, CategoryRef, Product, ProductView};

/// Catalog store backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A product row joined with its category and brand columns.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    slug: String,
    sku: String,
    description: String,
    price: i64,
    compare_at_price: Option<i64>,
    quantity: i32,
    images: Vec<String>,
    specifications: Json<Vec<(String, String)>>,
    is_featured: bool,
    is_active: bool,
    category_id: Uuid,
    brand_id: Uuid,
    created_at: DateTime<Utc>,
    category_name: String,
    category_slug: String,
    brand_name: String,
    brand_slug: String,
    brand_logo: Option<String>,
}

impl From<ProductRow> for ProductView {
    fn from(row: ProductRow) -> Self {
        let category = CategoryRef {
            id: row.category_id,
            name: row.category_name,
            slug: row.category_slug,
        };
        let brand = BrandRef {
            id: row.brand_id,
            name: row.brand_name,
            slug: row.brand_slug,
            logo: row.brand_logo,
        };
        let product = Product {
            id: row.id,
            name: row.name,
            slug: row.slug,
            sku: row.sku,
            description: row.description,
            price: row.price,
            compare_at_price: row.compare_at_price,
            quantity: row.quantity,
            images: row.images,
            specifications: row.specifications.0.into(),
            is_featured: row.is_featured,
            is_active: row.is_active,
            category_id: row.category_id,
            brand_id: row.brand_id,
            created_at: row.created_at,
        };
        ProductView::new(product, category, brand)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<Vec<ProductView>> {
        let sql = ProductQueryBuilder::new(filter).build(sort, page);
        debug!(%sql, "fetching product page");

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to fetch products")?;

        Ok(rows.into_iter().map(ProductView::from).collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64> {
        let sql = ProductQueryBuilder::new(filter).build_count();

        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .context("failed to count products")?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn facet_counts(
        &self,
        dimension: FacetDimension,
        filter: &ProductFilter,
    ) -> Result<Vec<Facet>> {
        let sql = ProductQueryBuilder::new(filter).build_facet_counts(dimension);

        let facets = sqlx::query_as::<_, Facet>(&sql)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to count {dimension:?} facets"))?;

        Ok(facets)
    }

    async fn healthy(&self) -> bool {
        db::check_health(&self.pool).await
    }
}
