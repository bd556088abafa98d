//! Catalog storage abstraction.
//!
//! All catalog reads go through [`CatalogStore`]. The listing service only
//! composes these primitives, so PostgreSQL and the in-memory store must
//! agree on filter, sort and facet semantics.

use anyhow::Result;
use async_trait::async_trait;

use super::facets::{Facet, FacetDimension};
use super::filter::ProductFilter;
use super::pagination::PageRequest;
use super::sort::SortKey;
use crate::models::ProductView;

/// Read-only access to the product catalog.
///
/// Every method applies the active-only rule regardless of `filter`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch one sorted page of matching products.
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        sort: SortKey,
        page: PageRequest,
    ) -> Result<Vec<ProductView>>;

    /// Count all matching products.
    async fn count(&self, filter: &ProductFilter) -> Result<u64>;

    /// Count matching products per category or brand, omitting empty values.
    async fn facet_counts(
        &self,
        dimension: FacetDimension,
        filter: &ProductFilter,
    ) -> Result<Vec<Facet>>;

    /// Whether the backing store is reachable.
    async fn healthy(&self) -> bool;
}
