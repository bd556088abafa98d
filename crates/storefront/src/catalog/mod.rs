//! Product catalog queries.
//!
//! Turns listing parameters into a filtered, sorted, paged product list
//! with category and brand facet counts.

mod facets;
mod filter;
mod memory_store;
mod pagination;
mod params;
mod pg_store;
mod query_builder;
mod service;
mod sort;
mod store;

pub use facets::{Facet, FacetDimension, FacetPolicy, FacetSet, tally};
pub use filter::ProductFilter;
pub use memory_store::MemoryCatalogStore;
pub use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, Pagination};
pub use params::{ListingParams, ListingQuery};
pub use pg_store::PgCatalogStore;
pub use query_builder::ProductQueryBuilder;
pub use service::{CatalogService, ProductDetail, ProductListing, RELATED_LIMIT};
pub use sort::SortKey;
pub use store::CatalogStore;
