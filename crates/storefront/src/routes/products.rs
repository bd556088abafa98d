//! Product catalog routes.
//!
//! - `GET /products` lists one page with pager metadata and facets
//! - `GET /products/{slug}` returns one product with related products

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::catalog::{ListingParams, ProductDetail, ProductListing};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{slug}", get(get_product))
}

/// List products matching the query-string filters.
///
/// The query string is taken as raw pairs so repeated keys never reject the
/// request; the first value of each key is used.
async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<ProductListing>> {
    let params = ListingParams::from_pairs(pairs);
    let listing = state
        .catalog()
        .list_products(&params)
        .await
        .map_err(AppError::store("Failed to fetch products"))?;

    Ok(Json(listing))
}

/// Fetch a single active product by slug.
async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let detail = state
        .catalog()
        .product_by_slug(&slug)
        .await
        .map_err(AppError::store("Failed to fetch product"))?
        .ok_or(AppError::NotFound("Product not found"))?;

    Ok(Json(detail))
}
