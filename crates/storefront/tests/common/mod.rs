#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Drives the real router and catalog service over an in-memory store
//! loaded with the reference catalog.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use storefront::AppState;
use storefront::catalog::{CatalogStore, FacetPolicy, MAX_PAGE_SIZE, MemoryCatalogStore};
use storefront::models::{Brand, Category};
use storefront::routes;
use storefront::seed::SeedCatalog;
use storefront_test_utils::seeded_store;

/// Test application wrapper using the real routes and state.
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryCatalogStore>,
    pub catalog: SeedCatalog,
}

impl TestApp {
    /// Reference catalog with the default facet policy.
    pub fn new() -> Self {
        Self::with_policy(FacetPolicy::default())
    }

    /// Reference catalog with the given facet policy.
    pub fn with_policy(policy: FacetPolicy) -> Self {
        let (store, catalog) = seeded_store().expect("Failed to seed store");
        let state = AppState::from_store(store.clone(), policy, MAX_PAGE_SIZE);
        Self {
            router: routes::router(state),
            store,
            catalog,
        }
    }

    pub fn category(&self, slug: &str) -> &Category {
        self.catalog
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .expect("unknown seed category")
    }

    pub fn brand(&self, slug: &str) -> &Brand {
        self.catalog
            .brands
            .iter()
            .find(|b| b.slug == slug)
            .expect("unknown seed brand")
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        request(self.router.clone(), uri).await
    }

    /// Slugs of the products in a `/products` listing.
    pub async fn list_slugs(&self, query: &str) -> Vec<String> {
        let (status, body) = self.get(&format!("/products?{query}")).await;
        assert_eq!(status, StatusCode::OK, "listing failed: {body}");
        slugs(&body["products"])
    }
}

/// Build a router over an arbitrary store.
pub fn router_for(store: Arc<dyn CatalogStore>) -> Router {
    routes::router(AppState::from_store(
        store,
        FacetPolicy::default(),
        MAX_PAGE_SIZE,
    ))
}

/// Send a GET request through `router` and decode the JSON body.
pub async fn request(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Extract the `slug` of every product in a JSON array.
pub fn slugs(products: &Value) -> Vec<String> {
    products
        .as_array()
        .expect("products should be an array")
        .iter()
        .map(|p| p["slug"].as_str().expect("slug").to_string())
        .collect()
}
