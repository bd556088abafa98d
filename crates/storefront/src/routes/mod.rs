//! HTTP route handlers.

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the application router with state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(products::router())
        .merge(health::router())
        .with_state(state)
}
