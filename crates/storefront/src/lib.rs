//! Dream Phones storefront catalog service.
//!
//! Product listing with filters, sorting, pagination and facet counts,
//! served over HTTP from PostgreSQL or an in-memory store.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;

pub use config::{CatalogBackend, Config};
pub use error::{AppError, AppResult};
pub use state::AppState;
