//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::{
    CatalogService, CatalogStore, FacetPolicy, MemoryCatalogStore, PgCatalogStore,
};
use crate::config::{CatalogBackend, Config};
use crate::db;
use crate::seed::SeedCatalog;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Catalog listing service over the configured store.
    catalog: CatalogService,
}

impl AppState {
    /// Build state for the configured backend.
    ///
    /// The postgres backend connects, applies migrations and optionally
    /// loads the reference catalog. The memory backend starts empty unless
    /// seeding is enabled.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn CatalogStore> = match config.backend {
            CatalogBackend::Postgres => {
                let pool = db::create_pool(config)
                    .await
                    .context("failed to create database pool")?;
                info!("Connected to PostgreSQL");

                db::run_migrations(&pool).await?;

                if config.seed_on_start {
                    SeedCatalog::build()?.write_to_postgres(&pool).await?;
                }
                Arc::new(PgCatalogStore::new(pool))
            }
            CatalogBackend::Memory => {
                let store = MemoryCatalogStore::new();
                if config.seed_on_start {
                    SeedCatalog::build()?.load_into_memory(&store)?;
                }
                info!("Using in-memory catalog");
                Arc::new(store)
            }
        };

        Ok(Self::from_store(
            store,
            config.facet_policy,
            config.max_page_size,
        ))
    }

    /// Build state around an existing store.
    pub fn from_store(
        store: Arc<dyn CatalogStore>,
        facet_policy: FacetPolicy,
        max_page_size: u32,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: CatalogService::new(store, facet_policy, max_page_size),
            }),
        }
    }

    /// Get the catalog service.
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Check if the catalog store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.inner.catalog.store().healthy().await
    }
}
