//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, bail};

use crate::catalog::{FacetPolicy, MAX_PAGE_SIZE};

/// Which catalog store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogBackend {
    #[default]
    Postgres,
    Memory,
}

impl CatalogBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown catalog backend '{other}' (expected 'postgres' or 'memory')"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Catalog store backend (default: postgres).
    pub backend: CatalogBackend,

    /// PostgreSQL connection URL. Required for the postgres backend.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// How facet counts relate to applied filters (default: narrowed).
    pub facet_policy: FacetPolicy,

    /// Upper bound on the `limit` listing parameter (default: 100).
    pub max_page_size: u32,

    /// Load the reference catalog at startup (default: false).
    pub seed_on_start: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "3000")
            .parse()
            .context("PORT must be a valid u16")?;

        let backend = CatalogBackend::parse(&var("CATALOG_BACKEND", "postgres"))
            .context("invalid CATALOG_BACKEND")?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if backend == CatalogBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL environment variable is required for the postgres backend");
        }

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let facet_policy = FacetPolicy::parse(&var("CATALOG_FACET_POLICY", "narrowed"))
            .context("invalid CATALOG_FACET_POLICY")?;

        let max_page_size: u32 = var("CATALOG_MAX_PAGE_SIZE", &MAX_PAGE_SIZE.to_string())
            .parse()
            .context("CATALOG_MAX_PAGE_SIZE must be a valid u32")?;
        if max_page_size == 0 {
            bail!("CATALOG_MAX_PAGE_SIZE must be at least 1");
        }

        let seed_on_start = match var("SEED_ON_START", "false").to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            other => bail!("SEED_ON_START must be a boolean, got '{other}'"),
        };

        Ok(Self {
            port,
            backend,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            facet_policy,
            max_page_size,
            seed_on_start,
        })
    }

    /// The database URL, failing when none is configured.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL environment variable is required")
    }
}
