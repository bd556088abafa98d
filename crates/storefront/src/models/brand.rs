//! Product brands.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A brand (manufacturer) of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Brand {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Unique URL-safe identifier.
    pub slug: String,

    /// Optional logo URL.
    pub logo: Option<String>,
}

/// The subset of a brand embedded in product responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
}

impl From<&Brand> for BrandRef {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            logo: brand.logo.clone(),
        }
    }
}

impl Brand {
    /// Create a brand with a fresh ID.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            slug: slug.into(),
            logo: None,
        }
    }

    /// Set the logo URL.
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Insert this brand.
    pub async fn insert<'e, E>(&self, executor: E) -> Result<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO brand (id, name, slug, logo) VALUES ($1, $2, $3, $4)")
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.slug)
            .bind(&self.logo)
            .execute(executor)
            .await
            .with_context(|| format!("failed to insert brand '{}'", self.slug))?;

        Ok(())
    }
}
