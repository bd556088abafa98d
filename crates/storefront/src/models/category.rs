//! Product categories.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product category (e.g. "Smartphones").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Unique URL-safe identifier.
    pub slug: String,

    /// Optional description.
    pub description: Option<String>,
}

/// The subset of a category embedded in product responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

impl Category {
    /// Create a category with a fresh ID.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            slug: slug.into(),
            description: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Insert this category.
    pub async fn insert<'e, E>(&self, executor: E) -> Result<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query("INSERT INTO category (id, name, slug, description) VALUES ($1, $2, $3, $4)")
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.slug)
            .bind(&self.description)
            .execute(executor)
            .await
            .with_context(|| format!("failed to insert category '{}'", self.slug))?;

        Ok(())
    }
}
