//! Products and the joined view served by the catalog.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::{Brand, BrandRef, Category, CategoryRef, Specifications};

/// A product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUIDv7).
    pub id: Uuid,

    pub name: String,

    /// Unique URL-safe identifier.
    pub slug: String,

    pub sku: String,

    pub description: String,

    /// Price in the smallest currency unit.
    pub price: i64,

    /// Original price shown struck through when the product is discounted.
    pub compare_at_price: Option<i64>,

    /// Units in stock.
    pub quantity: i32,

    /// Image URLs, first is the primary image.
    pub images: Vec<String>,

    pub specifications: Specifications,

    pub is_featured: bool,

    /// Soft-delete flag. Inactive products never leave the store.
    pub is_active: bool,

    pub category_id: Uuid,

    pub brand_id: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create an active, unfeatured product with a fresh ID.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        price: i64,
        category: &Category,
        brand: &Brand,
    ) -> Self {
        let slug = slug.into();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            sku: slug.to_uppercase(),
            slug,
            description: String::new(),
            price,
            compare_at_price: None,
            quantity: 0,
            images: Vec::new(),
            specifications: Specifications::new(),
            is_featured: false,
            is_active: true,
            category_id: category.id,
            brand_id: brand.id,
            created_at: Utc::now(),
        }
    }

    /// Insert this product.
    pub async fn insert<'e, E>(&self, executor: E) -> Result<()>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO product (
                id, name, slug, sku, description, price, compare_at_price, quantity,
                images, specifications, is_featured, is_active, category_id, brand_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.slug)
        .bind(&self.sku)
        .bind(&self.description)
        .bind(self.price)
        .bind(self.compare_at_price)
        .bind(self.quantity)
        .bind(&self.images)
        .bind(Json(self.specifications.pairs()))
        .bind(self.is_featured)
        .bind(self.is_active)
        .bind(self.category_id)
        .bind(self.brand_id)
        .bind(self.created_at)
        .execute(executor)
        .await
        .with_context(|| format!("failed to insert product '{}'", self.slug))?;

        Ok(())
    }
}

/// A product joined with its category and brand, as returned by catalog reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,

    pub category: CategoryRef,

    pub brand: BrandRef,

    /// Whole-percent discount when `compareAtPrice` exceeds `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<u32>,

    pub in_stock: bool,
}

impl ProductView {
    pub fn new(product: Product, category: CategoryRef, brand: BrandRef) -> Self {
        let discount_percentage = discount_percentage(product.price, product.compare_at_price);
        let in_stock = product.quantity > 0;
        Self {
            product,
            category,
            brand,
            discount_percentage,
            in_stock,
        }
    }
}

/// Percentage saved against the compare-at price, rounded to the nearest whole percent.
///
/// Returns `None` unless `compare_at_price` is strictly greater than `price`.
pub fn discount_percentage(price: i64, compare_at_price: Option<i64>) -> Option<u32> {
    let compare = compare_at_price?;
    if compare <= price || compare <= 0 {
        return None;
    }
    let pct = ((compare - price) as f64 / compare as f64 * 100.0).round();
    Some(pct as u32)
}

/// Format an amount as Indian rupees with lakh/crore digit grouping.
///
/// `159900` renders as `₹1,59,900`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{sign}₹{},{tail}", groups.join(","))
}
