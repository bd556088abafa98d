//! Product filter predicate.
//!
//! [`ProductFilter`] is the structured form of the user's listing filters.
//! The same predicate is rendered to SQL by
//! [`ProductQueryBuilder`](super::ProductQueryBuilder) and evaluated directly
//! by the in-memory store, so both backends agree on what matches.
//!
//! The active flag is not part of the filter: every predicate requires
//! `is_active = true` unconditionally.

use tracing::debug;
use uuid::Uuid;

use super::params::ListingParams;
use crate::models::ProductView;

/// Conjunction of catalog constraints. Empty fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Category slugs; a product matches if its category is any of them.
    pub category_slugs: Vec<String>,

    /// Brand slugs; a product matches if its brand is any of them.
    pub brand_slugs: Vec<String>,

    /// Case-insensitive substring matched against name or description.
    pub search: Option<String>,

    /// Inclusive lower price bound.
    pub min_price: Option<f64>,

    /// Inclusive upper price bound.
    pub max_price: Option<f64>,

    /// Only featured products.
    pub featured_only: bool,

    /// Exact slug match (single-product lookups).
    pub slug: Option<String>,

    /// Owning category (related-product lookups).
    pub category_id: Option<Uuid>,

    /// Product to leave out of the result.
    pub exclude_id: Option<Uuid>,
}

impl ProductFilter {
    /// Build the filter from raw listing parameters.
    ///
    /// Never fails: malformed values are dropped as if absent.
    pub fn from_params(params: &ListingParams) -> Self {
        Self {
            category_slugs: split_slugs(params.category.as_deref()),
            brand_slugs: split_slugs(params.brand.as_deref()),
            search: params.search.clone().filter(|s| !s.is_empty()),
            min_price: parse_price("minPrice", params.min_price.as_deref()),
            max_price: parse_price("maxPrice", params.max_price.as_deref()),
            featured_only: params.featured.as_deref() == Some("true"),
            ..Self::default()
        }
    }

    /// Filter matching a single active product by slug.
    pub fn by_slug(slug: &str) -> Self {
        Self {
            slug: Some(slug.to_string()),
            ..Self::default()
        }
    }

    /// Filter matching active products in a category other than `exclude_id`.
    pub fn related_to(category_id: Uuid, exclude_id: Uuid) -> Self {
        Self {
            category_id: Some(category_id),
            exclude_id: Some(exclude_id),
            ..Self::default()
        }
    }

    /// This filter with the category dimension removed.
    pub fn without_categories(&self) -> Self {
        Self {
            category_slugs: Vec::new(),
            ..self.clone()
        }
    }

    /// This filter with the brand dimension removed.
    pub fn without_brands(&self) -> Self {
        Self {
            brand_slugs: Vec::new(),
            ..self.clone()
        }
    }

    /// Evaluate the predicate against a joined product.
    pub fn matches(&self, view: &ProductView) -> bool {
        let product = &view.product;

        if !product.is_active {
            return false;
        }
        if !self.category_slugs.is_empty() && !self.category_slugs.contains(&view.category.slug) {
            return false;
        }
        if !self.brand_slugs.is_empty() && !self.brand_slugs.contains(&view.brand.slug) {
            return false;
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min) = self.min_price
            && (product.price as f64) < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && (product.price as f64) > max
        {
            return false;
        }
        if self.featured_only && !product.is_featured {
            return false;
        }
        if let Some(ref slug) = self.slug
            && product.slug != *slug
        {
            return false;
        }
        if let Some(category_id) = self.category_id
            && product.category_id != category_id
        {
            return false;
        }
        if let Some(exclude_id) = self.exclude_id
            && product.id == exclude_id
        {
            return false;
        }
        true
    }
}

/// Split a comma-separated slug list, discarding empty entries.
fn split_slugs(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse a price bound, treating anything that is not a finite number as absent.
fn parse_price(param: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            debug!(param, value = raw, "ignoring unparseable price filter");
            None
        }
    }
}
