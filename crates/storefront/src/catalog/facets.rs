//! Category and brand facet counts for the filter sidebar.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filter::ProductFilter;
use crate::models::ProductView;

/// One filterable value and the number of active products behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Facet {
    pub name: String,
    pub slug: String,
    pub count: i64,
}

/// The dimension a facet list is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetDimension {
    Category,
    Brand,
}

/// How facet counts relate to the filters the user applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetPolicy {
    /// Count products matching every applied filter except the facet's own
    /// dimension, so the counts describe what selecting a value would yield.
    #[default]
    ContextNarrowed,
    /// Count all active products, ignoring applied filters.
    Global,
}

impl FacetPolicy {
    /// Parse a policy name from configuration.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "narrowed" | "context-narrowed" | "context" => Ok(Self::ContextNarrowed),
            "global" => Ok(Self::Global),
            other => bail!("unknown facet policy '{other}' (expected 'narrowed' or 'global')"),
        }
    }

    /// The filter a facet of `dimension` should be counted under.
    pub fn filter_for(&self, dimension: FacetDimension, applied: &ProductFilter) -> ProductFilter {
        match self {
            Self::Global => ProductFilter::default(),
            Self::ContextNarrowed => match dimension {
                FacetDimension::Category => applied.without_categories(),
                FacetDimension::Brand => applied.without_brands(),
            },
        }
    }
}

/// Facets for both dimensions, as returned in a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSet {
    pub categories: Vec<Facet>,
    pub brands: Vec<Facet>,
}

/// Count already-filtered products per facet value.
///
/// Values with no products are omitted; the rest are ordered by name, then slug.
pub fn tally<'a>(
    dimension: FacetDimension,
    products: impl IntoIterator<Item = &'a ProductView>,
) -> Vec<Facet> {
    let mut counts: HashMap<Uuid, Facet> = HashMap::new();

    for view in products {
        let (id, name, slug) = match dimension {
            FacetDimension::Category => (view.category.id, &view.category.name, &view.category.slug),
            FacetDimension::Brand => (view.brand.id, &view.brand.name, &view.brand.slug),
        };
        counts
            .entry(id)
            .or_insert_with(|| Facet {
                name: name.clone(),
                slug: slug.clone(),
                count: 0,
            })
            .count += 1;
    }

    let mut facets: Vec<Facet> = counts.into_values().collect();
    facets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
    facets
}
