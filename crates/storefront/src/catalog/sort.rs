//! Listing sort orders.

use std::cmp::Ordering;

use crate::models::ProductView;

/// Sort order for product listings.
///
/// Every order breaks ties on product ID ascending so that pages are stable
/// across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Name ascending.
    Name,
    /// Creation time descending.
    #[default]
    Newest,
}

impl SortKey {
    /// Resolve a `sort` parameter. Absent or unknown keys fall back to newest.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price-low") => Self::PriceLow,
            Some("price-high") => Self::PriceHigh,
            Some("name") => Self::Name,
            _ => Self::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
            Self::Newest => "newest",
        }
    }

    /// Compare two products under this order, including the ID tie-break.
    pub fn compare(&self, a: &ProductView, b: &ProductView) -> Ordering {
        let (a, b) = (&a.product, &b.product);
        let primary = match self {
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Name => a.name.cmp(&b.name),
            Self::Newest => b.created_at.cmp(&a.created_at),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}
