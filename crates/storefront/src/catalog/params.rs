//! Raw listing parameters as they arrive on the query string.

use serde::Deserialize;

use super::filter::ProductFilter;
use super::pagination::PageRequest;
use super::sort::SortKey;

/// Query-string parameters for `GET /products`.
///
/// Every field is kept as the raw string so that malformed values can be
/// dropped leniently instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub featured: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListingParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// A repeated key keeps its first value. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "brand" => &mut params.brand,
                "search" => &mut params.search,
                "minPrice" => &mut params.min_price,
                "maxPrice" => &mut params.max_price,
                "featured" => &mut params.featured,
                "sort" => &mut params.sort,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// A fully resolved listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub filter: ProductFilter,
    pub sort: SortKey,
    pub page: PageRequest,
}

impl ListingQuery {
    /// Resolve raw parameters, capping `limit` at `max_page_size`.
    pub fn from_params(params: &ListingParams, max_page_size: u32) -> Self {
        Self {
            filter: ProductFilter::from_params(params),
            sort: SortKey::parse(params.sort.as_deref()),
            page: PageRequest::from_raw(
                params.page.as_deref(),
                params.limit.as_deref(),
                max_page_size,
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_query_string() {
        let params: ListingParams = serde_json::from_value(serde_json::json!({
            "minPrice": "100",
            "maxPrice": "200",
            "sort": "price-low",
        }))
        .unwrap();

        assert_eq!(params.min_price.as_deref(), Some("100"));
        assert_eq!(params.max_price.as_deref(), Some("200"));
        assert!(params.category.is_none());
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let params = ListingParams::from_pairs(pairs(&[
            ("brand", "apple"),
            ("minPrice", "abc"),
            ("brand", "samsung"),
            ("minPrice", "1"),
            ("page", "1"),
            ("page", "2"),
            ("utm_source", "mail"),
        ]));

        assert_eq!(params.brand.as_deref(), Some("apple"));
        assert_eq!(params.min_price.as_deref(), Some("abc"));
        assert_eq!(params.page.as_deref(), Some("1"));
        assert!(params.category.is_none());
    }

    #[test]
    fn pairs_use_camel_case_keys() {
        let params = ListingParams::from_pairs(pairs(&[("maxPrice", "200"), ("max_price", "5")]));
        assert_eq!(params.max_price.as_deref(), Some("200"));
    }

    #[test]
    fn resolves_defaults() {
        let query = ListingQuery::from_params(&ListingParams::default(), 100);
        assert_eq!(query.sort, SortKey::Newest);
        assert_eq!(query.page, PageRequest::new(1, 12));
        assert_eq!(query.filter, ProductFilter::default());
    }
}
