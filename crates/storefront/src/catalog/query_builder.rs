//! Product query builder using SeaQuery.
//!
//! Renders a [`ProductFilter`] into PostgreSQL for:
//! - the paged listing (joined with category and brand)
//! - the total count
//! - per-category and per-brand facet counts
//!
//! Every statement requires `product.is_active = TRUE`.

use sea_query::{
    Alias, Asterisk, Cond, Expr, JoinType, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};

use super::facets::FacetDimension;
use super::filter::ProductFilter;
use super::pagination::PageRequest;
use super::sort::SortKey;

const PRODUCT: &str = "product";
const CATEGORY: &str = "category";
const BRAND: &str = "brand";

/// Joined columns selected alongside `product.*`, as (table, column, alias).
const JOINED_COLUMNS: [(&str, &str, &str); 5] = [
    (CATEGORY, "name", "category_name"),
    (CATEGORY, "slug", "category_slug"),
    (BRAND, "name", "brand_name"),
    (BRAND, "slug", "brand_slug"),
    (BRAND, "logo", "brand_logo"),
];

/// Query builder for catalog reads.
pub struct ProductQueryBuilder<'a> {
    filter: &'a ProductFilter,
}

impl<'a> ProductQueryBuilder<'a> {
    pub fn new(filter: &'a ProductFilter) -> Self {
        Self { filter }
    }

    /// Build the paged listing SELECT.
    pub fn build(&self, sort: SortKey, page: PageRequest) -> String {
        let mut query = Query::select();

        // SELECT product.*, joined names/slugs
        query.column((Alias::new(PRODUCT), Asterisk));
        for (table, column, alias) in JOINED_COLUMNS {
            query.expr_as(col(table, column), Alias::new(alias));
        }

        query.from(Alias::new(PRODUCT));
        add_joins(&mut query);
        self.add_filters(&mut query);
        add_sorts(&mut query, sort);

        query.limit(u64::from(page.limit));
        query.offset(page.skip());

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a COUNT query for the total number of matches.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();

        query.expr(Expr::col(Asterisk).count());
        query.from(Alias::new(PRODUCT));
        add_joins(&mut query);
        self.add_filters(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    /// Build a grouped count of matches per category or brand.
    ///
    /// Inner joins mean only values with at least one match are returned.
    pub fn build_facet_counts(&self, dimension: FacetDimension) -> String {
        let table = match dimension {
            FacetDimension::Category => CATEGORY,
            FacetDimension::Brand => BRAND,
        };

        let mut query = Query::select();
        query
            .expr_as(col(table, "name"), Alias::new("name"))
            .expr_as(col(table, "slug"), Alias::new("slug"))
            .expr_as(Expr::col(Asterisk).count(), Alias::new("count"))
            .from(Alias::new(PRODUCT));

        add_joins(&mut query);
        self.add_filters(&mut query);

        query
            .group_by_col((Alias::new(table), Alias::new("id")))
            .group_by_col((Alias::new(table), Alias::new("name")))
            .group_by_col((Alias::new(table), Alias::new("slug")))
            .order_by((Alias::new(table), Alias::new("name")), Order::Asc)
            .order_by((Alias::new(table), Alias::new("slug")), Order::Asc);

        query.to_string(PostgresQueryBuilder)
    }

    /// Add WHERE conditions for the active flag and every present constraint.
    fn add_filters(&self, query: &mut SelectStatement) {
        for condition in self.conditions() {
            query.and_where(condition);
        }
    }

    fn conditions(&self) -> Vec<SimpleExpr> {
        let filter = self.filter;
        let mut conditions = vec![col(PRODUCT, "is_active").eq(true)];

        if !filter.category_slugs.is_empty() {
            conditions.push(col(CATEGORY, "slug").is_in(filter.category_slugs.clone()));
        }
        if !filter.brand_slugs.is_empty() {
            conditions.push(col(BRAND, "slug").is_in(filter.brand_slugs.clone()));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", escape_like_wildcards(search));
            let cond = Cond::any()
                .add(Expr::cust_with_values(
                    format!("{PRODUCT}.name ILIKE $1"),
                    [pattern.clone()],
                ))
                .add(Expr::cust_with_values(
                    format!("{PRODUCT}.description ILIKE $1"),
                    [pattern],
                ));
            conditions.push(cond.into());
        }
        if let Some(min) = filter.min_price {
            conditions.push(col(PRODUCT, "price").gte(min));
        }
        if let Some(max) = filter.max_price {
            conditions.push(col(PRODUCT, "price").lte(max));
        }
        if filter.featured_only {
            conditions.push(col(PRODUCT, "is_featured").eq(true));
        }
        if let Some(ref slug) = filter.slug {
            conditions.push(col(PRODUCT, "slug").eq(slug.clone()));
        }
        if let Some(category_id) = filter.category_id {
            conditions.push(col(PRODUCT, "category_id").eq(category_id));
        }
        if let Some(exclude_id) = filter.exclude_id {
            conditions.push(col(PRODUCT, "id").ne(exclude_id));
        }

        conditions
    }
}

fn col(table: &str, column: &str) -> Expr {
    Expr::col((Alias::new(table), Alias::new(column)))
}

/// Inner-join category and brand; every product has exactly one of each.
fn add_joins(query: &mut SelectStatement) {
    for (table, foreign_key) in [(CATEGORY, "category_id"), (BRAND, "brand_id")] {
        query.join(
            JoinType::InnerJoin,
            Alias::new(table),
            col(PRODUCT, foreign_key).equals((Alias::new(table), Alias::new("id"))),
        );
    }
}

/// Add ORDER BY for the sort key plus the ID tie-break.
fn add_sorts(query: &mut SelectStatement, sort: SortKey) {
    let (column, order) = match sort {
        SortKey::PriceLow => ("price", Order::Asc),
        SortKey::PriceHigh => ("price", Order::Desc),
        SortKey::Name => ("name", Order::Asc),
        SortKey::Newest => ("created_at", Order::Desc),
    };
    query.order_by((Alias::new(PRODUCT), Alias::new(column)), order);
    query.order_by((Alias::new(PRODUCT), Alias::new("id")), Order::Asc);
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn listing(filter: &ProductFilter) -> String {
        ProductQueryBuilder::new(filter).build(SortKey::default(), PageRequest::default())
    }

    #[test]
    fn default_listing_is_active_only() {
        let sql = listing(&ProductFilter::default());

        assert!(sql.contains("FROM \"product\""), "{sql}");
        assert!(sql.contains("INNER JOIN \"category\""), "{sql}");
        assert!(sql.contains("INNER JOIN \"brand\""), "{sql}");
        assert!(sql.contains("\"is_active\" = TRUE"), "{sql}");
        assert!(!sql.contains("is_featured"), "{sql}");
        assert!(!sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("LIMIT 12"), "{sql}");
        assert!(sql.contains("OFFSET 0"), "{sql}");
    }

    #[test]
    fn selects_joined_names() {
        let sql = listing(&ProductFilter::default());
        for alias in ["category_name", "category_slug", "brand_name", "brand_slug", "brand_logo"] {
            assert!(sql.contains(&format!("\"{alias}\"")), "missing {alias}: {sql}");
        }
    }

    #[test]
    fn slug_lists_use_in() {
        let filter = ProductFilter {
            category_slugs: vec!["smartphones".to_string(), "tablets".to_string()],
            brand_slugs: vec!["apple".to_string()],
            ..Default::default()
        };
        let sql = listing(&filter);

        assert!(sql.contains("\"category\".\"slug\" IN ("), "{sql}");
        assert!(sql.contains("'smartphones'"), "{sql}");
        assert!(sql.contains("'tablets'"), "{sql}");
        assert!(sql.contains("\"brand\".\"slug\" IN ("), "{sql}");
        assert!(sql.contains("'apple'"), "{sql}");
    }

    #[test]
    fn search_matches_name_or_description() {
        let filter = ProductFilter {
            search: Some("pro".to_string()),
            ..Default::default()
        };
        let sql = listing(&filter);

        assert!(sql.contains("product.name ILIKE"), "{sql}");
        assert!(sql.contains("product.description ILIKE"), "{sql}");
        assert!(sql.contains("%pro%"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn search_wildcards_escaped() {
        let filter = ProductFilter {
            search: Some("100%_done".to_string()),
            ..Default::default()
        };
        let sql = listing(&filter);

        assert!(
            sql.contains("100\\\\%\\\\_done") || sql.contains("100\\%\\_done"),
            "LIKE wildcards should be escaped: {sql}"
        );
        assert!(!sql.contains("%100%_done%"), "{sql}");
    }

    #[test]
    fn price_bounds() {
        let filter = ProductFilter {
            min_price: Some(50000.0),
            max_price: Some(150000.0),
            ..Default::default()
        };
        let sql = listing(&filter);

        assert!(sql.contains("\"product\".\"price\" >="), "{sql}");
        assert!(sql.contains("\"product\".\"price\" <="), "{sql}");
    }

    #[test]
    fn featured_flag() {
        let filter = ProductFilter {
            featured_only: true,
            ..Default::default()
        };
        assert!(listing(&filter).contains("\"is_featured\" = TRUE"));
    }

    #[test]
    fn sort_orders_with_id_tiebreak() {
        let filter = ProductFilter::default();
        let builder = ProductQueryBuilder::new(&filter);

        let cases = [
            (SortKey::PriceLow, "\"product\".\"price\" ASC"),
            (SortKey::PriceHigh, "\"product\".\"price\" DESC"),
            (SortKey::Name, "\"product\".\"name\" ASC"),
            (SortKey::Newest, "\"product\".\"created_at\" DESC"),
        ];
        for (key, expected) in cases {
            let sql = builder.build(key, PageRequest::default());
            assert!(
                sql.contains(&format!("ORDER BY {expected}, \"product\".\"id\" ASC")),
                "{key:?}: {sql}"
            );
        }
    }

    #[test]
    fn pagination_offset() {
        let filter = ProductFilter::default();
        let sql = ProductQueryBuilder::new(&filter).build(SortKey::Newest, PageRequest::new(3, 5));

        assert!(sql.contains("LIMIT 5"), "{sql}");
        assert!(sql.contains("OFFSET 10"), "{sql}");
    }

    #[test]
    fn count_has_no_window_or_order() {
        let filter = ProductFilter {
            featured_only: true,
            ..Default::default()
        };
        let sql = ProductQueryBuilder::new(&filter).build_count();

        assert!(sql.contains("COUNT(*)"), "{sql}");
        assert!(sql.contains("\"is_active\" = TRUE"), "{sql}");
        assert!(sql.contains("\"is_featured\" = TRUE"), "{sql}");
        assert!(!sql.contains("LIMIT"), "{sql}");
        assert!(!sql.contains("ORDER BY"), "{sql}");
    }

    #[test]
    fn facet_counts_group_by_dimension() {
        let filter = ProductFilter {
            brand_slugs: vec!["apple".to_string()],
            ..Default::default()
        };
        let sql = ProductQueryBuilder::new(&filter).build_facet_counts(FacetDimension::Category);

        assert!(sql.contains("COUNT(*) AS \"count\""), "{sql}");
        assert!(sql.contains("GROUP BY \"category\".\"id\""), "{sql}");
        assert!(sql.contains("ORDER BY \"category\".\"name\" ASC"), "{sql}");
        assert!(sql.contains("\"is_active\" = TRUE"), "{sql}");
        assert!(sql.contains("'apple'"), "{sql}");

        let sql = ProductQueryBuilder::new(&filter).build_facet_counts(FacetDimension::Brand);
        assert!(sql.contains("GROUP BY \"brand\".\"id\""), "{sql}");
    }

    #[test]
    fn related_lookup_excludes_product() {
        let category_id = Uuid::now_v7();
        let product_id = Uuid::now_v7();
        let filter = ProductFilter::related_to(category_id, product_id);
        let sql = ProductQueryBuilder::new(&filter).build(SortKey::Newest, PageRequest::new(1, 4));

        assert!(sql.contains(&category_id.to_string()), "{sql}");
        assert!(sql.contains("\"product\".\"id\" <>"), "{sql}");
        assert!(sql.contains(&product_id.to_string()), "{sql}");
        assert!(sql.contains("LIMIT 4"), "{sql}");
    }

    #[test]
    fn slug_lookup() {
        let filter = ProductFilter::by_slug("iphone-15");
        let sql = listing(&filter);
        assert!(sql.contains("\"product\".\"slug\" = 'iphone-15'"), "{sql}");
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }
}
