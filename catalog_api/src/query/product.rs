use std::fmt;
use std::str::FromStr;

use url::Url;

use super::common::{Query, QueryCommon};

/// Server-side ordering of the product listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// API default order.
    #[default]
    None,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortMode {
    /// Wire value of the `sort` parameter, `None` when no parameter is sent.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SortMode::None => None,
            SortMode::PriceAsc => Some("price_asc"),
            SortMode::PriceDesc => Some("price_desc"),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortMode::None => "none",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(SortMode::None),
            "price-asc" | "price_asc" | "asc" => Ok(SortMode::PriceAsc),
            "price-desc" | "price_desc" | "desc" => Ok(SortMode::PriceDesc),
            other => Err(format!(
                "unknown sort mode '{}'. Valid: none, price-asc, price-desc",
                other
            )),
        }
    }
}

/// User-chosen constraints applied to a product fetch.
///
/// Numeric bounds are kept as the text the user typed and forwarded
/// verbatim; the catalog API is the one that rejects garbage. An empty
/// string means the bound is unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Category slug. Switches the request to the category-scoped endpoint.
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// Category slug, ignoring blank values.
    pub fn category_slug(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Query for `/products` or `/products/category/{slug}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub common: QueryCommon,
    pub criteria: FilterCriteria,
}

impl Query for ProductQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn path_segments(&self) -> Vec<&str> {
        match self.criteria.category_slug() {
            Some(slug) => vec!["products", "category", slug],
            None => vec!["products"],
        }
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(min_price) = non_empty(&self.criteria.min_price) {
            url.query_pairs_mut().append_pair("minPrice", min_price);
        }
        if let Some(max_price) = non_empty(&self.criteria.max_price) {
            url.query_pairs_mut().append_pair("maxPrice", max_price);
        }
        if let Some(min_rating) = non_empty(&self.criteria.min_rating) {
            url.query_pairs_mut().append_pair("minRating", min_rating);
        }
        if let Some(sort) = self.criteria.sort.as_param() {
            url.query_pairs_mut().append_pair("sort", sort);
        }
        url
    }
}

impl ProductQuery {
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }
    pub fn with_category(mut self, slug: &str) -> Self {
        self.criteria.category = Some(slug.to_string());
        self
    }
    pub fn with_min_price(mut self, min_price: &str) -> Self {
        self.criteria.min_price = Some(min_price.to_string());
        self
    }
    pub fn with_max_price(mut self, max_price: &str) -> Self {
        self.criteria.max_price = Some(max_price.to_string());
        self
    }
    pub fn with_min_rating(mut self, min_rating: &str) -> Self {
        self.criteria.min_rating = Some(min_rating.to_string());
        self
    }
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.criteria.sort = sort;
        self
    }
}
