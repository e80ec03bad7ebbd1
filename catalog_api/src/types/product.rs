use serde::{Deserialize, Serialize};

pub type ProductID = i64;

/// A catalog product. Fields not listed here are ignored on decode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Product {
    pub id: ProductID,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub rating: f64,
    pub thumbnail: String,
}

/// Entry of `/products/categories`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Machine identifier, used in `/products/category/{slug}`.
    pub slug: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
