use serde::{Deserialize, Serialize};

use super::Product;

/// One page of the product listing, as returned by `/products`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Number of products matching the request across all pages.
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}
