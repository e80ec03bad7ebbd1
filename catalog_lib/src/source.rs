//! The seam between the listing controller and the catalog API.

use catalog_api::types::{Category, ProductPage};
use catalog_api::{Client, Error, ProductQuery};

/// Anything that can serve product pages and the category list.
///
/// Implemented by [`catalog_api::Client`]; tests substitute scripted sources.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, Error>;

    async fn fetch_categories(&self) -> Result<Vec<Category>, Error>;
}

impl CatalogSource for Client {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, Error> {
        self.get_products(query).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        self.get_categories().await
    }
}

impl<S: CatalogSource> CatalogSource for &S {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, Error> {
        (**self).fetch_products(query).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        (**self).fetch_categories().await
    }
}
