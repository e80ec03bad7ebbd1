//! Shared query infrastructure: the [`Query`] trait and the [`QueryCommon`] pagination fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for offset pagination.
pub trait Query {
    /// Path segments of the endpoint, relative to the API base URL.
    fn path_segments(&self) -> Vec<&str>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the number of rows to skip.
    fn with_skip(mut self, skip: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().skip = skip;
        self
    }

    /// Sets the maximum number of rows returned.
    fn with_limit(mut self, limit: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Selects a 1-indexed page of `limit` rows, i.e. `skip = (page - 1) * limit`.
    fn with_page(mut self, page: u64, limit: u64) -> Self
    where
        Self: Sized,
    {
        let common = self.get_common();
        common.skip = page.saturating_sub(1).saturating_mul(limit);
        common.limit = Some(limit);
        self
    }
}

/// Offset pagination fields shared by all query types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Rows to skip. Defaults to 0.
    pub skip: u64,
    /// Rows per page. `None` uses the API default.
    pub limit: Option<u64>,
}

impl QueryCommon {
    /// Appends the pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("skip", &self.skip.to_string());
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        url
    }
}
