//! Async driver that owns a [`ListState`] and performs the fetches it asks for.

use catalog_api::types::{Category, ProductPage};
use catalog_api::{Error, FilterCriteria};

use crate::error::CatalogError;
use crate::scroll::ScrollMetrics;
use crate::source::CatalogSource;
use crate::state::{Effect, ListEvent, ListState, PageRequest};

/// Owns the listing state for one screen and talks to a [`CatalogSource`].
///
/// Event handlers run one at a time and await their fetch before returning,
/// so at most one request is in flight. Front ends that need to show a
/// loading indicator can split a handler into [`dispatch`](Self::dispatch)
/// followed by [`fetch`](Self::fetch).
pub struct ListController<S> {
    source: S,
    state: ListState,
    categories: Vec<Category>,
    categories_loaded: bool,
}

impl<S: CatalogSource> ListController<S> {
    /// Creates a controller fetching `page_size` rows per page.
    pub fn new(source: S, page_size: u64) -> Result<Self, CatalogError> {
        if page_size == 0 {
            return Err(CatalogError::InvalidInput(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            source,
            state: ListState::new(page_size),
            categories: Vec::new(),
            categories_loaded: false,
        })
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn into_state(self) -> ListState {
        self.state
    }

    /// Fetches the first page for `criteria` and, on the first mount, the
    /// category list alongside it. Page 1 never waits on categories; a
    /// category failure is logged and leaves the category list empty.
    pub async fn on_mount(&mut self, criteria: FilterCriteria) -> &ListState {
        let Some(request) = self.dispatch(ListEvent::FiltersApplied(criteria)) else {
            return &self.state;
        };
        if self.categories_loaded {
            return self.fetch(request).await;
        }
        self.categories_loaded = true;

        let query = request.to_query();
        let (page, categories) = tokio::join!(
            self.source.fetch_products(&query),
            self.source.fetch_categories()
        );
        match categories {
            Ok(categories) => {
                tracing::debug!("loaded {} categories", categories.len());
                self.categories = categories;
            }
            Err(e) => tracing::warn!("Failed to load categories: {}", e),
        }
        self.complete(request, page)
    }

    /// Fetches the category list and caches it on success.
    pub async fn fetch_categories(&mut self) -> Result<&[Category], CatalogError> {
        self.categories_loaded = true;
        let categories = self.source.fetch_categories().await?;
        tracing::debug!("loaded {} categories", categories.len());
        self.categories = categories;
        Ok(&self.categories)
    }

    /// Resets the listing to page 1 of `criteria` and fetches it.
    pub async fn on_filters_applied(&mut self, criteria: FilterCriteria) -> &ListState {
        self.handle(ListEvent::FiltersApplied(criteria)).await
    }

    /// Fetches the next page unless a fetch is running, the listing is in
    /// error, or every row is already loaded.
    pub async fn on_page_advance(&mut self) -> &ListState {
        self.handle(ListEvent::PageAdvance).await
    }

    /// Advances when `metrics` says the container is scrolled to the bottom.
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) -> &ListState {
        self.handle(ListEvent::Scrolled(metrics)).await
    }

    /// Keeps advancing until the listing is exhausted, errors, or
    /// `max_pages` further pages have been fetched. Returns the number of
    /// fetches issued.
    pub async fn load_all(&mut self, max_pages: usize) -> usize {
        let mut fetched = 0;
        while fetched < max_pages {
            match self.dispatch(ListEvent::PageAdvance) {
                Some(request) => {
                    self.fetch(request).await;
                    fetched += 1;
                }
                None => break,
            }
        }
        fetched
    }

    /// Feeds one event to the reducer without performing its fetch.
    pub fn dispatch(&mut self, event: ListEvent) -> Option<PageRequest> {
        let transition = std::mem::take(&mut self.state).reduce(event);
        self.state = transition.state;
        match transition.effect {
            Some(Effect::FetchPage(request)) => Some(request),
            None => None,
        }
    }

    /// Performs `request` and merges the outcome. Outcomes for requests
    /// superseded in the meantime are dropped by the reducer.
    pub async fn fetch(&mut self, request: PageRequest) -> &ListState {
        let result = self.source.fetch_products(&request.to_query()).await;
        self.complete(request, result)
    }

    fn complete(
        &mut self,
        request: PageRequest,
        result: Result<ProductPage, Error>,
    ) -> &ListState {
        if let Err(e) = &result {
            tracing::debug!("page {} failed: {}", request.page, e);
        }
        self.dispatch(ListEvent::PageLoaded { request, result });
        &self.state
    }

    async fn handle(&mut self, event: ListEvent) -> &ListState {
        if let Some(request) = self.dispatch(event) {
            self.fetch(request).await;
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use catalog_api::types::Product;
    use catalog_api::{ProductQuery, Query, SortMode};

    use super::*;
    use crate::state::Phase;

    /// In-memory catalog that slices a fixed product list by skip/limit.
    struct FakeCatalog {
        products: Vec<Product>,
        fail_at_skip: Option<u64>,
        categories: Result<Vec<Category>, Error>,
        products_delay: Duration,
        categories_delay: Duration,
        requests: RefCell<Vec<ProductQuery>>,
        /// Endpoints in the order their responses completed.
        completed: RefCell<Vec<&'static str>>,
    }

    impl FakeCatalog {
        fn with_products(count: i64) -> Self {
            Self {
                products: (1..=count)
                    .map(|id| Product {
                        id,
                        title: format!("Product {}", id),
                        price: 10.0 * id as f64,
                        category: if id % 2 == 0 { "smartphones" } else { "laptops" }
                            .to_string(),
                        rating: 4.5,
                        thumbnail: format!("https://cdn.example.com/{}.png", id),
                    })
                    .collect(),
                fail_at_skip: None,
                categories: Ok(vec![Category {
                    slug: "smartphones".to_string(),
                    name: "Smartphones".to_string(),
                    url: None,
                }]),
                products_delay: Duration::ZERO,
                categories_delay: Duration::ZERO,
                requests: RefCell::new(Vec::new()),
                completed: RefCell::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl CatalogSource for FakeCatalog {
        async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, Error> {
            self.requests.borrow_mut().push(query.clone());
            tokio::time::sleep(self.products_delay).await;
            self.completed.borrow_mut().push("products");
            let skip = query.common.skip;
            if self.fail_at_skip == Some(skip) {
                return Err(Error::HttpStatus {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            let matching: Vec<Product> = self
                .products
                .iter()
                .filter(|p| {
                    query
                        .criteria
                        .category_slug()
                        .map_or(true, |slug| p.category == slug)
                })
                .cloned()
                .collect();
            let limit = query.common.limit.unwrap_or(30);
            Ok(ProductPage {
                total: matching.len() as u64,
                products: matching
                    .into_iter()
                    .skip(skip as usize)
                    .take(limit as usize)
                    .collect(),
                skip,
                limit,
            })
        }

        async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
            tokio::time::sleep(self.categories_delay).await;
            self.completed.borrow_mut().push("categories");
            self.categories.clone()
        }
    }

    #[tokio::test]
    async fn rejects_zero_page_size() {
        let result = ListController::new(FakeCatalog::with_products(1), 0);
        assert!(matches!(result, Err(CatalogError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn mount_loads_categories_and_first_page() {
        let catalog = FakeCatalog::with_products(25);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        let state = controller.on_mount(FilterCriteria::default()).await;
        assert_eq!(state.items().len(), 10);
        assert_eq!(state.total(), Some(25));
        assert_eq!(controller.categories().len(), 1);
        assert_eq!(catalog.request_count(), 1);
    }

    #[tokio::test]
    async fn mount_survives_category_failure() {
        let mut catalog = FakeCatalog::with_products(5);
        catalog.categories = Err(Error::Network("dns".to_string()));
        let mut controller = ListController::new(&catalog, 10).unwrap();
        let state = controller.on_mount(FilterCriteria::default()).await;
        assert_eq!(state.items().len(), 5);
        assert!(state.error().is_none());
        assert!(controller.categories().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn mount_does_not_wait_for_categories() {
        let mut catalog = FakeCatalog::with_products(25);
        catalog.products_delay = Duration::from_secs(1);
        catalog.categories_delay = Duration::from_secs(3);
        let mut controller = ListController::new(&catalog, 10).unwrap();

        let started = tokio::time::Instant::now();
        controller.on_mount(FilterCriteria::default()).await;
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(*catalog.completed.borrow(), vec!["products", "categories"]);
        assert_eq!(controller.state().items().len(), 10);
        assert_eq!(controller.categories().len(), 1);
    }

    #[tokio::test]
    async fn second_mount_skips_categories() {
        let catalog = FakeCatalog::with_products(25);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        controller.on_mount(FilterCriteria::default()).await;
        let completed = catalog.completed.borrow();
        assert_eq!(completed.iter().filter(|e| **e == "categories").count(), 1);
        assert_eq!(catalog.request_count(), 2);
    }

    #[tokio::test]
    async fn scrolling_pages_through_twenty_five_rows() {
        let catalog = FakeCatalog::with_products(25);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        let bottom = ScrollMetrics::at_bottom(1000.0, 400.0);

        assert_eq!(controller.on_scroll(bottom).await.items().len(), 20);
        assert_eq!(controller.on_scroll(bottom).await.items().len(), 25);
        assert_eq!(catalog.request_count(), 3);

        controller.on_scroll(bottom).await;
        controller.on_page_advance().await;
        assert_eq!(catalog.request_count(), 3);
        assert_eq!(controller.state().items().len(), 25);

        let skips: Vec<u64> = catalog
            .requests
            .borrow()
            .iter()
            .map(|q| q.common.skip)
            .collect();
        assert_eq!(skips, vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn failed_page_keeps_rows_and_stops() {
        let mut catalog = FakeCatalog::with_products(40);
        catalog.fail_at_skip = Some(10);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        let state = controller.on_page_advance().await;
        assert_eq!(state.items().len(), 10);
        assert!(matches!(
            state.phase(),
            Phase::Error(Error::HttpStatus { status: 500, .. })
        ));

        assert_eq!(controller.load_all(10).await, 0);
        assert_eq!(catalog.request_count(), 2);
    }

    #[tokio::test]
    async fn category_filter_resets_to_page_one() {
        let catalog = FakeCatalog::with_products(30);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        controller.on_page_advance().await;
        assert_eq!(controller.state().page(), 2);

        let criteria = FilterCriteria {
            category: Some("smartphones".to_string()),
            sort: SortMode::PriceAsc,
            ..FilterCriteria::default()
        };
        let state = controller.on_filters_applied(criteria).await;
        assert_eq!(state.page(), 1);
        assert_eq!(state.items().len(), 10);
        assert_eq!(state.total(), Some(15));
        assert!(state.items().iter().all(|p| p.category == "smartphones"));

        let requests = catalog.requests.borrow();
        assert_eq!(requests.len(), 3);
        let last = requests.last().unwrap();
        assert_eq!(last.common.skip, 0);
        assert_eq!(
            last.path_segments(),
            vec!["products", "category", "smartphones"]
        );
    }

    #[tokio::test]
    async fn load_all_stops_at_total() {
        let catalog = FakeCatalog::with_products(23);
        let mut controller = ListController::new(&catalog, 5).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        assert_eq!(controller.load_all(100).await, 4);
        assert_eq!(controller.state().items().len(), 23);
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn load_all_respects_page_cap() {
        let catalog = FakeCatalog::with_products(100);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        controller.on_mount(FilterCriteria::default()).await;
        assert_eq!(controller.load_all(2).await, 2);
        assert_eq!(controller.state().items().len(), 30);
    }

    #[tokio::test]
    async fn stale_fetch_after_filter_change_is_ignored() {
        let catalog = FakeCatalog::with_products(30);
        let mut controller = ListController::new(&catalog, 10).unwrap();
        let stale = controller
            .dispatch(ListEvent::FiltersApplied(FilterCriteria::default()))
            .unwrap();
        let fresh = controller
            .dispatch(ListEvent::FiltersApplied(FilterCriteria {
                category: Some("laptops".to_string()),
                ..FilterCriteria::default()
            }))
            .unwrap();

        assert!(controller.fetch(stale).await.items().is_empty());
        assert!(controller.is_loading());

        let state = controller.fetch(fresh).await;
        assert_eq!(state.total(), Some(15));
        assert!(state.items().iter().all(|p| p.category == "laptops"));
    }
}
