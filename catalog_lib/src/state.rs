//! Listing state and its reducer.
//!
//! [`ListState`] is a value: every event produces a new state plus at most
//! one fetch to perform. Nothing here touches the network, so the whole
//! pagination and filter-reset policy can be exercised synchronously.

use catalog_api::types::{Product, ProductPage};
use catalog_api::{Error, FilterCriteria, ProductQuery, Query};

use crate::scroll::{ScrollMetrics, SCROLL_TOLERANCE};

/// Rows requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// What the listing is doing right now.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    LoadingFirstPage,
    LoadingMore,
    /// The last fetch failed. Automatic fetching stays halted until filters
    /// are applied again.
    Error(Error),
}

/// A page fetch the reducer wants performed.
///
/// Carries the generation and page it was issued for so that a late
/// response can be recognised and dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub generation: u64,
    /// 1-indexed page number.
    pub page: u64,
    pub page_size: u64,
    pub criteria: FilterCriteria,
}

impl PageRequest {
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn to_query(&self) -> ProductQuery {
        ProductQuery::default()
            .with_criteria(self.criteria.clone())
            .with_page(self.page, self.page_size)
    }
}

/// Inputs to the reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent {
    /// Request the next page, e.g. the user reached the end of the listing.
    PageAdvance,
    /// The scrollable container moved.
    Scrolled(ScrollMetrics),
    /// Replace the active filters and restart from page 1.
    FiltersApplied(FilterCriteria),
    /// A fetch issued for `request` finished.
    PageLoaded {
        request: PageRequest,
        result: Result<ProductPage, Error>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FetchPage(PageRequest),
}

/// Result of feeding one event to [`ListState::reduce`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: ListState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn without_effect(state: ListState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    /// The page fetch requested by this transition, if any.
    pub fn request(&self) -> Option<&PageRequest> {
        match &self.effect {
            Some(Effect::FetchPage(request)) => Some(request),
            None => None,
        }
    }
}

/// Accumulated product listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState {
    items: Vec<Product>,
    page: u64,
    /// `None` until the first response for the current filters arrives.
    total: Option<u64>,
    phase: Phase,
    criteria: FilterCriteria,
    page_size: u64,
    generation: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListState {
    /// Empty listing with no filters. A zero page size is bumped to 1.
    pub fn new(page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total: None,
            phase: Phase::Idle,
            criteria: FilterCriteria::default(),
            page_size: page_size.max(1),
            generation: 0,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Total reported by the last response, if any.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::LoadingFirstPage | Phase::LoadingMore)
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.phase {
            Phase::Error(e) => Some(e),
            _ => None,
        }
    }

    /// True while the listing may still grow: either nothing has been
    /// fetched for the current filters or fewer rows than the total are held.
    pub fn has_more(&self) -> bool {
        self.total
            .map_or(true, |total| (self.items.len() as u64) < total)
    }

    /// Applies one event.
    pub fn reduce(self, event: ListEvent) -> Transition {
        match event {
            ListEvent::PageAdvance => self.advance(),
            ListEvent::Scrolled(metrics) => {
                if metrics.is_near_bottom(SCROLL_TOLERANCE) {
                    self.advance()
                } else {
                    tracing::debug!(
                        "scroll ignored: {} from bottom",
                        metrics.distance_to_bottom()
                    );
                    Transition::without_effect(self)
                }
            }
            ListEvent::FiltersApplied(criteria) => self.apply_filters(criteria),
            ListEvent::PageLoaded { request, result } => self.merge(request, result),
        }
    }

    fn advance(self) -> Transition {
        if self.is_loading() {
            tracing::debug!("page advance ignored: fetch in flight");
            return Transition::without_effect(self);
        }
        if self.error().is_some() {
            tracing::debug!("page advance ignored: listing is in error");
            return Transition::without_effect(self);
        }
        if !self.has_more() {
            tracing::debug!("page advance ignored: all {} rows loaded", self.items.len());
            return Transition::without_effect(self);
        }
        let next = if self.total.is_none() { 1 } else { self.page + 1 };
        self.begin_fetch(next)
    }

    fn apply_filters(mut self, criteria: FilterCriteria) -> Transition {
        self.criteria = criteria;
        self.items.clear();
        self.total = None;
        self.phase = Phase::Idle;
        self.generation += 1;
        self.begin_fetch(1)
    }

    fn begin_fetch(mut self, page: u64) -> Transition {
        self.page = page;
        self.phase = if page == 1 {
            Phase::LoadingFirstPage
        } else {
            Phase::LoadingMore
        };
        let request = PageRequest {
            generation: self.generation,
            page,
            page_size: self.page_size,
            criteria: self.criteria.clone(),
        };
        tracing::debug!(
            "fetching page {} (skip {}) for generation {}",
            page,
            request.skip(),
            self.generation
        );
        Transition {
            state: self,
            effect: Some(Effect::FetchPage(request)),
        }
    }

    fn merge(mut self, request: PageRequest, result: Result<ProductPage, Error>) -> Transition {
        if request.generation != self.generation || request.page != self.page || !self.is_loading()
        {
            tracing::debug!(
                "dropping stale response for page {} generation {} (current page {} generation {})",
                request.page,
                request.generation,
                self.page,
                self.generation
            );
            return Transition::without_effect(self);
        }

        match result {
            Ok(page) => {
                let received = page.products.len();
                if request.page == 1 {
                    self.items = page.products;
                } else {
                    self.items.extend(page.products);
                }
                let mut total = page.total;
                if received == 0 && request.page > 1 {
                    // Server ran dry before its own total; stop paging.
                    total = self.items.len() as u64;
                }
                if self.items.len() as u64 > total {
                    self.items.truncate(total as usize);
                }
                self.total = Some(total);
                self.phase = Phase::Idle;
            }
            Err(e) => {
                tracing::debug!("page {} failed: {}", request.page, e);
                self.phase = Phase::Error(e);
            }
        }
        Transition::without_effect(self)
    }
}
