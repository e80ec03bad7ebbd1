//! Library layer for the catalog browser: the product listing state machine
//! and the controller that drives it against the catalog API.
//!
//! [`state::ListState`] is a pure reducer over listing events;
//! [`controller::ListController`] owns one and performs the page fetches it
//! requests through a [`source::CatalogSource`].

pub mod controller;
pub mod error;
pub mod scroll;
pub mod source;
pub mod state;

pub use catalog_api;
pub use catalog_api::types;
pub use catalog_api::{Client, FilterCriteria, ProductQuery, Query, SortMode};

pub use controller::ListController;
pub use error::CatalogError;
pub use scroll::{ScrollMetrics, SCROLL_TOLERANCE};
pub use source::CatalogSource;
pub use state::{Effect, ListEvent, ListState, PageRequest, Phase, Transition, DEFAULT_PAGE_SIZE};
