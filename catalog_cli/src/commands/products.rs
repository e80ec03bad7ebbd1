//! The `products` subcommand: mounts a listing with the given filters and
//! scrolls it forward page by page.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use catalog_lib::{
    CatalogSource, FilterCriteria, ListController, ListEvent, ListState, ScrollMetrics, SortMode,
    DEFAULT_PAGE_SIZE,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{print_products, summary_line, OutputFormat};

/// Height of one rendered row, in the same units as [`VIEWPORT_HEIGHT`].
const ROW_HEIGHT: f64 = 53.0;
const VIEWPORT_HEIGHT: f64 = 400.0;
/// Upper bound on pages fetched by `--all`.
const MAX_PAGES: usize = 1000;

#[derive(Args)]
pub struct ProductsArgs {
    /// Category slug (see `catalog categories`)
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price, forwarded to the API as typed
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price, forwarded to the API as typed
    #[arg(long)]
    pub max_price: Option<String>,

    /// Minimum rating, forwarded to the API as typed
    #[arg(long)]
    pub min_rating: Option<String>,

    /// Sort: none, price-asc, price-desc
    #[arg(long, default_value = "none")]
    pub sort: String,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Scroll to the bottom this many times after the first page
    #[arg(long, default_value = "0", conflicts_with = "all")]
    pub scrolls: usize,

    /// Keep scrolling until every matching product is loaded
    #[arg(long)]
    pub all: bool,
}

impl ProductsArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let sort: SortMode = self.sort.parse().map_err(|e: String| anyhow!(e))?;
        Ok(FilterCriteria {
            category: self.category.clone(),
            min_price: self.min_price.clone(),
            max_price: self.max_price.clone(),
            min_rating: self.min_rating.clone(),
            sort,
        })
    }
}

/// Executes the products subcommand: mounts the listing, simulates
/// scrolling, then prints whatever was accumulated. A failed page still
/// prints the rows loaded before it and then returns the error.
pub async fn run<S: CatalogSource>(
    args: &ProductsArgs,
    source: S,
    format: &OutputFormat,
) -> Result<()> {
    let state = load(args, source, MAX_PAGES).await?;
    print_products(state.items(), format)?;
    eprintln!("{}", summary_line(state.items().len(), state.total()));

    if let Some(err) = state.error() {
        bail!("{}", err);
    }
    Ok(())
}

/// Mounts a controller with the requested filters and scrolls it to the
/// bottom `--scrolls` times (or up to `max_pages` times with `--all`),
/// stopping as soon as a scroll no longer triggers a fetch.
async fn load<S: CatalogSource>(
    args: &ProductsArgs,
    source: S,
    max_pages: usize,
) -> Result<ListState> {
    let criteria = args.criteria()?;
    let slug = criteria.category_slug().map(str::to_string);
    let mut controller = ListController::new(source, args.page_size)?;

    with_spinner("Loading...", controller.on_mount(criteria)).await;
    if let Some(slug) = slug {
        if !controller.categories().is_empty()
            && !controller.categories().iter().any(|c| c.slug == slug)
        {
            tracing::warn!("Category '{}' is not in the category list", slug);
        }
    }

    let scrolls = if args.all { max_pages } else { args.scrolls };
    for _ in 0..scrolls {
        let metrics = bottom_of(controller.state().items().len());
        match controller.dispatch(ListEvent::Scrolled(metrics)) {
            Some(request) => {
                with_spinner("Loading more products...", controller.fetch(request)).await;
            }
            None => break,
        }
    }

    Ok(controller.into_state())
}

/// Scroll position of a listing of `rows` rows scrolled all the way down.
fn bottom_of(rows: usize) -> ScrollMetrics {
    ScrollMetrics::at_bottom(rows as f64 * ROW_HEIGHT, VIEWPORT_HEIGHT)
}

async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}
