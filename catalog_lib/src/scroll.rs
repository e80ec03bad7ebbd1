//! Near-bottom detection for a scrollable listing.

/// Distance from the bottom, in the same units as the metrics, that still
/// counts as "at the bottom".
pub const SCROLL_TOLERANCE: f64 = 10.0;

/// Snapshot of a scrollable container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Offset of the visible window from the top of the content.
    pub scroll_top: f64,
    /// Full height of the content.
    pub scroll_height: f64,
    /// Height of the visible window.
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Metrics for a window scrolled all the way down. Content shorter than
    /// the window is reported with a zero offset.
    pub fn at_bottom(scroll_height: f64, client_height: f64) -> Self {
        Self::new(
            (scroll_height - client_height).max(0.0),
            scroll_height,
            client_height,
        )
    }

    /// Remaining content below the visible window. Never negative.
    pub fn distance_to_bottom(&self) -> f64 {
        (self.scroll_height - self.scroll_top - self.client_height).max(0.0)
    }

    pub fn is_near_bottom(&self, tolerance: f64) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + tolerance
    }
}
