//! Named constants for TUI layout and navigation.

use std::time::Duration;

/// Number of items to scroll per page-up/page-down action.
pub(crate) const PAGE_SIZE: usize = 10;

/// How long the input thread waits for a key before emitting a tick.
pub(crate) const TICK_RATE: Duration = Duration::from_millis(250);

/// How long informational status messages stay visible.
pub(crate) const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Width of the groups panel as a percentage of the screen.
pub(crate) const GROUPS_PANEL_PERCENT: u16 = 28;

/// Width of the results panel as a percentage of the screen.
pub(crate) const RESULTS_PANEL_PERCENT: u16 = 32;

/// Height of the brand selector when a brand list is loaded.
pub(crate) const BRANDS_PANEL_HEIGHT: u16 = 8;
