//! Shell layout and timing configuration.

use serde::{Deserialize, Serialize};

use crate::model::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Percent/pixel footprint a maximized window occupies.
pub struct MaximizeFootprint {
    /// Left edge as a percent of viewport width.
    pub left_pct: i32,
    /// Top edge in pixels (below the menu bar).
    pub top_px: i32,
    /// Width as a percent of viewport width.
    pub width_pct: i32,
    /// Height as a percent of viewport height.
    pub height_pct: i32,
}

impl Default for MaximizeFootprint {
    fn default() -> Self {
        Self {
            left_pct: 5,
            top_px: 50,
            width_pct: 90,
            height_pct: 85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Layout constants and timings for the desktop shell.
///
/// Every field has a default, so a partial JSON object deserializes into a full config.
pub struct ShellConfig {
    /// Smallest allowed window top (height of the fixed menu bar).
    pub min_window_top: i32,
    /// Space kept free above the bottom edge for the dock.
    pub reserved_bottom: i32,
    /// First value handed out by the window stacking counter.
    pub stack_base: u32,
    /// Footprint of maximized windows.
    pub maximize: MaximizeFootprint,
    /// Viewport assumed until the shell reports the real one.
    pub initial_viewport: Viewport,
    /// How long a toast stays fully visible.
    pub toast_visible_ms: i64,
    /// Length of the toast exit animation.
    pub toast_exit_ms: i64,
    /// Number of countdowns listed under the calendar.
    pub upcoming_events_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            min_window_top: 28,
            reserved_bottom: 100,
            stack_base: 100,
            maximize: MaximizeFootprint::default(),
            initial_viewport: Viewport {
                width: 1440,
                height: 900,
            },
            toast_visible_ms: 2_500,
            toast_exit_ms: 300,
            upcoming_events_limit: 5,
        }
    }
}
