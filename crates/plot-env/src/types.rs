// File: crates/plot-env/src/types.rs
// Summary: Shared layout types and constants (paddings, tick label metrics, margins).

use serde::{Deserialize, Serialize};

/// Outer padding around the plot area, in pixels.
pub const PLOT_PADDING: f64 = 20.0;
/// Estimated width of one tick label character, in pixels.
pub const TICK_CHAR_WIDTH: f64 = 7.0;
/// Estimated height of a tick label line, in pixels.
pub const TICK_CHAR_HEIGHT: f64 = 10.0;
/// Gap between y tick labels and the plot area.
pub const TICK_PADDING_RIGHT: f64 = 8.0;
/// Gap between the plot area and x tick labels.
pub const TICK_PADDING_TOP: f64 = 5.0;
/// Fraction of the label-width-derived tick count actually used.
pub const TICK_DENSITY: f64 = 0.4;

/// Layout tuning parameters carried by every snapshot.
///
/// None of these are invariants; hosts may deserialize their own values and any
/// missing field falls back to the default constant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub plot_padding: f64,
    pub tick_char_width: f64,
    pub tick_char_height: f64,
    pub tick_padding_right: f64,
    pub tick_padding_top: f64,
    pub tick_density: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            plot_padding: PLOT_PADDING,
            tick_char_width: TICK_CHAR_WIDTH,
            tick_char_height: TICK_CHAR_HEIGHT,
            tick_padding_right: TICK_PADDING_RIGHT,
            tick_padding_top: TICK_PADDING_TOP,
            tick_density: TICK_DENSITY,
        }
    }
}

/// Screen margins around the inner plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
    /// Same padding on every side.
    pub const fn uniform(padding: f64) -> Self {
        Self::new(padding, padding, padding, padding)
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(PLOT_PADDING)
    }
}

/// Closed data-space interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extent of the finite values yielded by `values`, or `None` when there are none.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(e) => Some(Self::new(e.min.min(v), e.max.max(v))),
        })
    }

    /// Smallest extent covering both.
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn span(&self) -> f64 { self.max - self.min }
}
