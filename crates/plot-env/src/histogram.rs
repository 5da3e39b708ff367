// File: crates/plot-env/src/histogram.rs
// Summary: Builds a histogram layer registration from columns of the snapshot's default table.

use serde::{Deserialize, Serialize};

use crate::action::{LayerKey, PlotAction};
use crate::aesthetics::{FILL, X};
use crate::env::PlotEnv;
use crate::error::{PlotError, Result};
use crate::stats::{bin, BinOptions};

/// Which default-table columns a histogram bins, and how.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramSpec {
    /// Value column; falls back to the default layer's `x` aesthetic.
    pub x: Option<String>,
    /// Grouping column; falls back to the default layer's `fill` aesthetic.
    pub fill: Option<String>,
    #[serde(flatten)]
    pub options: BinOptions,
}

impl HistogramSpec {
    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    pub fn fill(mut self, column: impl Into<String>) -> Self {
        self.fill = Some(column.into());
        self
    }

    pub fn options(mut self, options: BinOptions) -> Self {
        self.options = options;
        self
    }
}

/// Bin the default table of `env` and wrap the result in a `RegisterLayer` action.
///
/// A missing `x` aesthetic or an unknown column is `MissingAesthetic`; an
/// unsuitable column type or bin count is `InvalidInput`.
pub fn histogram_layer(env: &PlotEnv, layer_key: impl Into<LayerKey>, spec: &HistogramSpec) -> Result<PlotAction> {
    let defaults = &env.defaults.aesthetics;
    let x = spec
        .x
        .as_deref()
        .or_else(|| defaults.get(X))
        .ok_or_else(|| PlotError::MissingAesthetic { aesthetic: X.to_string(), column: String::new() })?;
    let fill = spec.fill.as_deref().or_else(|| defaults.get(FILL));

    let table = &env.table;
    let values = table.column(x).ok_or_else(|| missing(X, x))?;
    let groups = match fill {
        Some(name) => Some(table.column(name).ok_or_else(|| missing(FILL, name))?),
        None => None,
    };

    let (stat_table, aesthetics) = bin(values, groups, &spec.options)?;
    PlotAction::register_layer(layer_key, stat_table, aesthetics)
}

fn missing(aesthetic: &str, column: &str) -> PlotError {
    PlotError::MissingAesthetic { aesthetic: aesthetic.to_string(), column: column.to_string() }
}
