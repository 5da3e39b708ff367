// File: crates/plot-env/src/stats.rs
// Summary: Histogram binning transform (equal-width bins, grouping, stacked/overlaid positions).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aesthetics::{AestheticMapping, FILL, X_MAX, X_MIN, Y_MAX, Y_MIN};
use crate::error::{PlotError, Result};
use crate::table::{Category, Column, ColumnType, Table};
use crate::types::Extent;

/// Name of the synthetic group column in a grouped histogram table.
pub const GROUP: &str = "group";

/// Largest explicit bin count accepted by [`bin`].
pub const MAX_BINS: usize = 10_000;

/// How per-group bars share a bin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinPosition {
    /// Groups sit on top of each other in first-occurrence order.
    #[default]
    Stacked,
    /// Every group starts at zero.
    Overlaid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinOptions {
    /// Explicit bin count in `1..=MAX_BINS`; `None` derives one with Sturges' rule.
    pub bin_count: Option<usize>,
    pub position: BinPosition,
}

impl BinOptions {
    pub fn bins(mut self, count: usize) -> Self {
        self.bin_count = Some(count);
        self
    }

    pub fn position(mut self, position: BinPosition) -> Self {
        self.position = position;
        self
    }
}

/// Sturges' rule: `ceil(log2(n)) + 1`, at least one bin.
pub fn sturges(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width half-open intervals over `[d0, d1]`; the last one is closed at `d1`.
struct Bins {
    lower: Vec<f64>,
    upper: Vec<f64>,
    d0: f64,
    width: f64,
}

impl Bins {
    fn new(extent: Extent, count: usize) -> Self {
        let width = extent.span() / count as f64;
        let lower: Vec<f64> = (0..count).map(|i| extent.min + width * i as f64).collect();
        let mut upper: Vec<f64> = lower.iter().skip(1).copied().collect();
        upper.push(extent.max);
        Self { lower, upper, d0: extent.min, width }
    }

    fn len(&self) -> usize {
        self.lower.len()
    }

    /// Bin holding `v`, decided by the stored edges so that a value on an
    /// interior boundary lands in the bin it opens.
    fn index_of(&self, v: f64) -> usize {
        let last = self.len() - 1;
        let mut i = if self.width > 0.0 {
            (((v - self.d0) / self.width).floor().max(0.0) as usize).min(last)
        } else {
            last
        };
        while i > 0 && v < self.lower[i] {
            i -= 1;
        }
        while i < last && v >= self.upper[i] {
            i += 1;
        }
        i
    }
}

/// Bin `values` into a geometry table of `xMin, xMax, yMin, yMax` (plus `group`
/// when `groups` is given) and the mapping that binds those columns.
///
/// Null and NaN cells are skipped. An empty (or all-null) column yields an
/// empty table. The input columns are never modified.
pub fn bin(
    values: &Column,
    groups: Option<&Column>,
    options: &BinOptions,
) -> Result<(Table, AestheticMapping)> {
    let value_type = values.column_type();
    if !value_type.is_continuous() {
        return Err(PlotError::unsupported_type("value", value_type));
    }
    match options.bin_count {
        Some(0) => return Err(PlotError::InvalidInput("bin count must be positive".to_string())),
        Some(n) if n > MAX_BINS => {
            return Err(PlotError::InvalidInput(format!("bin count {n} exceeds the maximum of {MAX_BINS}")))
        }
        _ => {}
    }
    if let Some(g) = groups {
        if !matches!(g.column_type(), ColumnType::Categorical | ColumnType::Boolean) {
            return Err(PlotError::unsupported_type("grouping", g.column_type()));
        }
        if g.len() != values.len() {
            return Err(PlotError::InvalidInput(format!(
                "grouping column has {} rows, value column has {}",
                g.len(),
                values.len()
            )));
        }
    }

    let mut aesthetics = AestheticMapping::new()
        .with(X_MIN, X_MIN)
        .with(X_MAX, X_MAX)
        .with(Y_MIN, Y_MIN)
        .with(Y_MAX, Y_MAX);
    if groups.is_some() {
        aesthetics.set(FILL, GROUP);
    }

    // Group keys in first-occurrence order; a single implicit group when ungrouped.
    let keys: IndexSet<Category> = match groups {
        Some(g) => (0..g.len()).map(|i| g.category(i)).collect(),
        None => IndexSet::from([Category::Null]),
    };

    let cells = values.as_numbers().unwrap_or(&[]);
    let rows: Vec<(usize, f64)> = cells
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| x.is_finite()).map(|x| (i, x)))
        .collect();

    let Some(extent) = Extent::of(rows.iter().map(|&(_, v)| v)) else {
        debug!("binning an empty column");
        let table = geometry_table(value_type, groups.map(Column::column_type), Vec::new())?;
        return Ok((table, aesthetics));
    };

    let count = options.bin_count.unwrap_or_else(|| sturges(rows.len()));
    let bins = Bins::new(extent, count);

    // counts[group][bin]
    let mut counts = vec![vec![0u64; bins.len()]; keys.len()];
    for &(row, v) in &rows {
        let gi = match groups {
            Some(g) => keys.get_index_of(&g.category(row)).unwrap_or(0),
            None => 0,
        };
        counts[gi][bins.index_of(v)] += 1;
    }

    let mut out = Vec::with_capacity(keys.len() * bins.len());
    for (gi, key) in keys.iter().enumerate() {
        for b in 0..bins.len() {
            let y_min = match options.position {
                BinPosition::Overlaid => 0,
                BinPosition::Stacked => counts[..gi].iter().map(|c| c[b]).sum::<u64>(),
            };
            out.push(BarRow {
                x_min: bins.lower[b],
                x_max: bins.upper[b],
                y_min: y_min as f64,
                y_max: (y_min + counts[gi][b]) as f64,
                group: key.clone(),
            });
        }
    }

    debug!(
        bins = bins.len(),
        groups = keys.len(),
        values = rows.len(),
        position = ?options.position,
        "binned column"
    );

    let table = geometry_table(value_type, groups.map(Column::column_type), out)?;
    Ok((table, aesthetics))
}

struct BarRow {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    group: Category,
}

fn geometry_table(
    x_type: ColumnType,
    group_type: Option<ColumnType>,
    rows: Vec<BarRow>,
) -> Result<Table> {
    let edge = |f: fn(&BarRow) -> f64| -> Column {
        let cells = rows.iter().map(|r| Some(f(r))).collect();
        match x_type {
            ColumnType::Temporal => Column::Temporal(cells),
            _ => Column::Numeric(cells),
        }
    };
    let mut table = Table::new()
        .with_column(X_MIN, edge(|r| r.x_min))?
        .with_column(X_MAX, edge(|r| r.x_max))?
        .with_column(Y_MIN, Column::Numeric(rows.iter().map(|r| Some(r.y_min)).collect()))?
        .with_column(Y_MAX, Column::Numeric(rows.iter().map(|r| Some(r.y_max)).collect()))?;

    if let Some(group_type) = group_type {
        let column = match group_type {
            ColumnType::Boolean => Column::Boolean(
                rows.iter()
                    .map(|r| match r.group {
                        Category::Bool(b) => Some(b),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Column::Categorical(
                rows.iter()
                    .map(|r| match &r.group {
                        Category::Text(s) => Some(s.clone()),
                        Category::Bool(b) => Some(b.to_string()),
                        Category::Null => None,
                    })
                    .collect(),
            ),
        };
        table.insert(GROUP, column)?;
    }
    Ok(table)
}
