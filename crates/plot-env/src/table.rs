// File: crates/plot-env/src/table.rs
// Summary: Column-oriented table model with typed columns and an equal-length invariant.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::types::Extent;

/// Declared type of a column; governs binning eligibility and scale kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "categorical")]
    Categorical,
    #[serde(rename = "temporal")]
    Temporal,
    #[serde(rename = "bool")]
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Temporal => "temporal",
            ColumnType::Boolean => "bool",
        }
    }

    /// Numeric and temporal columns live on a continuous axis.
    pub fn is_continuous(&self) -> bool {
        matches!(self, ColumnType::Numeric | ColumnType::Temporal)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete value used as a group key and as a categorical scale domain entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Bool(bool),
    Text(String),
    Null,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Bool(b) => write!(f, "{b}"),
            Category::Text(s) => f.write_str(s),
            Category::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

impl From<bool> for Category {
    fn from(b: bool) -> Self {
        Category::Bool(b)
    }
}

/// A fixed-length sequence of values of one declared type. `None` is a null cell.
/// Temporal values are milliseconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum Column {
    #[serde(rename = "numeric")]
    Numeric(Vec<Option<f64>>),
    #[serde(rename = "temporal")]
    Temporal(Vec<Option<f64>>),
    #[serde(rename = "categorical")]
    Categorical(Vec<Option<String>>),
    #[serde(rename = "bool")]
    Boolean(Vec<Option<bool>>),
}

impl Column {
    pub fn numeric<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Column::Numeric(values.into_iter().map(Some).collect())
    }

    pub fn temporal<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Column::Temporal(values.into_iter().map(Some).collect())
    }

    pub fn categorical<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Column::Categorical(values.into_iter().map(|s| Some(s.into())).collect())
    }

    pub fn boolean<I: IntoIterator<Item = bool>>(values: I) -> Self {
        Column::Boolean(values.into_iter().map(Some).collect())
    }

    /// Column of `len` null cells.
    pub fn nulls(column_type: ColumnType, len: usize) -> Self {
        match column_type {
            ColumnType::Numeric => Column::Numeric(vec![None; len]),
            ColumnType::Temporal => Column::Temporal(vec![None; len]),
            ColumnType::Categorical => Column::Categorical(vec![None; len]),
            ColumnType::Boolean => Column::Boolean(vec![None; len]),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Numeric(_) => ColumnType::Numeric,
            Column::Temporal(_) => ColumnType::Temporal,
            Column::Categorical(_) => ColumnType::Categorical,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) | Column::Temporal(v) => v.len(),
            Column::Categorical(v) => v.len(),
            Column::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw cells of a numeric or temporal column.
    pub fn as_numbers(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(v) | Column::Temporal(v) => Some(v),
            _ => None,
        }
    }

    /// Finite numbers of a continuous column; nulls and NaN are skipped.
    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_numbers()
            .unwrap_or(&[])
            .iter()
            .filter_map(|v| v.filter(|x| x.is_finite()))
    }

    /// `[min, max]` of the finite values, `None` for discrete or all-null columns.
    pub fn extent(&self) -> Option<Extent> {
        Extent::of(self.finite_values())
    }

    /// Cell `i` as a discrete value. Numbers are rendered as their label text.
    pub fn category(&self, i: usize) -> Category {
        match self {
            Column::Numeric(v) | Column::Temporal(v) => match v.get(i).copied().flatten() {
                Some(x) => Category::Text(crate::ticks::format_number(x)),
                None => Category::Null,
            },
            Column::Categorical(v) => match v.get(i) {
                Some(Some(s)) => Category::Text(s.clone()),
                _ => Category::Null,
            },
            Column::Boolean(v) => match v.get(i).copied().flatten() {
                Some(b) => Category::Bool(b),
                None => Category::Null,
            },
        }
    }

    /// Distinct values in first-occurrence order.
    pub fn distinct(&self) -> Vec<Category> {
        let set: IndexSet<Category> = (0..self.len()).map(|i| self.category(i)).collect();
        set.into_iter().collect()
    }

    /// Append every cell of `other`; a type mismatch appends nulls instead.
    pub(crate) fn extend_from(&mut self, other: &Column) {
        match (self, other) {
            (Column::Numeric(a), Column::Numeric(b)) | (Column::Temporal(a), Column::Temporal(b)) => {
                a.extend_from_slice(b)
            }
            (Column::Categorical(a), Column::Categorical(b)) => a.extend_from_slice(b),
            (Column::Boolean(a), Column::Boolean(b)) => a.extend_from_slice(b),
            (this, other) => this.pad_nulls(other.len()),
        }
    }

    pub(crate) fn pad_nulls(&mut self, n: usize) {
        match self {
            Column::Numeric(v) | Column::Temporal(v) => v.extend(std::iter::repeat(None).take(n)),
            Column::Categorical(v) => v.extend(std::iter::repeat(None).take(n)),
            Column::Boolean(v) => v.extend(std::iter::repeat(None).take(n)),
        }
    }
}

/// Named columns of equal length. The type of each column is carried by its
/// variant, so the name → type mapping always agrees with the data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, Column>", into = "IndexMap<String, Column>")]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Table::insert`].
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Insert or replace a column. Fails when its length differs from the table's.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        let others = self.columns.iter().find(|(n, _)| **n != name);
        if let Some((_, existing)) = others {
            if existing.len() != column.len() {
                return Err(PlotError::LengthMismatch {
                    column: name,
                    expected: existing.len(),
                    actual: column.len(),
                });
            }
        }
        self.columns.insert(name, column);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.get(name).map(Column::column_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn column_types(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c.column_type()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row count (zero for a table without columns).
    pub fn len(&self) -> usize {
        self.columns.values().next().map(Column::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn columns_mut(&mut self) -> &mut IndexMap<String, Column> {
        &mut self.columns
    }
}

impl TryFrom<IndexMap<String, Column>> for Table {
    type Error = PlotError;

    fn try_from(columns: IndexMap<String, Column>) -> Result<Self> {
        columns
            .into_iter()
            .try_fold(Table::new(), |table, (name, column)| table.with_column(name, column))
    }
}

impl From<Table> for IndexMap<String, Column> {
    fn from(table: Table) -> Self {
        table.columns
    }
}
