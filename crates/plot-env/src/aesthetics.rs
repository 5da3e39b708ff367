// File: crates/plot-env/src/aesthetics.rs
// Summary: Aesthetic name -> column name mapping with eager validation against a table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::table::{Column, Table};

pub const X: &str = "x";
pub const Y: &str = "y";
pub const X_MIN: &str = "xMin";
pub const X_MAX: &str = "xMax";
pub const Y_MIN: &str = "yMin";
pub const Y_MAX: &str = "yMax";
pub const FILL: &str = "fill";

/// Aesthetics that contribute to the x domain.
pub const X_AESTHETICS: [&str; 3] = [X, X_MIN, X_MAX];
/// Aesthetics that contribute to the y domain.
pub const Y_AESTHETICS: [&str; 3] = [Y, Y_MIN, Y_MAX];

/// Binds abstract aesthetics (x, fill, ...) to concrete column names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AestheticMapping(IndexMap<String, String>);

impl AestheticMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: bind `aesthetic` to `column`.
    pub fn with(mut self, aesthetic: impl Into<String>, column: impl Into<String>) -> Self {
        self.set(aesthetic, column);
        self
    }

    pub fn set(&mut self, aesthetic: impl Into<String>, column: impl Into<String>) {
        self.0.insert(aesthetic.into(), column.into());
    }

    pub fn get(&self, aesthetic: &str) -> Option<&str> {
        self.0.get(aesthetic).map(String::as_str)
    }

    pub fn contains(&self, aesthetic: &str) -> bool {
        self.0.contains_key(aesthetic)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails on the first aesthetic whose column is absent from `table`.
    pub fn validate(&self, table: &Table) -> Result<()> {
        match self.iter().find(|(_, column)| !table.contains(column)) {
            Some((aesthetic, column)) => Err(PlotError::MissingAesthetic {
                aesthetic: aesthetic.to_string(),
                column: column.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Column bound to `aesthetic` in `table`.
    ///
    /// `Ok(None)` when the aesthetic is unmapped; `MissingAesthetic` when it is
    /// mapped to a column the table does not have.
    pub fn resolve<'t>(&self, aesthetic: &str, table: &'t Table) -> Result<Option<&'t Column>> {
        let Some(column) = self.get(aesthetic) else {
            return Ok(None);
        };
        table.column(column).map(Some).ok_or_else(|| PlotError::MissingAesthetic {
            aesthetic: aesthetic.to_string(),
            column: column.to_string(),
        })
    }
}

impl<A: Into<String>, C: Into<String>> FromIterator<(A, C)> for AestheticMapping {
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(a, c)| (a.into(), c.into())).collect())
    }
}
