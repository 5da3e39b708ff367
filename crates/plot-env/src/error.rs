// File: crates/plot-env/src/error.rs
// Summary: Error taxonomy for binning, table construction and ingestion.

use thiserror::Error;

use crate::table::ColumnType;

#[derive(Debug, Error)]
pub enum PlotError {
    /// Misuse at configuration time: wrong column type or a bad bin count.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing aesthetic \"{aesthetic}\": table has no column \"{column}\"")]
    MissingAesthetic { aesthetic: String, column: String },

    #[error("column \"{column}\" has {actual} rows, table has {expected}")]
    LengthMismatch { column: String, expected: usize, actual: usize },

    #[error("encountered unknown column data type \"{0}\"")]
    UnknownDataType(String),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

impl PlotError {
    pub(crate) fn unsupported_type(role: &str, column_type: ColumnType) -> Self {
        Self::InvalidInput(format!("unsupported {role} column type \"{column_type}\""))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_missing_aesthetic(&self) -> bool {
        matches!(self, Self::MissingAesthetic { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
