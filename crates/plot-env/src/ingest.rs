// File: crates/plot-env/src/ingest.rs
// Summary: Query-result chunks (annotated CSV) -> canonical Table, recovering from schema conflicts.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::DateTime;
use indexmap::IndexMap;
use tracing::warn;

use crate::error::{PlotError, Result};
use crate::table::{Column, ColumnType, Table};

/// One result chunk: a header, its rows and the source data type of each column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawChunk {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub data_types: HashMap<String, String>,
}

/// A column seen with two different types across chunks. Values from the
/// conflicting chunk were discarded (nulled); ingestion carried on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaConflict {
    pub column: String,
}

impl fmt::Display for SchemaConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found conflicting types for column \"{}\" in response. Some values may be discarded.",
            self.column
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ingested {
    pub table: Table,
    pub conflicts: Vec<SchemaConflict>,
}

impl Ingested {
    /// Warning text for the host, if any column conflicted.
    pub fn schema_error_message(&self) -> Option<String> {
        self.conflicts.last().map(ToString::to_string)
    }
}

/// Map a source data type annotation onto a column type.
pub fn column_type_for(data_type: &str) -> Result<ColumnType> {
    match data_type {
        "boolean" => Ok(ColumnType::Boolean),
        "unsignedLong" | "long" | "double" => Ok(ColumnType::Numeric),
        "string" => Ok(ColumnType::Categorical),
        "dateTime:RFC3339" => Ok(ColumnType::Temporal),
        other => Err(PlotError::UnknownDataType(other.to_string())),
    }
}

fn is_ignored(name: &str) -> bool {
    name.is_empty() || name == "result"
}

/// Concatenate `chunks` into one table.
///
/// The first type seen for a column wins. A later chunk that disagrees
/// contributes nulls for that column and a [`SchemaConflict`] is recorded.
/// Columns absent from a chunk are null-padded for its rows.
pub fn to_table(chunks: &[RawChunk]) -> Result<Ingested> {
    let mut columns: IndexMap<String, Column> = IndexMap::new();
    let mut conflicts: Vec<SchemaConflict> = Vec::new();
    let mut total = 0usize;

    for chunk in chunks {
        if chunk.header.is_empty() {
            continue;
        }
        let n = chunk.rows.len();
        let mut seen = HashSet::new();

        for (j, name) in chunk.header.iter().enumerate() {
            if is_ignored(name) || !seen.insert(name.as_str()) {
                continue;
            }
            let data_type = chunk.data_types.get(name).map(String::as_str).unwrap_or_default();
            let column_type = column_type_for(data_type)?;
            let entry = columns
                .entry(name.clone())
                .or_insert_with(|| Column::nulls(column_type, total));

            if entry.column_type() != column_type {
                warn!(column = %name, expected = %entry.column_type(), found = %column_type, "conflicting column types");
                if !conflicts.iter().any(|c| c.column == *name) {
                    conflicts.push(SchemaConflict { column: name.clone() });
                }
                entry.pad_nulls(n);
                continue;
            }
            let cells = chunk.rows.iter().map(|row| row.get(j).map(String::as_str).unwrap_or(""));
            entry.extend_from(&parse_column(column_type, cells));
        }

        total += n;
        for column in columns.values_mut() {
            if column.len() < total {
                column.pad_nulls(total - column.len());
            }
        }
    }

    let mut table = Table::new();
    *table.columns_mut() = columns;
    Ok(Ingested { table, conflicts })
}

fn parse_column<'a, I: Iterator<Item = &'a str>>(column_type: ColumnType, cells: I) -> Column {
    match column_type {
        ColumnType::Numeric => Column::Numeric(cells.map(parse_number).collect()),
        ColumnType::Temporal => Column::Temporal(cells.map(parse_time).collect()),
        ColumnType::Categorical => Column::Categorical(
            cells.map(|s| if s == "null" { None } else { Some(s.to_string()) }).collect(),
        ),
        ColumnType::Boolean => Column::Boolean(
            cells
                .map(|s| match s {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                })
                .collect(),
        ),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    match s {
        "null" | "" => None,
        "NaN" => Some(f64::NAN),
        _ => s.trim().parse().ok(),
    }
}

/// RFC 3339 timestamp as epoch milliseconds.
fn parse_time(s: &str) -> Option<f64> {
    match s {
        "null" | "" => None,
        "NaN" => Some(f64::NAN),
        _ => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.timestamp_millis() as f64),
    }
}

/// Split an annotated CSV export into chunks.
///
/// Each chunk is a `#datatype` annotation row, a header row and data rows.
/// Blank lines or a fresh `#datatype` row start a new chunk; other `#`
/// annotation rows are ignored.
pub fn parse_annotated_csv(text: &str) -> Result<Vec<RawChunk>> {
    let mut chunks = Vec::new();
    for block in blocks(text) {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(block.as_bytes());

        let mut types: Vec<String> = Vec::new();
        let mut current: Option<RawChunk> = None;
        for record in reader.records() {
            let record = record?;
            let fields: Vec<String> = record.iter().map(str::to_string).collect();
            let first = fields.first().map(String::as_str).unwrap_or("");

            if first == "#datatype" {
                chunks.extend(current.take());
                types = fields;
                continue;
            }
            if first.starts_with('#') {
                continue;
            }
            match current.as_mut() {
                Some(chunk) => chunk.rows.push(fields),
                None => {
                    let data_types = fields
                        .iter()
                        .zip(types.iter())
                        .skip(1)
                        .map(|(name, ty)| (name.clone(), ty.clone()))
                        .collect();
                    current = Some(RawChunk { header: fields, rows: Vec::new(), data_types });
                }
            }
        }
        chunks.extend(current);
    }
    Ok(chunks)
}

/// Runs of non-blank lines.
fn blocks(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            continue;
        }
        cur.push_str(line);
        cur.push('\n');
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}
