// File: crates/plot-env/src/lib.rs
// Summary: Core library entry point; exports binning, the plot environment reducer and layout math.

pub mod action;
pub mod aesthetics;
pub mod env;
pub mod error;
pub mod geometry;
pub mod histogram;
pub mod ingest;
pub mod layout;
pub mod scale;
pub mod stats;
pub mod store;
pub mod table;
pub mod theme;
pub mod ticks;
pub mod types;

pub use action::{LayerKey, PlotAction};
pub use aesthetics::AestheticMapping;
pub use env::{reducer, Layer, LayerScales, PlotEnv, PlotScales};
pub use error::{PlotError, Result};
pub use geometry::{LayerGeometry, Rect};
pub use histogram::{histogram_layer, HistogramSpec};
pub use ingest::{parse_annotated_csv, to_table, Ingested, RawChunk, SchemaConflict};
pub use scale::{LinearScale, OrdinalScale};
pub use stats::{bin, BinOptions, BinPosition};
pub use store::PlotStore;
pub use table::{Category, Column, ColumnType, Table};
pub use theme::Theme;
pub use types::{Extent, LayoutConfig, Margins};
