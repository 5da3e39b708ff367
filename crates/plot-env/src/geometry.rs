// File: crates/plot-env/src/geometry.rs
// Summary: Pixel-space geometry of a layer, resolved through the snapshot's default scales.

use crate::action::LayerKey;
use crate::aesthetics::{FILL, X, X_MAX, X_MIN, Y, Y_MAX, Y_MIN};
use crate::env::{Layer, PlotEnv};
use crate::table::{Column, Table};

/// Axis-aligned rectangle in inner-plot pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }
    /// Normalized so that `left <= right` and `top <= bottom`.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_ltrb(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}

/// What a renderer needs for one layer: bars from interval aesthetics
/// (`xMin/xMax/yMin/yMax`), points from `x/y`, and the fill color of each.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerGeometry {
    pub rects: Vec<Rect>,
    pub rect_fills: Vec<Option<String>>,
    pub points: Vec<(f64, f64)>,
    pub point_fills: Vec<Option<String>>,
}

impl LayerGeometry {
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.points.is_empty()
    }
}

impl PlotEnv {
    /// Pixel geometry for the layer at `key`; `None` when no such layer exists.
    ///
    /// Missing aesthetics, a binding to a missing column or an undefined domain
    /// give empty arrays rather than an error. Rows with a null coordinate are skipped.
    pub fn layer_geometry(&self, key: &LayerKey) -> Option<LayerGeometry> {
        let layer = self.layer(key)?;
        Some(self.geometry_of(layer))
    }

    /// Pixel geometry of the default layer.
    pub fn default_geometry(&self) -> LayerGeometry {
        self.geometry_of(&self.defaults)
    }

    fn geometry_of(&self, layer: &Layer) -> LayerGeometry {
        let (Some(xs), Some(ys)) = (self.scales.x, self.scales.y) else {
            return LayerGeometry::default();
        };
        let table = self.layer_table(layer);
        if layer.aesthetics.validate(table).is_err() {
            return LayerGeometry::default();
        }
        let col = |aesthetic| column(layer, table, aesthetic);
        let fill_column = col(FILL);
        let fill_at = |row: usize| {
            let scale = layer.scales.fill.as_ref()?;
            scale.map(&fill_column?.category(row)).map(str::to_string)
        };

        let mut out = LayerGeometry::default();
        if let (Some(x0), Some(x1), Some(y0), Some(y1)) = (col(X_MIN), col(X_MAX), col(Y_MIN), col(Y_MAX)) {
            for row in 0..table.len() {
                let Some([a, b, c, d]) = cells(row, [x0, x1, y0, y1]) else { continue };
                out.rects.push(Rect::from_corners(xs.map(a), ys.map(c), xs.map(b), ys.map(d)));
                out.rect_fills.push(fill_at(row));
            }
        }
        if let (Some(x), Some(y)) = (col(X), col(Y)) {
            for row in 0..table.len() {
                let Some([a, b]) = cells(row, [x, y]) else { continue };
                out.points.push((xs.map(a), ys.map(b)));
                out.point_fills.push(fill_at(row));
            }
        }
        out
    }
}

/// Column bound to `aesthetic`, or `None` when unmapped or missing from `table`.
fn column<'t>(layer: &Layer, table: &'t Table, aesthetic: &str) -> Option<&'t Column> {
    layer.aesthetics.resolve(aesthetic, table).ok().flatten()
}

fn cells<const N: usize>(row: usize, columns: [&Column; N]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, column) in out.iter_mut().zip(columns) {
        *slot = column.as_numbers()?.get(row).copied().flatten().filter(|v| v.is_finite())?;
    }
    Some(out)
}
