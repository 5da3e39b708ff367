// File: crates/plot-env/src/scale.rs
// Summary: Linear (data -> pixel) and ordinal (category -> color) scales derived by the reducer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Category;
use crate::types::Extent;

/// Continuous scale mapping a data domain onto a pixel range.
///
/// The range may be inverted (`start > end`), which is how the y axis renders
/// increasing values upward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: Extent,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Extent, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Data value to pixel. A zero-width domain maps everything to the range midpoint.
    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (r0, r1) = self.range;
        let span = self.domain.span();
        if span == 0.0 {
            return r0 + (r1 - r0) * 0.5;
        }
        r0 + (v - self.domain.min) / span * (r1 - r0)
    }

    /// Pixel back to data value.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        let width = r1 - r0;
        if width == 0.0 {
            return self.domain.min;
        }
        self.domain.min + (px - r0) / width * self.domain.span()
    }
}

/// Discrete scale mapping each domain category to one color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdinalScale {
    #[serde(with = "indexmap::map::serde_seq")]
    entries: IndexMap<Category, String>,
}

impl OrdinalScale {
    /// Pair `domain` with `range` position by position; surplus entries on either side are dropped.
    pub fn new(domain: Vec<Category>, range: Vec<String>) -> Self {
        Self { entries: domain.into_iter().zip(range).collect() }
    }

    /// Color for `value`; values outside the domain map to nothing.
    pub fn map(&self, value: &Category) -> Option<&str> {
        self.entries.get(value).map(String::as_str)
    }

    pub fn domain(&self) -> impl Iterator<Item = &Category> {
        self.entries.keys()
    }

    pub fn range(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn inverted_range_roundtrip() {
        let s = LinearScale::new(Extent::new(0.0, 10.0), (200.0, 0.0));
        assert_approx_eq!(f64, s.map(0.0), 200.0);
        assert_approx_eq!(f64, s.map(10.0), 0.0);
        assert_approx_eq!(f64, s.map(2.5), 150.0);
        assert_approx_eq!(f64, s.invert(150.0), 2.5);
    }

    #[test]
    fn point_domain_maps_to_midpoint() {
        let s = LinearScale::new(Extent::new(4.0, 4.0), (0.0, 100.0));
        assert_approx_eq!(f64, s.map(4.0), 50.0);
        assert_approx_eq!(f64, s.map(-7.0), 50.0);
    }

    #[test]
    fn ordinal_unknown_is_none() {
        let s = OrdinalScale::new(vec!["a".into(), "b".into()], vec!["#000000".into(), "#ffffff".into()]);
        assert_eq!(s.map(&"b".into()), Some("#ffffff"));
        assert_eq!(s.map(&"c".into()), None);
        assert_eq!(s.len(), 2);
    }
}
