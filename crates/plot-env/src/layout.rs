// File: crates/plot-env/src/layout.rs
// Summary: Domain extents, tick labels, margins, inner size and default x/y scales.

use tracing::warn;

use crate::aesthetics::AestheticMapping;
use crate::scale::LinearScale;
use crate::table::Table;
use crate::ticks::tick_labels;
use crate::types::{Extent, LayoutConfig, Margins};

/// Extent over every column bound to one of `aesthetics` in any of `bindings`.
///
/// Unmapped aesthetics contribute nothing. A binding that names any missing
/// column is not rendered, so it is logged and contributes nothing at all.
/// No contributing values gives `None`.
pub fn domain<'a, I>(bindings: I, aesthetics: &[&str]) -> Option<Extent>
where
    I: IntoIterator<Item = (&'a Table, &'a AestheticMapping)>,
{
    let mut out: Option<Extent> = None;
    for (table, mapping) in bindings {
        if let Err(err) = mapping.validate(table) {
            warn!(%err, "skipping binding while computing domain");
            continue;
        }
        for aesthetic in aesthetics {
            let Ok(Some(column)) = mapping.resolve(aesthetic, table) else {
                continue;
            };
            if let Some(e) = column.extent() {
                out = Some(out.map_or(e, |acc| acc.union(e)));
            }
        }
    }
    out
}

/// Everything that depends on the outer size and the domains.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub x_ticks: Vec<String>,
    pub y_ticks: Vec<String>,
    pub margins: Margins,
    pub inner_width: f64,
    pub inner_height: f64,
    pub x_scale: Option<LinearScale>,
    pub y_scale: Option<LinearScale>,
}

/// Margins for a set of y tick labels.
///
/// Left room grows with the longest label; with no labels only the paddings remain.
pub fn margins(y_ticks: &[String], config: &LayoutConfig) -> Margins {
    let longest = y_ticks.iter().map(|t| t.chars().count()).max().unwrap_or(0);
    let y_tick_width = longest as f64 * config.tick_char_width;
    Margins {
        top: config.plot_padding,
        right: config.plot_padding,
        bottom: config.tick_char_height + config.tick_padding_top + config.plot_padding,
        left: y_tick_width + config.tick_padding_right + config.plot_padding,
    }
}

pub fn compute_layout(
    width: f64,
    height: f64,
    x_domain: Option<Extent>,
    y_domain: Option<Extent>,
    config: &LayoutConfig,
) -> Layout {
    let x_ticks = tick_labels(x_domain, width, config);
    let y_ticks = tick_labels(y_domain, height, config);
    let margins = margins(&y_ticks, config);

    let inner_width = (width - margins.hsum()).max(0.0);
    let inner_height = (height - margins.vsum()).max(0.0);

    Layout {
        x_scale: x_domain.map(|d| LinearScale::new(d, (0.0, inner_width))),
        y_scale: y_domain.map(|d| LinearScale::new(d, (inner_height, 0.0))),
        x_ticks,
        y_ticks,
        margins,
        inner_width,
        inner_height,
    }
}
