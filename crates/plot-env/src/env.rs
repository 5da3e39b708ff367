// File: crates/plot-env/src/env.rs
// Summary: Immutable plot environment snapshot and the reducer deriving one snapshot from the next.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::action::{LayerKey, PlotAction};
use crate::aesthetics::{AestheticMapping, FILL, X_AESTHETICS, Y_AESTHETICS};
use crate::layout::{compute_layout, domain};
use crate::scale::{LinearScale, OrdinalScale};
use crate::table::Table;
use crate::theme::Theme;
use crate::types::{Extent, LayoutConfig, Margins};

/// Scales owned by a single layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerScales {
    pub fill: Option<OrdinalScale>,
}

/// One visual unit's binding of a table to aesthetics.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// `None` reads the environment's default table.
    pub table: Option<Arc<Table>>,
    pub aesthetics: AestheticMapping,
    pub scales: LayerScales,
}

impl Layer {
    pub fn new(table: Option<Arc<Table>>, aesthetics: AestheticMapping) -> Self {
        Self { table, aesthetics, scales: LayerScales::default() }
    }
}

/// Default x/y scales shared by every layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotScales {
    pub x: Option<LinearScale>,
    pub y: Option<LinearScale>,
}

/// Complete plot state at one point in time.
///
/// Domains, ticks, margins, inner size and scales are derived from the default
/// table, the layers and the outer size alone; every transition rebuilds them.
/// A snapshot is never modified once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotEnv {
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    /// Table read by the default layer and by every layer registered without one.
    pub table: Arc<Table>,
    /// Default layer; its aesthetics bind columns of `table`.
    pub defaults: Layer,
    pub layers: BTreeMap<LayerKey, Layer>,
    pub x_domain: Option<Extent>,
    pub y_domain: Option<Extent>,
    pub x_ticks: Vec<String>,
    pub y_ticks: Vec<String>,
    pub margins: Margins,
    pub scales: PlotScales,
    pub config: LayoutConfig,
    pub theme: Theme,
}

impl Default for PlotEnv {
    fn default() -> Self {
        Self::new(Table::new(), 0.0, 0.0, AestheticMapping::new())
    }
}

impl PlotEnv {
    /// Initial snapshot over `table` with the default layout config and theme.
    pub fn new(table: impl Into<Arc<Table>>, width: f64, height: f64, aesthetics: AestheticMapping) -> Self {
        Self::with_config(table, width, height, aesthetics, LayoutConfig::default(), Theme::default())
    }

    pub fn with_config(
        table: impl Into<Arc<Table>>,
        width: f64,
        height: f64,
        aesthetics: AestheticMapping,
        config: LayoutConfig,
        theme: Theme,
    ) -> Self {
        let mut env = Self {
            width: sanitize_size(width),
            height: sanitize_size(height),
            inner_width: 0.0,
            inner_height: 0.0,
            table: table.into(),
            defaults: Layer::new(None, aesthetics),
            layers: BTreeMap::new(),
            x_domain: None,
            y_domain: None,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            margins: Margins::uniform(config.plot_padding),
            scales: PlotScales::default(),
            config,
            theme,
        };
        env.defaults.scales.fill = env.fill_scale(&env.defaults);
        env.derive_domains();
        env.derive_layout();
        env
    }

    /// Table a layer actually reads.
    pub fn layer_table<'a>(&'a self, layer: &'a Layer) -> &'a Table {
        layer.table.as_deref().unwrap_or(&self.table)
    }

    pub fn layer(&self, key: &LayerKey) -> Option<&Layer> {
        self.layers.get(key)
    }

    /// Next snapshot after `action`. Never fails: degenerate input resolves to
    /// empty domains, no ticks and minimal margins.
    pub fn reduce(&self, action: PlotAction) -> PlotEnv {
        debug!(action = action.kind(), layers = self.layers.len(), "reducing plot action");
        let mut next = self.clone();
        match action {
            PlotAction::RegisterLayer { layer_key, table, aesthetics } => {
                let mut layer = Layer::new(table, aesthetics);
                layer.scales.fill = next.fill_scale(&layer);
                if next.layers.insert(layer_key.clone(), layer).is_some() {
                    debug!(%layer_key, "layer key re-registered, replacing previous layer");
                }
                next.derive_domains();
                next.derive_layout();
            }
            PlotAction::UnregisterLayer { layer_key } => {
                next.layers.remove(&layer_key);
                next.derive_domains();
                next.derive_layout();
            }
            PlotAction::SetDimensions { width, height } => {
                next.width = sanitize_size(width);
                next.height = sanitize_size(height);
                next.derive_layout();
            }
            PlotAction::SetTable { table } => {
                next.table = table;
                next.refresh_default_fill_scales();
                next.derive_domains();
                next.derive_layout();
            }
        }
        next
    }

    fn bindings(&self) -> impl Iterator<Item = (&Table, &AestheticMapping)> {
        std::iter::once(&self.defaults)
            .chain(self.layers.values())
            .map(move |layer| (self.layer_table(layer), &layer.aesthetics))
    }

    fn derive_domains(&mut self) {
        self.x_domain = domain(self.bindings(), &X_AESTHETICS);
        self.y_domain = domain(self.bindings(), &Y_AESTHETICS);
    }

    fn derive_layout(&mut self) {
        let layout = compute_layout(self.width, self.height, self.x_domain, self.y_domain, &self.config);
        self.x_ticks = layout.x_ticks;
        self.y_ticks = layout.y_ticks;
        self.margins = layout.margins;
        self.inner_width = layout.inner_width;
        self.inner_height = layout.inner_height;
        self.scales = PlotScales { x: layout.x_scale, y: layout.y_scale };
    }

    /// Categorical fill scale for `layer`, if it maps `fill` to an existing column.
    fn fill_scale(&self, layer: &Layer) -> Option<OrdinalScale> {
        let table = self.layer_table(layer);
        match layer.aesthetics.resolve(FILL, table) {
            Ok(Some(column)) => {
                let domain = column.distinct();
                let range = self.theme.fill_ramp(domain.len());
                Some(OrdinalScale::new(domain, range))
            }
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "layer fill scale unavailable");
                None
            }
        }
    }

    /// Layers reading the default table see a new table after `SetTable`.
    fn refresh_default_fill_scales(&mut self) {
        self.defaults.scales.fill = self.fill_scale(&self.defaults);
        let stale: Vec<LayerKey> = self
            .layers
            .iter()
            .filter(|(_, layer)| layer.table.is_none())
            .map(|(key, _)| key.clone())
            .collect();
        for key in stale {
            let fill = self.layers.get(&key).and_then(|layer| self.fill_scale(layer));
            if let Some(layer) = self.layers.get_mut(&key) {
                layer.scales.fill = fill;
            }
        }
    }
}

/// Free-function form of [`PlotEnv::reduce`].
pub fn reducer(state: &PlotEnv, action: PlotAction) -> PlotEnv {
    state.reduce(action)
}

fn sanitize_size(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
