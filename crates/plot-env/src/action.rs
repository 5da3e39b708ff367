// File: crates/plot-env/src/action.rs
// Summary: The four plot actions (the only wire contract of the core) and layer keys.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aesthetics::AestheticMapping;
use crate::error::Result;
use crate::table::Table;

/// Opaque identity of one registered layer. Generation belongs to the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerKey(String);

impl LayerKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Fresh random (v4) UUID key; unique for all practical purposes across the process.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LayerKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One state transition request. Every variant deterministically turns one
/// snapshot into the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlotAction {
    #[serde(rename_all = "camelCase")]
    RegisterLayer {
        layer_key: LayerKey,
        /// `None` makes the layer read the default table.
        #[serde(default)]
        table: Option<Arc<Table>>,
        aesthetics: AestheticMapping,
    },
    #[serde(rename_all = "camelCase")]
    UnregisterLayer { layer_key: LayerKey },
    SetDimensions { width: f64, height: f64 },
    SetTable { table: Arc<Table> },
}

impl PlotAction {
    /// Register a layer over its own table, failing fast when an aesthetic
    /// names a column the table lacks.
    pub fn register_layer(
        layer_key: impl Into<LayerKey>,
        table: impl Into<Arc<Table>>,
        aesthetics: AestheticMapping,
    ) -> Result<Self> {
        let table = table.into();
        aesthetics.validate(&table)?;
        Ok(Self::RegisterLayer { layer_key: layer_key.into(), table: Some(table), aesthetics })
    }

    /// Register a layer that reads the default table. Validation happens when
    /// the snapshot is derived, since the default table may change later.
    pub fn register_default_layer(layer_key: impl Into<LayerKey>, aesthetics: AestheticMapping) -> Self {
        Self::RegisterLayer { layer_key: layer_key.into(), table: None, aesthetics }
    }

    pub fn unregister_layer(layer_key: impl Into<LayerKey>) -> Self {
        Self::UnregisterLayer { layer_key: layer_key.into() }
    }

    pub fn set_dimensions(width: f64, height: f64) -> Self {
        Self::SetDimensions { width, height }
    }

    pub fn set_table(table: impl Into<Arc<Table>>) -> Self {
        Self::SetTable { table: table.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RegisterLayer { .. } => "REGISTER_LAYER",
            Self::UnregisterLayer { .. } => "UNREGISTER_LAYER",
            Self::SetDimensions { .. } => "SET_DIMENSIONS",
            Self::SetTable { .. } => "SET_TABLE",
        }
    }
}
