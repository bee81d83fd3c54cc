//! Layer data consumed by the graph builder.
//!
//! Layer data is keyed by map name and layer name. Each layer carries a lane
//! graph (`lane -> depth -> point id -> record`) plus background metadata that
//! the planner treats as opaque.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{fuzzy_matches, Error, Result};

/// Raw capture point record as it appears in layer data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub display_name: String,
    pub x: f64,
    pub y: f64,
}

/// Points at a single lane depth, keyed by point id.
pub type DepthEntries = BTreeMap<String, RawPoint>;

/// Depth entries of a single lane.
pub type LaneDepths = BTreeMap<u32, DepthEntries>;

/// Lane name to depth entries. Ordered so lanes are always visited in
/// lexical order.
pub type LaneGraph = BTreeMap<String, LaneDepths>;

/// A single playable layer of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub lanes: LaneGraph,
    /// Minimap and tile metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<serde_json::Value>,
}

/// Every map known to the planner with its layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaasData {
    maps: BTreeMap<String, BTreeMap<String, LayerData>>,
}

impl RaasData {
    /// Parse layer data from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON layer data file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::LayerDataRead {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&contents)?;
        tracing::debug!(
            "loaded layer data for {} maps from {}",
            data.maps.len(),
            path.display()
        );
        Ok(data)
    }

    /// Insert or replace a layer.
    pub fn insert_layer(
        &mut self,
        map: impl Into<String>,
        layer: impl Into<String>,
        data: LayerData,
    ) {
        self.maps
            .entry(map.into())
            .or_default()
            .insert(layer.into(), data);
    }

    /// Map names with their layer names, both in lexical order.
    pub fn maps(&self) -> Vec<(&str, Vec<&str>)> {
        self.maps
            .iter()
            .map(|(map, layers)| (map.as_str(), layers.keys().map(String::as_str).collect()))
            .collect()
    }

    /// Look up a layer, suggesting close names when either lookup misses.
    pub fn layer(&self, map: &str, layer: &str) -> Result<&LayerData> {
        let layers = self.maps.get(map).ok_or_else(|| Error::UnknownMap {
            name: map.to_string(),
            suggestions: fuzzy_matches(map, self.maps.keys().map(String::as_str), 3),
        })?;

        layers.get(layer).ok_or_else(|| Error::UnknownLayer {
            map: map.to_string(),
            name: layer.to_string(),
            suggestions: fuzzy_matches(layer, layers.keys().map(String::as_str), 3),
        })
    }
}
