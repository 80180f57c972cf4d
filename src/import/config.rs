use crate::error::NavError;
use crate::graph::TravelType;

/// Rounding finer than this is below f64 precision for degrees.
pub const MAX_SNAP_DECIMALS: u32 = 15;

/// Knobs for the GeoJSON importer. The defaults read OSM exports as
/// produced by `ogr2ogr`.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Property whose presence marks a line string as a walkable way
    pub way_tag: String,
    /// Property whose presence marks a point as a POI
    pub name_tag: String,
    /// Property holding the packed `key=>value` tag list of a POI
    pub other_tags_tag: String,
    pub travel_type: TravelType,
    /// Store ways as undirected connections
    pub bidirectional_ways: bool,
    /// Round coordinates to this many decimals before merging nodes.
    /// `None` merges only exactly equal coordinates.
    pub snap_decimals: Option<u32>,
}

impl ImportConfig {
    pub fn validate(&self) -> Result<(), NavError> {
        match self.snap_decimals {
            Some(d) if d > MAX_SNAP_DECIMALS => Err(NavError::InvalidConfig(format!(
                "snap_decimals must be at most {}, got {}",
                MAX_SNAP_DECIMALS, d
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            way_tag: "highway".to_string(),
            name_tag: "name".to_string(),
            other_tags_tag: "other_tags".to_string(),
            travel_type: TravelType::Walk,
            bidirectional_ways: true,
            snap_decimals: None,
        }
    }
}
