//! Map storage: the collaborator that owns the persisted dataset.
//!
//! The graph core never writes incrementally. An import checks the store is
//! empty, builds the whole dataset in memory and hands it over in one
//! [`MapStore::replace_all`] call.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use geojson::GeoJson;
use log::{info, warn};

use crate::error::{Diagnostic, NavError};
use crate::graph::{MapData, MapNode, NavigationGraph, RouteGraph};
use crate::import::{map_data_from_geojson, ImportConfig, ImportReport};

pub trait MapStore {
    fn load_all(&self) -> Result<MapData, NavError>;

    /// Replaces the whole dataset. Either all of `data` is stored or the
    /// previous contents stay untouched.
    fn replace_all(&mut self, data: MapData) -> Result<(), NavError>;

    fn is_empty(&self) -> Result<bool, NavError>;

    fn clear(&mut self) -> Result<(), NavError> {
        self.replace_all(MapData::default())
    }

    /// Creates the node or moves it to the new position. Node ids must be
    /// integers.
    fn upsert_node(&mut self, node: MapNode) -> Result<(), NavError> {
        if node.id.parse::<i64>().is_err() {
            return Err(NavError::InvalidNodeId(node.id));
        }
        let mut data = self.load_all()?;
        match data.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => {
                existing.lat = node.lat;
                existing.lon = node.lon;
            }
            None => data.nodes.push(node),
        }
        self.replace_all(data)
    }
}

/// Imports a GeoJSON document into an empty store.
///
/// # Errors
///
/// [`NavError::StoreNotEmpty`] if the store already holds data; nothing is
/// written in that case.
pub fn import_geojson<S: MapStore + ?Sized>(
    store: &mut S,
    geojson: &GeoJson,
    config: &ImportConfig,
) -> Result<ImportReport, NavError> {
    if !store.is_empty()? {
        return Err(NavError::StoreNotEmpty);
    }
    let (data, report) = build(geojson, config)?;
    store.replace_all(data)?;
    info!("import stored {} nodes", report.nodes);
    Ok(report)
}

/// Replaces whatever the store holds with a fresh import.
///
/// The dataset is built before the store is touched, so a document that
/// fails to import leaves the old data in place.
pub fn reimport_geojson<S: MapStore + ?Sized>(
    store: &mut S,
    geojson: &GeoJson,
    config: &ImportConfig,
) -> Result<ImportReport, NavError> {
    let (data, report) = build(geojson, config)?;
    store.replace_all(data)?;
    info!("reimport stored {} nodes", report.nodes);
    Ok(report)
}

fn build(geojson: &GeoJson, config: &ImportConfig) -> Result<(MapData, ImportReport), NavError> {
    let (data, report) = map_data_from_geojson(geojson, config)?;

    let (graph, _) = NavigationGraph::from_map_data(data.clone());
    let components = RouteGraph::new(&graph).component_count();
    if components > 1 {
        warn!(
            "imported network has {} disconnected parts, some routes will not exist",
            components
        );
    }
    Ok((data, report))
}

/// Loads the stored dataset as a navigation graph.
pub fn load_graph<S: MapStore + ?Sized>(
    store: &S,
) -> Result<(NavigationGraph, Vec<Diagnostic>), NavError> {
    let data = store.load_all()?;
    Ok(NavigationGraph::from_map_data(data))
}
