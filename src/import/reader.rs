use super::config::{ImportConfig, MAX_SNAP_DECIMALS};
use super::tags::parse_other_tags;
use crate::error::{Diagnostic, NavError};
use crate::graph::{Connection, Coordinate, MapData, MapNode, PointOfInterest};
use geojson::{Feature, GeoJson, JsonObject, JsonValue, Value};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Counts and per-feature problems of one import run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub nodes: usize,
    pub connections: usize,
    pub pois: usize,
    /// Features that are neither a tagged way nor a named point
    pub ignored_features: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Exact-value key for a coordinate. `-0.0` and `0.0` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CoordKey(u64, u64);

impl From<Coordinate> for CoordKey {
    fn from(c: Coordinate) -> Self {
        fn bits(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }
        }
        CoordKey(bits(c.latitude), bits(c.longitude))
    }
}

/// Accumulates nodes, connections and POIs while walking a feature list.
///
/// All running state lives in this value, so independent imports never
/// interfere with each other.
pub struct GeoJsonImporter {
    config: ImportConfig,
    positions: HashMap<CoordKey, usize>, // 坐标 -> 节点id
    coords: Vec<Coordinate>,             // 按节点id排列
    connections: Vec<Connection>,
    pois: Vec<PointOfInterest>,
    report: ImportReport,
}

impl GeoJsonImporter {
    pub fn new(config: ImportConfig) -> Self {
        GeoJsonImporter {
            config,
            positions: HashMap::new(),
            coords: Vec::new(),
            connections: Vec::new(),
            pois: Vec::new(),
            report: ImportReport::default(),
        }
    }

    /// Processes one feature; `index` is its position in the input and is
    /// only used for diagnostics.
    pub fn add_feature(&mut self, index: usize, feature: &Feature) {
        let empty = JsonObject::new();
        let properties = feature.properties.as_ref().unwrap_or(&empty);
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::LineString(line)) if properties.contains_key(&self.config.way_tag) => {
                self.add_way(index, line)
            }
            Some(Value::Point(point)) if properties.contains_key(&self.config.name_tag) => {
                self.add_poi(index, point, properties)
            }
            _ => self.report.ignored_features += 1,
        }
    }

    fn add_way(&mut self, index: usize, line: &[Vec<f64>]) {
        let coords: Option<Vec<Coordinate>> =
            line.iter().map(|p| Coordinate::from_position(p)).collect();
        let Some(coords) = coords else {
            self.skip(Diagnostic::MalformedGeometry {
                feature: index,
                reason: "line string position has fewer than two values".to_string(),
            });
            return;
        };

        let mut prev: Option<usize> = None;
        for c in coords {
            let id = self.node_id(c);
            if let Some(last) = prev {
                self.connections.push(Connection {
                    node1: last.to_string(),
                    node2: id.to_string(),
                    directional: !self.config.bidirectional_ways,
                    travel_type: self.config.travel_type,
                });
            }
            prev = Some(id);
        }
    }

    fn add_poi(&mut self, index: usize, point: &[f64], properties: &JsonObject) {
        let parsed = Coordinate::from_position(point)
            .ok_or_else(|| "point position has fewer than two values".to_string())
            .and_then(|c| {
                let name = properties
                    .get(&self.config.name_tag)
                    .and_then(scalar_to_string)
                    .ok_or_else(|| format!("'{}' is not a scalar value", self.config.name_tag))?;
                let tags = match properties.get(&self.config.other_tags_tag) {
                    None | Some(JsonValue::Null) => HashMap::new(),
                    Some(JsonValue::String(raw)) => {
                        parse_other_tags(raw).map_err(|e| e.to_string())?
                    }
                    Some(_) => {
                        return Err(format!("'{}' is not a string", self.config.other_tags_tag))
                    }
                };
                Ok((c, name, tags))
            });

        match parsed {
            Ok((c, name, tags)) => {
                let node_id = self.node_id(c);
                let id = self.pois.len();
                debug!("poi {} '{}' on node {}", id, name, node_id);
                self.pois.push(PointOfInterest {
                    id: id.to_string(),
                    node_id: node_id.to_string(),
                    name,
                    tags,
                });
            }
            Err(reason) => self.skip(Diagnostic::MalformedPoi {
                feature: index,
                reason,
            }),
        }
    }

    /// 根据坐标查找节点id, 不存在则分配新的id
    fn node_id(&mut self, c: Coordinate) -> usize {
        let c = match self.config.snap_decimals {
            Some(decimals) => snap(c, decimals),
            None => c,
        };
        let next = self.coords.len();
        let id = *self.positions.entry(CoordKey::from(c)).or_insert(next);
        if id == next {
            self.coords.push(c);
        }
        id
    }

    fn skip(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.report.diagnostics.push(diagnostic);
    }

    /// Emits the accumulated dataset, nodes in id order.
    pub fn finish(self) -> (MapData, ImportReport) {
        let nodes: Vec<MapNode> = self
            .coords
            .iter()
            .enumerate()
            .map(|(id, c)| MapNode {
                id: id.to_string(),
                lat: c.latitude,
                lon: c.longitude,
            })
            .collect();
        let report = ImportReport {
            nodes: nodes.len(),
            connections: self.connections.len(),
            pois: self.pois.len(),
            ..self.report
        };
        info!(
            "geojson import built {} nodes, {} connections, {} pois ({} features ignored, {} skipped)",
            report.nodes,
            report.connections,
            report.pois,
            report.ignored_features,
            report.diagnostics.len()
        );
        let data = MapData {
            nodes,
            connections: self.connections,
            pois: self.pois,
        };
        (data, report)
    }
}

/// Builds a dataset from a list of features.
pub fn import_features<'a, I>(features: I, config: &ImportConfig) -> (MapData, ImportReport)
where
    I: IntoIterator<Item = &'a Feature>,
{
    let mut importer = GeoJsonImporter::new(config.clone());
    for (index, feature) in features.into_iter().enumerate() {
        importer.add_feature(index, feature);
    }
    importer.finish()
}

/// Builds a dataset from a GeoJSON document, which must be a feature
/// collection or a single feature.
pub fn map_data_from_geojson(
    geojson: &GeoJson,
    config: &ImportConfig,
) -> Result<(MapData, ImportReport), NavError> {
    config.validate()?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(import_features(&fc.features, config)),
        GeoJson::Feature(feature) => Ok(import_features(std::iter::once(feature), config)),
        GeoJson::Geometry(_) => Err(NavError::InvalidGeoJson(
            "expected a FeatureCollection or a Feature, got a bare geometry".to_string(),
        )),
    }
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn snap(c: Coordinate, decimals: u32) -> Coordinate {
    let factor = 10f64.powi(decimals.min(MAX_SNAP_DECIMALS) as i32);
    Coordinate::new(
        (c.latitude * factor).round() / factor,
        (c.longitude * factor).round() / factor,
    )
}
