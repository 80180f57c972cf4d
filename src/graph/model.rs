use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/**
 * @file model.rs
 * 定义地图数据的基础结构体
 * 节点, 边, 兴趣点以及持久化使用的扁平记录
 */

pub type NodeId = String;
pub type PoiId = String;

/// 经纬度坐标, 单位度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate from a GeoJSON position (`[lon, lat, ...]`).
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Coordinate::new(*lat, *lon)),
            _ => None,
        }
    }

    pub fn to_position(self) -> Vec<f64> {
        vec![self.longitude, self.latitude]
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TravelType {
    #[default]
    Walk,
    Bike,
    Car,
    Bus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// A directed link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub origin: NodeId,
    pub target: NodeId,
    pub travel_type: TravelType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: PoiId,
    #[serde(rename = "node")]
    pub node_id: NodeId,
    pub name: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Persisted node record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl MapNode {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Persisted connection record. Undirected unless `directional` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub node1: NodeId,
    pub node2: NodeId,
    #[serde(default)]
    pub directional: bool,
    #[serde(rename = "type")]
    pub travel_type: TravelType,
}

/// The flat dataset exchanged with a map store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub nodes: Vec<MapNode>,
    pub connections: Vec<Connection>,
    pub pois: Vec<PointOfInterest>,
}

impl MapData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty() && self.pois.is_empty()
    }
}
