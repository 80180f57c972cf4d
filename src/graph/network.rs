use super::model::{
    Connection, Coordinate, Edge, MapData, MapNode, Node, NodeId, PointOfInterest, TravelType,
};
use crate::error::{Diagnostic, NavError};
use log::{debug, info, warn};
use std::collections::HashMap;

/**
 * @file network.rs
 * 定义导航图结构体
 * 由持久化的扁平数据构建, 保存在内存中供路径查询使用。
 */
#[derive(Debug, Clone, Default)]
pub struct NavigationGraph {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, Vec<Edge>>, // 以起点id为键的出边
    pois: Vec<PointOfInterest>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a persisted dataset.
    ///
    /// Undirected connections become two directed edges. Connections that
    /// reference an unknown node are skipped and POIs bound to an unknown
    /// node are kept but reported; both show up in the returned diagnostics.
    pub fn from_map_data(data: MapData) -> (Self, Vec<Diagnostic>) {
        info!("start construct navigation graph...");
        debug!(
            "node size: {}, connection size: {}, poi size: {}",
            data.nodes.len(),
            data.connections.len(),
            data.pois.len()
        );
        let mut graph = NavigationGraph::new();
        let mut diagnostics = Vec::new();

        for node in &data.nodes {
            graph.add_node(node.id.clone(), node.coordinate());
        }

        for conn in &data.connections {
            if !graph.contains_node(&conn.node1) || !graph.contains_node(&conn.node2) {
                let diagnostic = Diagnostic::DanglingConnection {
                    node1: conn.node1.clone(),
                    node2: conn.node2.clone(),
                };
                warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
                continue;
            }
            graph.push_edge(&conn.node1, &conn.node2, conn.travel_type);
            if !conn.directional {
                graph.push_edge(&conn.node2, &conn.node1, conn.travel_type);
            }
        }

        for poi in data.pois {
            if let Some(diagnostic) = graph.add_poi(poi) {
                warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }

        info!(
            "finish construct navigation graph: {} nodes, {} edges, {} pois",
            graph.node_count(),
            graph.edge_count(),
            graph.pois.len()
        );
        (graph, diagnostics)
    }

    /// Inserts a node, replacing any node with the same id. Edges are kept.
    pub fn add_node(&mut self, id: NodeId, coordinate: Coordinate) {
        self.nodes.insert(id.clone(), Node { id, coordinate });
    }

    /// 添加一条有向边
    pub fn add_edge(
        &mut self,
        origin: &str,
        target: &str,
        travel_type: TravelType,
    ) -> Result<(), NavError> {
        for id in [origin, target] {
            if !self.contains_node(id) {
                return Err(NavError::UnknownNode(id.to_string()));
            }
        }
        self.push_edge(origin, target, travel_type);
        Ok(())
    }

    fn push_edge(&mut self, origin: &str, target: &str, travel_type: TravelType) {
        self.adjacency
            .entry(origin.to_string())
            .or_default()
            .push(Edge {
                origin: origin.to_string(),
                target: target.to_string(),
                travel_type,
            });
    }

    /// Adds a POI. Returns a diagnostic if its node is unknown; the POI is
    /// kept either way.
    pub fn add_poi(&mut self, poi: PointOfInterest) -> Option<Diagnostic> {
        let diagnostic = if self.contains_node(&poi.node_id) {
            None
        } else {
            Some(Diagnostic::DanglingPoi {
                poi: poi.id.clone(),
                node: poi.node_id.clone(),
            })
        };
        self.pois.push(poi);
        diagnostic
    }

    /// Moves a node to a new position in place. Ids and edges are unchanged.
    pub fn move_node(&mut self, id: &str, coordinate: Coordinate) -> Result<(), NavError> {
        match self.nodes.get_mut(id) {
            Some(node) => {
                debug!("move node {} from {} to {}", id, node.coordinate, coordinate);
                node.coordinate = coordinate;
                Ok(())
            }
            None => Err(NavError::UnknownNode(id.to_string())),
        }
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn coordinate(&self, id: &str) -> Option<Coordinate> {
        self.nodes.get(id).map(|n| n.coordinate)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outgoing edges of `id`, in insertion order.
    pub fn edges_from(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.values().flatten()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// First POI with exactly this name.
    pub fn find_poi(&self, name: &str) -> Option<&PointOfInterest> {
        self.pois.iter().find(|poi| poi.name == name)
    }

    /// Node ids in a stable order: integer ids numerically, then the rest.
    pub fn sorted_node_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self.nodes.keys().collect();
        ids.sort_by(|a, b| node_order(a).cmp(&node_order(b)));
        ids
    }

    /// Projects the graph back onto a persisted dataset.
    ///
    /// A pair of opposite edges with the same travel type is written as one
    /// undirected connection; an unpaired edge is written as directional.
    pub fn to_map_data(&self) -> MapData {
        let order = self.sorted_node_ids();
        let nodes = order
            .iter()
            .map(|id| {
                let c = self.nodes[*id].coordinate;
                MapNode {
                    id: (*id).clone(),
                    lat: c.latitude,
                    lon: c.longitude,
                }
            })
            .collect();

        let mut remaining: HashMap<(&str, &str, TravelType), usize> = HashMap::new();
        for edge in self.edges() {
            *remaining
                .entry((edge.origin.as_str(), edge.target.as_str(), edge.travel_type))
                .or_default() += 1;
        }

        let mut connections = Vec::new();
        for id in order {
            for edge in self.edges_from(id) {
                let key = (edge.origin.as_str(), edge.target.as_str(), edge.travel_type);
                match remaining.get_mut(&key) {
                    Some(count) if *count > 0 => *count -= 1,
                    _ => continue,
                }
                let reverse = (edge.target.as_str(), edge.origin.as_str(), edge.travel_type);
                let directional = match remaining.get_mut(&reverse) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        false
                    }
                    _ => true,
                };
                connections.push(Connection {
                    node1: edge.origin.clone(),
                    node2: edge.target.clone(),
                    directional,
                    travel_type: edge.travel_type,
                });
            }
        }

        MapData {
            nodes,
            connections,
            pois: self.pois.clone(),
        }
    }
}

fn node_order(id: &str) -> (bool, u64, &str) {
    match id.parse::<u64>() {
        Ok(n) => (false, n, id),
        Err(_) => (true, 0, id),
    }
}
