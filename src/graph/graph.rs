use super::model::NodeId;
use super::network::NavigationGraph;
use crate::algorithm;
use crate::error::NavError;
use log::{debug, info};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use std::collections::HashMap;

/// petgraph projection of a navigation graph with haversine edge weights.
///
/// Used for whole-graph analysis; route queries go through
/// [`crate::route::shortest_path`] instead.
pub struct RouteGraph {
    index: HashMap<NodeId, NodeIndex<usize>>,
    graph: Graph<NodeId, f64, Directed, usize>,
}

impl RouteGraph {
    pub fn new(network: &NavigationGraph) -> Self {
        info!("start construct route graph...");
        let node_size = network.node_count();
        let edge_size = network.edge_count();
        debug!("node size: {}, edge size: {}", node_size, edge_size);
        let mut gh = RouteGraph {
            index: HashMap::with_capacity(node_size),
            graph: Graph::with_capacity(node_size, edge_size),
        };
        // 添加node
        for id in network.sorted_node_ids() {
            let idx = gh.graph.add_node(id.clone());
            gh.index.insert(id.clone(), idx);
        }

        // 添加edge
        for id in network.sorted_node_ids() {
            for edge in network.edges_from(id) {
                let from = gh.index[&edge.origin];
                let to = gh.index[&edge.target];
                let weight = match (
                    network.coordinate(&edge.origin),
                    network.coordinate(&edge.target),
                ) {
                    (Some(a), Some(b)) => algorithm::distance(a, b),
                    _ => continue,
                };
                gh.graph.add_edge(from, to, weight);
            }
        }
        info!("finish construct route graph...");
        gh
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Shortest distance from `from` to every reachable node, in meters.
    pub fn distances_from(&self, from: &str) -> Result<HashMap<NodeId, f64>, NavError> {
        use petgraph::algo::dijkstra;
        let start = self.node_index(from)?;
        let result = dijkstra(&self.graph, start, None, |e| *e.weight());
        Ok(result
            .into_iter()
            .map(|(idx, weight)| (self.graph[idx].clone(), weight))
            .collect())
    }

    /// Shortest distance between two nodes, `None` when `to` is unreachable.
    pub fn short_path(&self, from: &str, to: &str) -> Result<Option<f64>, NavError> {
        use petgraph::algo::dijkstra;
        let start = self.node_index(from)?;
        let goal = self.node_index(to)?;
        let result = dijkstra(&self.graph, start, Some(goal), |e| *e.weight());
        Ok(result.get(&goal).copied())
    }

    /// Number of weakly connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    fn node_index(&self, id: &str) -> Result<NodeIndex<usize>, NavError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| NavError::UnknownNode(id.to_string()))
    }
}
