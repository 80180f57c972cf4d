use std::{cmp::Ordering, collections::BinaryHeap, collections::HashMap};

use log::debug;

use crate::algorithm;
use crate::graph::{NavigationGraph, NodeId};

#[derive(Copy, Clone, PartialEq)]
struct State<'g> {
    cost: f64,
    node: &'g str,
}

impl Eq for State<'_> {}

// Min-heap by cost, equal costs pop the smaller node id first
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// When the search may stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Stop as soon as the destination is settled
    #[default]
    EarlyExit,
    /// Settle every reachable node
    Exhaustive,
}

/// Result of a single-source shortest path search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Node ids from start to destination
    pub path: Vec<NodeId>,
    /// Meters
    pub total_distance: f64,
}

impl PathResult {
    /// A path with fewer than two nodes means there is no route.
    pub fn is_valid(&self) -> bool {
        self.path.len() >= 2
    }

    pub fn start(&self) -> Option<&NodeId> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&NodeId> {
        self.path.last()
    }
}

/// Shortest path from `start` to `dest`, edge weights being the haversine
/// length of each edge.
///
/// When `dest` cannot be reached the path holds only `dest`; check
/// [`PathResult::is_valid`].
pub fn shortest_path(graph: &NavigationGraph, start: &str, dest: &str) -> PathResult {
    shortest_path_with(graph, start, dest, SearchMode::EarlyExit)
}

pub fn shortest_path_with(
    graph: &NavigationGraph,
    start: &str,
    dest: &str,
    mode: SearchMode,
) -> PathResult {
    let mut predecessors: HashMap<&str, (&str, f64)> = HashMap::new();

    if let Some(start_node) = graph.node(start) {
        let start = start_node.id.as_str();
        let mut distances: HashMap<&str, f64> = HashMap::new();
        let mut heap = BinaryHeap::new();

        heap.push(State {
            cost: 0.0,
            node: start,
        });
        distances.insert(start, 0.0);

        while let Some(State { cost, node }) = heap.pop() {
            // Skip if we've found a better path
            if let Some(&best) = distances.get(node) {
                if cost > best {
                    continue;
                }
            }

            if mode == SearchMode::EarlyExit && node == dest {
                break;
            }

            let Some(from) = graph.coordinate(node) else {
                continue;
            };
            for edge in graph.edges_from(node) {
                let Some(to) = graph.coordinate(&edge.target) else {
                    continue;
                };
                let next = edge.target.as_str();
                let weight = algorithm::distance(from, to);
                let next_cost = cost + weight;

                let improved = match distances.get(next) {
                    Some(&known) => next_cost < known,
                    None => true,
                };
                if improved {
                    distances.insert(next, next_cost);
                    predecessors.insert(next, (node, weight));
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
        }
        debug!("dijkstra from {} settled {} nodes", start, distances.len());
    }

    // Follow predecessors backward from destination to start
    let mut path = vec![dest.to_string()];
    let mut total_distance = 0.0;
    let mut current = dest;
    while let Some(&(prev, weight)) = predecessors.get(current) {
        total_distance += weight;
        path.push(prev.to_string());
        current = prev;
    }
    if path.len() == 1 {
        total_distance = 0.0;
    }
    path.reverse();

    PathResult {
        path,
        total_distance,
    }
}
