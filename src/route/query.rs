use std::fmt;

use log::{debug, info};

use super::dijkstra::shortest_path;
use crate::graph::{Coordinate, NavigationGraph, NodeId, PointOfInterest};

/// Which end of a route query a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => write!(f, "origin"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub origin: PointOfInterest,
    pub destination: PointOfInterest,
    pub path: Vec<NodeId>,
    /// Meters
    pub total_distance: f64,
}

impl Route {
    /// Positions of the path nodes; nodes missing from `graph` are left out.
    pub fn coordinates(&self, graph: &NavigationGraph) -> Vec<Coordinate> {
        self.path
            .iter()
            .filter_map(|id| graph.coordinate(id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Route),
    NameNotFound { endpoint: Endpoint, name: String },
    NoPathExists { origin: String, destination: String },
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Human readable reason for a failed query.
    pub fn reason(&self) -> Option<String> {
        match self {
            RouteOutcome::Found(_) => None,
            RouteOutcome::NameNotFound { name, .. } => Some(format!("cannot find place: {name}")),
            RouteOutcome::NoPathExists {
                origin,
                destination,
            } => Some(format!(
                "cannot create a route from {origin} to {destination}"
            )),
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteOutcome::Found(route) => write!(
                f,
                "{} -> {}: {:.1} m over {} nodes",
                route.origin.name,
                route.destination.name,
                route.total_distance,
                route.path.len()
            ),
            other => write!(f, "{}", other.reason().unwrap_or_default()),
        }
    }
}

/// Resolves two place names to POIs and finds the shortest route between
/// them. The first POI carrying a name wins.
pub fn find_route(graph: &NavigationGraph, origin_name: &str, dest_name: &str) -> RouteOutcome {
    let Some(origin) = graph.find_poi(origin_name) else {
        debug!("origin '{}' not found", origin_name);
        return RouteOutcome::NameNotFound {
            endpoint: Endpoint::Origin,
            name: origin_name.to_string(),
        };
    };
    let Some(destination) = graph.find_poi(dest_name) else {
        debug!("destination '{}' not found", dest_name);
        return RouteOutcome::NameNotFound {
            endpoint: Endpoint::Destination,
            name: dest_name.to_string(),
        };
    };

    let result = shortest_path(graph, &origin.node_id, &destination.node_id);
    if !result.is_valid() {
        info!("no route from {} to {}", origin.name, destination.name);
        return RouteOutcome::NoPathExists {
            origin: origin.name.clone(),
            destination: destination.name.clone(),
        };
    }

    info!(
        "route {} -> {}: {:.1} m, {} nodes",
        origin.name,
        destination.name,
        result.total_distance,
        result.path.len()
    );
    RouteOutcome::Found(Route {
        origin: origin.clone(),
        destination: destination.clone(),
        path: result.path,
        total_distance: result.total_distance,
    })
}
