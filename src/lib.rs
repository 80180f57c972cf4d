//! Campus map navigation core.
//!
//! Builds a route graph from GeoJSON survey data, stores it through a
//! [`store::MapStore`], and answers shortest-route queries between named
//! places.

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod import;
pub mod route;
pub mod store;
pub mod utils;

pub use error::{Diagnostic, NavError};
pub use graph::{Coordinate, MapData, NavigationGraph, NodeId, PointOfInterest, TravelType};
pub use import::{ImportConfig, ImportReport};
pub use route::{find_route, shortest_path, PathResult, RouteOutcome};
pub use store::{JsonFileStore, MapStore, MemoryStore};
