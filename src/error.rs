use std::fmt;

use thiserror::Error;

use crate::graph::{NodeId, PoiId};

#[derive(Error, Debug)]
pub enum NavError {
    #[error("map store is not empty, reset it before importing")]
    StoreNotEmpty,
    #[error("node '{0}' not in graph")]
    UnknownNode(NodeId),
    #[error("node id must be an integer, got '{0}'")]
    InvalidNodeId(String),
    #[error("invalid import config: {0}")]
    InvalidConfig(String),
    #[error("invalid GeoJSON input: {0}")]
    InvalidGeoJson(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal problem found while importing or building a graph.
///
/// The offending entity is skipped; everything else is kept.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A named point whose tags could not be parsed. `feature` is the
    /// position of the feature in the input collection.
    MalformedPoi { feature: usize, reason: String },
    /// A way whose geometry could not be read.
    MalformedGeometry { feature: usize, reason: String },
    /// A connection whose origin or target is not a known node.
    DanglingConnection { node1: NodeId, node2: NodeId },
    /// A POI bound to a node that does not exist; it stays unroutable.
    DanglingPoi { poi: PoiId, node: NodeId },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedPoi { feature, reason } => {
                write!(f, "skipped point feature #{feature}: {reason}")
            }
            Diagnostic::MalformedGeometry { feature, reason } => {
                write!(f, "skipped line feature #{feature}: {reason}")
            }
            Diagnostic::DanglingConnection { node1, node2 } => {
                write!(f, "skipped connection {node1} -> {node2}: missing node")
            }
            Diagnostic::DanglingPoi { poi, node } => {
                write!(f, "poi {poi} references missing node {node}")
            }
        }
    }
}
