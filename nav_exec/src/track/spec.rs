//! Deserialisable track description

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;
use serde::Deserialize;

use super::{Correction, GraphError, MoveAction, TrackGraph};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A track described as a flat list of named connections, as found in a parameter file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackSpec {
    pub connections: Vec<ConnectionSpec>,
}

/// One directed connection between two named intersections.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSpec {
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub mnvr: MoveAction,

    #[serde(default)]
    pub correction: Correction,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrackGraph {
    /// Build a graph from a track description.
    ///
    /// Nodes are created in order of first mention, so the description order decides how route
    /// planning ties are broken.
    pub fn from_spec(spec: &TrackSpec) -> Result<Self, GraphError> {
        let mut track = TrackGraph::new();

        for conn in spec.connections.iter() {
            let from = track.node_or_insert(&conn.from);
            let to = track.node_or_insert(&conn.to);

            track.connect(from, to, conn.cost, conn.mnvr, conn.correction)?;
        }

        debug!(
            "Built track with {} nodes and {} connections",
            track.num_nodes(),
            spec.connections.len()
        );

        Ok(track)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
