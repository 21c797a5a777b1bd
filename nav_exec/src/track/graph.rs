//! Arena-backed track graph

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Connection, Correction, GraphError, MoveAction};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Handle to a node in a [`TrackGraph`].
///
/// Handles are only meaningful for the graph that issued them. Ordering follows creation order,
/// which is what the route planner uses to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

/// A directed, weighted, labelled graph of track intersections.
#[derive(Debug, Clone, Default)]
pub struct TrackGraph {
    nodes: Vec<TrackNode>,

    /// Lookup from node name to handle
    names: HashMap<String, NodeId>,
}

/// A single intersection.
#[derive(Debug, Clone)]
struct TrackNode {
    name: String,

    /// Outgoing connections keyed by target. A `BTreeMap` keeps neighbour iteration in handle
    /// order and makes duplicate targets impossible.
    connections: BTreeMap<NodeId, Connection>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NodeId {
    /// The index of this node in its graph's arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl TrackGraph {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new intersection with the given unique name.
    pub fn add_node<S: Into<String>>(&mut self, name: S) -> Result<NodeId, GraphError> {
        let name = name.into();

        if self.names.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }

        Ok(self.push_node(name))
    }

    /// Get the handle of the named node, adding it if it doesn't exist yet.
    pub fn node_or_insert(&mut self, name: &str) -> NodeId {
        match self.names.get(name) {
            Some(id) => *id,
            None => self.push_node(name.to_string()),
        }
    }

    /// Add a directed connection from `from` to `to`.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        cost: f64,
        mnvr: MoveAction,
        correction: Correction,
    ) -> Result<(), GraphError> {
        self.check_node(to)?;

        if !cost.is_finite() || cost < 0.0 {
            return Err(GraphError::InvalidCost { from, to, cost });
        }

        let node = self
            .nodes
            .get_mut(from.0)
            .ok_or(GraphError::UnknownNode(from))?;

        if node.connections.contains_key(&to) {
            return Err(GraphError::DuplicateConnection { from, to });
        }

        node.connections.insert(
            to,
            Connection {
                cost,
                mnvr,
                correction,
            },
        );

        Ok(())
    }

    /// All outgoing connections of the node, in ascending target order.
    pub fn neighbours(&self, id: NodeId) -> Result<&BTreeMap<NodeId, Connection>, GraphError> {
        self.nodes
            .get(id.0)
            .map(|n| &n.connections)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// The connection from `from` to `to`, if there is one.
    pub fn connection(&self, from: NodeId, to: NodeId) -> Option<&Connection> {
        self.nodes.get(from.0)?.connections.get(&to)
    }

    /// Look up a node by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// The name of the given node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the handle refers to a node in this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn push_node(&mut self, name: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.names.insert(name.clone(), id);
        self.nodes.push(TrackNode {
            name,
            connections: BTreeMap::new(),
        });
        id
    }

    fn check_node(&self, id: NodeId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
