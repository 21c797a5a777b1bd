//! # Track module
//!
//! The track is modelled as a directed, weighted graph. Each node is an intersection of painted
//! lines, and each edge (a [`Connection`]) records what the robot must physically do to get from
//! one intersection to the next, how expensive that is, and which in-place correction the robot
//! should perform before its next maneuver.
//!
//! Nodes live in an arena inside [`TrackGraph`] and are referred to by [`NodeId`] handles, so the
//! cyclic node-to-node references of a real track never become ownership cycles.
//!
//! The graph is built once (by hand or from a [`TrackSpec`]) and is read-only while routes are
//! planned over it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod graph;
mod mnvr;
mod spec;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use graph::*;
pub use mnvr::*;
pub use spec::*;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised while building a [`TrackGraph`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GraphError {
    #[error("No node with id {0} exists in the track")]
    UnknownNode(NodeId),

    #[error("A node named {0:?} already exists in the track")]
    DuplicateName(String),

    #[error("Connection {from} -> {to} has an invalid cost ({cost}), costs must be finite and non-negative")]
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },

    #[error("Node {from} already has a connection to {to}")]
    DuplicateConnection { from: NodeId, to: NodeId },
}
