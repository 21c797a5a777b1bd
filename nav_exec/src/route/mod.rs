//! # Route planning module
//!
//! Plans a pickup and drop-off run over a [`TrackGraph`](crate::track::TrackGraph). Planning
//! happens in two stages:
//!
//! 1. The lowest cost node sequence is found for the start to pickup leg and for the pickup to
//!    drop-off leg, using Dijkstra's algorithm over the connection costs.
//! 2. Each node sequence is turned into the maneuvers stored on the connections it traverses, and
//!    the two legs are joined around synthetic `CollectBox` and `DropBox` steps.
//!
//! The resulting [`Route`] is consumed one [`RouteStep`] at a time. Each connection's correction
//! applies to the step *after* it, so a step's `pre_correction` comes from the previous route
//! entry.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod dijkstra;
mod planner;
mod steps;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use dijkstra::shortest_path;
pub use planner::*;
pub use steps::*;

use crate::track::NodeId;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur while planning a route.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RouteError {
    #[error("No path exists from {from} to {to}")]
    NoPathFound { from: NodeId, to: NodeId },

    /// A path referenced a connection which isn't in the graph. This is a bug, not a planning
    /// failure.
    #[error("Path steps from {from} to {to} but the track has no such connection")]
    InconsistentGraph { from: NodeId, to: NodeId },

    #[error("No node with id {0} exists in the track")]
    UnknownNode(NodeId),

    #[error("The pickup and drop-off are both {0}, there is no drop-off leg to plan")]
    PickupIsDropoff(NodeId),
}
