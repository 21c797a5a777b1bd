//! Maneuver and correction labels carried on track connections

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An edge of the track graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Cost of traversing the connection, always finite and non-negative.
    pub cost: f64,

    /// The maneuver performed to traverse the connection.
    pub mnvr: MoveAction,

    /// The rotation to apply before the maneuver that follows this one.
    pub correction: Correction,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The physical maneuver associated with traversing a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    Forward,
    TurnLeft,
    TurnRight,
    FollowBlueLine,
    CollectBox,
    DropBox,
}

/// An in-place rotation performed before a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    CorrectLeft,
    CorrectRight,
    NoCorrection,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Correction {
    fn default() -> Self {
        Correction::NoCorrection
    }
}
