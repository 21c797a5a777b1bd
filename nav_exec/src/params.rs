//! # Navigation Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use robot_if::LineColour;
use serde::Deserialize;

use crate::{
    follow::FollowParams, route_exec::RouteRunnerParams, sim_robot::SimParams, track::TrackSpec,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the `nav_exec` executable.
#[derive(Debug, Clone, Deserialize)]
pub struct NavExecParams {
    /// The track to plan over
    pub track: TrackSpec,

    /// Name of the node the robot starts at
    pub start: String,

    /// Name of the node the box is collected from
    pub pickup: String,

    /// Name of the node the box is dropped at
    pub dropoff: String,

    #[serde(default)]
    pub runner: RouteRunnerParams,

    #[serde(default)]
    pub sim: SimParams,
}

/// Parameters for the `follow_test` executable.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowTestParams {
    pub colour: LineColour,

    #[serde(default)]
    pub follow: FollowParams,

    #[serde(default)]
    pub sim: SimParams,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
