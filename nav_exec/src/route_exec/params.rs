//! # Route runner parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use robot_if::LineColour;
use serde::Deserialize;

use crate::follow::FollowParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RouteRunnerParams {
    /// Colour of the track line followed between intersections
    pub line_colour: LineColour,

    /// Parameters for each line following episode
    pub follow: FollowParams,

    /// If true, an obstacle stop waits for the way to clear and a lost line waits for the line
    /// to reappear, then the same step is retried. If false either stop halts the route.
    pub resume_after_stop: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for RouteRunnerParams {
    fn default() -> Self {
        Self {
            line_colour: LineColour::Red,
            follow: FollowParams::default(),
            resume_after_stop: false,
        }
    }
}
