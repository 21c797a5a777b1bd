//! # Navigation library.
//!
//! Line following navigation for a small wheeled robot on a track of painted lines. The library
//! plans pickup and drop-off routes over the track graph, follows the line between intersections
//! with a PID controller raced against an obstacle watchdog, and dispatches the planned maneuvers
//! at each intersection.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Line following episodes - follow the line until an obstacle, loss of line, or intersection
pub mod follow;

/// Line control - converts line observations into left and right wheel speeds
pub mod line_ctrl;

/// Executable parameters
pub mod params;

/// Route planning - finds the cheapest pickup and drop-off route through the track
pub mod route;

/// Route execution - drives a planned route step by step
pub mod route_exec;

/// Simulated robot - a scripted robot for running without hardware
pub mod sim_robot;

/// Track graph - intersections and the connections between them
pub mod track;
