//! # Line following module
//!
//! A line following episode drives the robot along the line until one of three things happens:
//!
//! - the obstacle sensor reads closer than the obstacle distance ([`FollowLineResult::ObstacleTooClose`]),
//! - the line disappears ([`FollowLineResult::NoLine`]),
//! - the robot passes over an intersection ([`FollowLineResult::Intersection`]).
//!
//! Two activities race on the current task: an obstacle watchdog polling the IR sensor, and the
//! line tracker feeding observations through a fresh [`LineFollower`] and commanding the wheels.
//! Whichever finishes first decides the result. The other is dropped at its current await point,
//! then the wheels are stopped exactly once before [`follow_line`] returns.
//!
//! None of the three results are errors. Errors are reserved for the robot failing or the line
//! stream going away.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;
mod tracker;
mod watchdog;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{error, info};
use robot_if::{LineColour, Robot, RobotError, WheelSpeeds};
use serde::Serialize;

use crate::line_ctrl::{LineCtrlError, LineFollower};

pub use params::FollowParams;
pub use tracker::find_line;
pub use watchdog::wait_for_clearance;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// How a line following episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowLineResult {
    ObstacleTooClose,
    NoLine,
    Intersection,
}

/// Failures during a line following episode.
#[derive(Debug, thiserror::Error)]
pub enum FollowError {
    #[error("Robot error: {0}")]
    Robot(#[from] RobotError),

    #[error("The line observation stream ended unexpectedly")]
    LineStreamClosed,

    #[error("Line control error: {0}")]
    LineCtrl(#[from] LineCtrlError),
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Follow the line of the given colour until an obstacle, loss of line, or intersection.
///
/// The wheels are always commanded to stop once before this returns, whichever activity won and
/// whether or not it failed.
pub async fn follow_line<R>(
    robot: &R,
    colour: LineColour,
    params: &FollowParams,
) -> Result<FollowLineResult, FollowError>
where
    R: Robot + ?Sized,
{
    robot.set_line_recognition_colour(colour).await?;

    let mut lines = robot.subscribe_line();
    let follower = LineFollower::new(params.line_ctrl);

    // The losing branch is dropped when select returns, before the stop below
    let outcome = tokio::select! {
        biased;

        res = watchdog::watch_for_obstacle(robot, params) => res,
        res = tracker::track_line(robot, &mut lines, follower) => res,
    };

    let stop = robot.set_wheel_speed(WheelSpeeds::STOP).await;

    match (outcome, stop) {
        (Ok(result), Ok(())) => {
            info!("Following {:?} line ended: {:?}", colour, result);
            Ok(result)
        }
        (Ok(result), Err(e)) => {
            error!("Could not stop the wheels after {:?}: {}", result, e);
            Err(e.into())
        }
        (Err(e), Ok(())) => {
            error!("Following {:?} line failed: {}", colour, e);
            Err(e)
        }
        (Err(e), Err(stop_err)) => {
            error!(
                "Following {:?} line failed ({}) and the wheels could not be stopped: {}",
                colour, e, stop_err
            );
            Err(e)
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
