//! Line tracking loops

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace};
use robot_if::{LineColour, LineKind, LineObservation, LineSubscription, Robot, WheelSpeeds};

use crate::line_ctrl::LineFollower;

use super::{FollowError, FollowLineResult};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Drive along the line until it's lost or an intersection has been passed over.
///
/// The intersection result fires on the first non-intersection observation after one or more
/// intersection observations, and that observation is not acted on. Observations without a usable
/// line end the episode with `NoLine`; stopping the wheels is left to the caller.
pub(crate) async fn track_line<R>(
    robot: &R,
    lines: &mut LineSubscription,
    mut follower: LineFollower,
) -> Result<FollowLineResult, FollowError>
where
    R: Robot + ?Sized,
{
    let mut seen_intersection = false;

    while let Some(obs) = lines.next().await {
        if !obs.has_line() {
            debug!("Line lost ({:?} with {} points)", obs.kind, obs.points.len());
            return Ok(FollowLineResult::NoLine);
        }

        match obs.kind {
            LineKind::Intersection => {
                if !seen_intersection {
                    debug!("Intersection in view");
                }
                seen_intersection = true;
            }
            _ if seen_intersection => return Ok(FollowLineResult::Intersection),
            _ => (),
        }

        let (left, right) = follower.get_wheel_speeds(&obs)?;

        robot
            .set_wheel_speed(WheelSpeeds::from_sides(left, right))
            .await?;
    }

    Err(FollowError::LineStreamClosed)
}

/// Wait, without moving, until a line of the given colour is in view.
pub async fn find_line<R>(robot: &R, colour: LineColour) -> Result<LineObservation, FollowError>
where
    R: Robot + ?Sized,
{
    robot.set_line_recognition_colour(colour).await?;

    let mut lines = robot.subscribe_line();

    while let Some(obs) = lines.next().await {
        if obs.has_line() {
            debug!("Found {:?} line", colour);
            return Ok(obs);
        }
        trace!("No {:?} line yet", colour);
    }

    Err(FollowError::LineStreamClosed)
}
