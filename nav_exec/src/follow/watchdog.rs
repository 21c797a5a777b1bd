//! Obstacle proximity polling loops

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::Duration;

use log::{debug, trace};
use robot_if::Robot;

use super::{FollowError, FollowLineResult, FollowParams};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Poll the IR sensor until something is closer than the obstacle distance.
///
/// Only ever returns `ObstacleTooClose` or an error.
pub(crate) async fn watch_for_obstacle<R>(
    robot: &R,
    params: &FollowParams,
) -> Result<FollowLineResult, FollowError>
where
    R: Robot + ?Sized,
{
    loop {
        let distance = robot.get_ir_distance(params.ir_sensor_id).await?;

        if distance < params.obstacle_distance {
            debug!(
                "Obstacle at {:.1} (threshold {:.1})",
                distance, params.obstacle_distance
            );
            return Ok(FollowLineResult::ObstacleTooClose);
        }

        poll_pause(params).await;
    }
}

/// Poll the IR sensor until the way ahead is clear, returning the clear reading.
///
/// Used to resume after an episode ended with `ObstacleTooClose`.
pub async fn wait_for_clearance<R>(robot: &R, params: &FollowParams) -> Result<f64, FollowError>
where
    R: Robot + ?Sized,
{
    loop {
        let distance = robot.get_ir_distance(params.ir_sensor_id).await?;

        if distance >= params.obstacle_distance {
            debug!("Way ahead clear at {:.1}", distance);
            return Ok(distance);
        }

        trace!("Still blocked at {:.1}", distance);
        poll_pause(params).await;
    }
}

/// Suspend between sensor readings so the other activity on this task gets to run.
async fn poll_pause(params: &FollowParams) {
    if params.obstacle_poll_period_ms == 0 {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(Duration::from_millis(params.obstacle_poll_period_ms)).await;
    }
}
