//! # Route execution module
//!
//! Drives a planned [`Route`] step by step. For each step the robot follows the track line to the
//! next intersection, applies the step's pre-maneuver correction, and then performs the step's
//! maneuver. The physical actions belong to a [`ManeuverExecutor`] supplied by the caller; the
//! runner only decides what happens when.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use async_trait::async_trait;
use log::{info, warn};
use robot_if::Robot;
use serde::Serialize;

use crate::follow::{find_line, follow_line, wait_for_clearance, FollowError, FollowLineResult};
use crate::route::{Route, RouteStep};
use crate::track::{Correction, MoveAction};

pub use params::RouteRunnerParams;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Performs the physical side of route steps.
#[async_trait]
pub trait ManeuverExecutor: Send + Sync {
    /// Rotate in place before the next maneuver.
    async fn rotate(&self, rotation: Rotation) -> Result<(), FollowError>;

    /// Perform a maneuver, starting at an intersection.
    async fn perform(&self, mnvr: MoveAction) -> Result<(), FollowError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RouteRunner {
    params: RouteRunnerParams,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Direction of an in-place rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rotation {
    Left,
    Right,
}

/// How running a route ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouteOutcome {
    /// Every step was performed
    Completed,

    /// Following the line to `step` ended without reaching an intersection
    Halted {
        step: RouteStep,
        reason: FollowLineResult,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Rotation {
    /// The rotation a correction asks for, if any.
    pub fn from_correction(correction: Correction) -> Option<Self> {
        match correction {
            Correction::CorrectLeft => Some(Rotation::Left),
            Correction::CorrectRight => Some(Rotation::Right),
            Correction::NoCorrection => None,
        }
    }
}

impl RouteRunner {
    pub fn new(params: RouteRunnerParams) -> Self {
        Self { params }
    }

    /// Run every step of the route in order.
    pub async fn run<R, E>(
        &self,
        robot: &R,
        executor: &E,
        route: &Route,
    ) -> Result<RouteOutcome, FollowError>
    where
        R: Robot + ?Sized,
        E: ManeuverExecutor + ?Sized,
    {
        let num_steps = route.len();

        for step in route.steps() {
            info!(
                "Step {}/{}: {} then {}",
                step.index + 1,
                num_steps,
                describe_correction(step.pre_correction),
                describe_mnvr(step.mnvr)
            );

            if let Some(reason) = self.drive_to_intersection(robot).await? {
                warn!("Route halted before step {}: {:?}", step.index, reason);
                return Ok(RouteOutcome::Halted { step, reason });
            }

            if let Some(rotation) = Rotation::from_correction(step.pre_correction) {
                executor.rotate(rotation).await?;
            }

            executor.perform(step.mnvr).await?;
        }

        info!("Route complete");

        Ok(RouteOutcome::Completed)
    }

    /// Follow the line until an intersection is reached.
    ///
    /// Returns the result which stopped the robot short of the intersection, or `None` once it
    /// has been reached.
    async fn drive_to_intersection<R>(
        &self,
        robot: &R,
    ) -> Result<Option<FollowLineResult>, FollowError>
    where
        R: Robot + ?Sized,
    {
        loop {
            let result = follow_line(robot, self.params.line_colour, &self.params.follow).await?;

            match result {
                FollowLineResult::Intersection => return Ok(None),
                FollowLineResult::ObstacleTooClose if self.params.resume_after_stop => {
                    info!("Waiting for the obstacle to clear");
                    wait_for_clearance(robot, &self.params.follow).await?;
                }
                FollowLineResult::NoLine if self.params.resume_after_stop => {
                    info!("Waiting for the line to reappear");
                    find_line(robot, self.params.line_colour).await?;
                }
                FollowLineResult::ObstacleTooClose | FollowLineResult::NoLine => {
                    return Ok(Some(result))
                }
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn describe_mnvr(mnvr: MoveAction) -> &'static str {
    match mnvr {
        MoveAction::Forward => "drive forward",
        MoveAction::TurnLeft => "turn left",
        MoveAction::TurnRight => "turn right",
        MoveAction::FollowBlueLine => "follow the blue line",
        MoveAction::CollectBox => "collect the box",
        MoveAction::DropBox => "drop the box",
    }
}

fn describe_correction(correction: Correction) -> &'static str {
    match correction {
        Correction::CorrectLeft => "correct left",
        Correction::CorrectRight => "correct right",
        Correction::NoCorrection => "no correction",
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::RouteEntry;
    use crate::sim_robot::{SimAction, SimExecutor, SimRobot};
    use robot_if::{LineKind, LineObservation, WheelSpeeds};

    fn straight() -> LineObservation {
        LineObservation::new(LineKind::Straight, &[(0.35, 0.0)])
    }

    fn intersection() -> LineObservation {
        LineObservation::new(LineKind::Intersection, &[(0.35, 0.0)])
    }

    /// One episode's worth of observations ending at an intersection
    fn leg() -> Vec<LineObservation> {
        vec![straight(), intersection(), straight()]
    }

    fn route() -> Route {
        Route::new(vec![
            RouteEntry::new(MoveAction::Forward, Correction::CorrectLeft),
            RouteEntry::new(MoveAction::TurnRight, Correction::NoCorrection),
            RouteEntry::new(MoveAction::CollectBox, Correction::NoCorrection),
        ])
    }

    #[tokio::test]
    async fn test_run_route() {
        let robot = SimRobot::new().with_lines((0..3).flat_map(|_| leg()).collect());
        let executor = SimExecutor::new();

        let outcome = RouteRunner::new(RouteRunnerParams::default())
            .run(&robot, &executor, &route())
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);

        // Step 0's correction is applied before step 1, not before step 0
        assert_eq!(
            executor.actions(),
            vec![
                SimAction::Perform(MoveAction::Forward),
                SimAction::Rotate(Rotation::Left),
                SimAction::Perform(MoveAction::TurnRight),
                SimAction::Perform(MoveAction::CollectBox),
            ]
        );

        // Each episode stopped the wheels once
        let stops = robot
            .wheel_commands()
            .iter()
            .filter(|c| c.is_stop())
            .count();
        assert_eq!(stops, 3);
        assert_eq!(robot.line_colour(), Some(robot_if::LineColour::Red));
    }

    #[tokio::test]
    async fn test_halt_on_lost_line() {
        let mut lines = leg();
        lines.extend(vec![straight(), LineObservation::no_line()]);

        let robot = SimRobot::new().with_lines(lines);
        let executor = SimExecutor::new();

        let outcome = RouteRunner::new(RouteRunnerParams::default())
            .run(&robot, &executor, &route())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RouteOutcome::Halted {
                step: route().step(1).unwrap(),
                reason: FollowLineResult::NoLine
            }
        );
        // The halted step's correction and maneuver never happened
        assert_eq!(
            executor.actions(),
            vec![SimAction::Perform(MoveAction::Forward)]
        );
        assert_eq!(robot.wheel_commands().last(), Some(&WheelSpeeds::STOP));
    }

    #[tokio::test]
    async fn test_resume_after_obstacle() {
        // First observation is swallowed by the episode the obstacle cuts short
        let mut lines = vec![straight()];
        lines.extend(leg());

        let robot = SimRobot::new()
            .with_ir_distances(vec![5.0, 10.0])
            .with_lines(lines);
        let executor = SimExecutor::new();

        let params = RouteRunnerParams {
            resume_after_stop: true,
            ..Default::default()
        };
        let route = Route::new(vec![RouteEntry::new(
            MoveAction::DropBox,
            Correction::NoCorrection,
        )]);

        let outcome = RouteRunner::new(params)
            .run(&robot, &executor, &route)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);
        assert_eq!(robot.remaining_ir_distances(), 0);
        assert_eq!(
            executor.actions(),
            vec![SimAction::Perform(MoveAction::DropBox)]
        );
    }

    #[tokio::test]
    async fn test_resume_after_lost_line() {
        let mut lines = vec![straight(), LineObservation::no_line(), straight()];
        lines.extend(leg());

        let robot = SimRobot::new().with_lines(lines);
        let executor = SimExecutor::new();

        let params = RouteRunnerParams {
            resume_after_stop: true,
            ..Default::default()
        };
        let route = Route::new(vec![RouteEntry::new(
            MoveAction::Forward,
            Correction::CorrectRight,
        )]);

        let outcome = RouteRunner::new(params)
            .run(&robot, &executor, &route)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);
        assert_eq!(robot.remaining_lines(), 0);
        // A trailing correction has no step after it to apply to
        assert_eq!(
            executor.actions(),
            vec![SimAction::Perform(MoveAction::Forward)]
        );
    }

    #[test]
    fn test_rotation_from_correction() {
        assert_eq!(
            Rotation::from_correction(Correction::CorrectLeft),
            Some(Rotation::Left)
        );
        assert_eq!(
            Rotation::from_correction(Correction::CorrectRight),
            Some(Rotation::Right)
        );
        assert_eq!(Rotation::from_correction(Correction::NoCorrection), None);
    }
}
