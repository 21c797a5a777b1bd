//! # Simulated robot
//!
//! A scripted, in-process [`Robot`] for running the navigation core without hardware.
//!
//! The sim plays back a script of IR distances and a script of line observations. One
//! observation is published when a line subscription is made and another after every non-zero
//! wheel command, which models one sensor frame per control cycle. Every wheel command is
//! recorded for inspection.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::{info, trace};
use robot_if::{
    line_channel, LineColour, LineObservation, LinePublisher, LineSubscription, Robot, RobotError,
    WheelSpeeds,
};
use serde::Deserialize;

use crate::follow::FollowError;
use crate::route_exec::{ManeuverExecutor, Rotation};
use crate::track::MoveAction;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// IR reading returned once the distance script runs out, far enough to never be an obstacle.
const DEFAULT_CLEAR_DISTANCE: f64 = 1000.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A scripted robot.
#[derive(Debug)]
pub struct SimRobot {
    state: Mutex<SimState>,

    lines: LinePublisher,
}

/// Script for a [`SimRobot`] as found in a parameter file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// IR distances returned in order
    pub ir_distances: Vec<f64>,

    /// IR distance returned once `ir_distances` is used up
    pub clear_distance: f64,

    /// Line observations published in order
    pub lines: Vec<LineObservation>,
}

/// A [`ManeuverExecutor`] which performs nothing and records what it was asked to do.
#[derive(Debug, Default)]
pub struct SimExecutor {
    actions: Mutex<Vec<SimAction>>,
}

#[derive(Debug)]
struct SimState {
    ir_script: VecDeque<f64>,
    clear_distance: f64,
    fail_ir: bool,
    line_script: VecDeque<LineObservation>,
    wheel_cmds: Vec<WheelSpeeds>,
    colour: Option<LineColour>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An action requested of a [`SimExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAction {
    Rotate(Rotation),
    Perform(MoveAction),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SimParams {
    fn default() -> Self {
        Self {
            ir_distances: Vec::new(),
            clear_distance: DEFAULT_CLEAR_DISTANCE,
            lines: Vec::new(),
        }
    }
}

impl Default for SimRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRobot {
    /// A robot with empty scripts and a clear way ahead.
    pub fn new() -> Self {
        let (lines, _) = line_channel();

        Self {
            state: Mutex::new(SimState {
                ir_script: VecDeque::new(),
                clear_distance: DEFAULT_CLEAR_DISTANCE,
                fail_ir: false,
                line_script: VecDeque::new(),
                wheel_cmds: Vec::new(),
                colour: None,
            }),
            lines,
        }
    }

    /// Build a robot from a parameter file script.
    pub fn from_params(params: &SimParams) -> Self {
        let robot = Self::new()
            .with_ir_distances(params.ir_distances.clone())
            .with_lines(params.lines.clone());
        robot.lock().clear_distance = params.clear_distance;
        robot
    }

    /// Append IR distances to the script.
    pub fn with_ir_distances(self, distances: Vec<f64>) -> Self {
        self.lock().ir_script.extend(distances);
        self
    }

    /// Append line observations to the script.
    pub fn with_lines(self, lines: Vec<LineObservation>) -> Self {
        self.lock().line_script.extend(lines);
        self
    }

    /// Make every IR read fail.
    pub fn with_failing_ir(self) -> Self {
        self.lock().fail_ir = true;
        self
    }

    /// Publish the next scripted observation, if there is one.
    pub fn publish_next_line(&self) {
        let next = self.lock().line_script.pop_front();

        if let Some(obs) = next {
            trace!("Sim publishing {:?}", obs.kind);
            self.lines.publish(obs);
        }
    }

    /// Every wheel command received so far, oldest first.
    pub fn wheel_commands(&self) -> Vec<WheelSpeeds> {
        self.lock().wheel_cmds.clone()
    }

    /// The most recently selected line colour.
    pub fn line_colour(&self) -> Option<LineColour> {
        self.lock().colour
    }

    pub fn remaining_lines(&self) -> usize {
        self.lock().line_script.len()
    }

    pub fn remaining_ir_distances(&self) -> usize {
        self.lock().ir_script.len()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        // The state stays consistent even if a holder panicked, so poisoning is ignored
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Robot for SimRobot {
    async fn set_wheel_speed(&self, speeds: WheelSpeeds) -> Result<(), RobotError> {
        self.lock().wheel_cmds.push(speeds);

        // Each drive command is one control cycle, so a new sensor frame follows it
        if !speeds.is_stop() {
            self.publish_next_line();
        }

        Ok(())
    }

    async fn get_ir_distance(&self, sensor_id: u8) -> Result<f64, RobotError> {
        let mut state = self.lock();

        if state.fail_ir {
            return Err(RobotError::SensorUnavailable(sensor_id));
        }

        let clear = state.clear_distance;
        Ok(state.ir_script.pop_front().unwrap_or(clear))
    }

    async fn set_line_recognition_colour(&self, colour: LineColour) -> Result<(), RobotError> {
        self.lock().colour = Some(colour);
        Ok(())
    }

    fn subscribe_line(&self) -> LineSubscription {
        let subscription = self.lines.subscribe();
        self.publish_next_line();
        subscription
    }
}

impl SimExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every action requested so far, oldest first.
    pub fn actions(&self) -> Vec<SimAction> {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, action: SimAction) {
        info!("Sim executor: {:?}", action);
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(action);
    }
}

#[async_trait]
impl ManeuverExecutor for SimExecutor {
    async fn rotate(&self, rotation: Rotation) -> Result<(), FollowError> {
        self.record(SimAction::Rotate(rotation));
        Ok(())
    }

    async fn perform(&self, mnvr: MoveAction) -> Result<(), FollowError> {
        self.record(SimAction::Perform(mnvr));
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use robot_if::LineKind;

    #[tokio::test]
    async fn test_sim_script_playback() {
        let robot = SimRobot::new()
            .with_ir_distances(vec![12.0])
            .with_lines(vec![
                LineObservation::new(LineKind::Straight, &[(0.1, 0.0)]),
                LineObservation::new(LineKind::Intersection, &[(0.2, 0.0)]),
            ]);

        assert_eq!(robot.get_ir_distance(1).await.unwrap(), 12.0);
        assert_eq!(robot.get_ir_distance(1).await.unwrap(), DEFAULT_CLEAR_DISTANCE);

        let mut lines = robot.subscribe_line();
        assert_eq!(lines.next().await.unwrap().kind, LineKind::Straight);

        // Stopping doesn't advance the sensor frame, driving does
        robot.set_wheel_speed(WheelSpeeds::STOP).await.unwrap();
        assert_eq!(robot.remaining_lines(), 1);
        robot
            .set_wheel_speed(WheelSpeeds::from_sides(10.0, 10.0))
            .await
            .unwrap();
        assert_eq!(lines.next().await.unwrap().kind, LineKind::Intersection);

        assert_eq!(robot.wheel_commands().len(), 2);
    }

    #[test]
    fn test_sim_params() {
        let params: SimParams = util::params::from_str(
            r#"
            ir_distances = [50.0, 10.0]
            clear_distance = 200.0

            [[lines]]
            kind = "Straight"
            points = [[0.3, 0.0], [0.32, 0.5]]

            [[lines]]
            kind = "NoLine"
            points = []
            "#,
        )
        .unwrap();

        let robot = SimRobot::from_params(&params);

        assert_eq!(robot.remaining_ir_distances(), 2);
        assert_eq!(robot.remaining_lines(), 2);
        assert_eq!(robot.lock().clear_distance, 200.0);
        assert_eq!(params.lines[0].primary_x(), Some(0.3));
    }
}
