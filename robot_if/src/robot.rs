//! # Robot Capabilities
//!
//! The [`Robot`] trait is the seam between the navigation core and the hardware driver. Every
//! method is an await point, which is where the line follower and obstacle watchdog interleave.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::line::{LineColour, LineSubscription};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Capabilities the hardware driver provides to the navigation core.
#[async_trait]
pub trait Robot: Send + Sync {
    /// Command the four wheel speeds.
    async fn set_wheel_speed(&self, speeds: WheelSpeeds) -> Result<(), RobotError>;

    /// Read the distance reported by the given IR proximity sensor.
    async fn get_ir_distance(&self, sensor_id: u8) -> Result<f64, RobotError>;

    /// Select the colour the line recognition tracks.
    async fn set_line_recognition_colour(&self, colour: LineColour) -> Result<(), RobotError>;

    /// Subscribe to the line observation stream.
    ///
    /// Only observations published after subscribing are delivered.
    fn subscribe_line(&self) -> LineSubscription;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Speed demands for the four wheels, in the driver's speed units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    pub front_right: f64,
    pub front_left: f64,
    pub back_left: f64,
    pub back_right: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors reported by the hardware driver.
#[derive(Debug, thiserror::Error)]
pub enum RobotError {
    #[error("The robot is not connected")]
    NotConnected,

    #[error("The driver rejected the command: {0}")]
    CommandRejected(String),

    #[error("Sensor {0} could not be read")]
    SensorUnavailable(u8),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WheelSpeeds {
    /// All wheels stopped.
    pub const STOP: WheelSpeeds = WheelSpeeds {
        front_right: 0.0,
        front_left: 0.0,
        back_left: 0.0,
        back_right: 0.0,
    };

    /// Drive the four wheels as a differential pair, both wheels on a side getting the same
    /// speed.
    pub fn from_sides(left: f64, right: f64) -> Self {
        Self {
            front_right: right,
            front_left: left,
            back_left: left,
            back_right: right,
        }
    }

    /// The speeds in driver argument order: front right, front left, back left, back right.
    pub fn as_driver_args(&self) -> [f64; 4] {
        [self.front_right, self.front_left, self.back_left, self.back_right]
    }

    /// Returns true if every wheel is commanded to zero.
    pub fn is_stop(&self) -> bool {
        self.as_driver_args().iter().all(|s| *s == 0.0)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
