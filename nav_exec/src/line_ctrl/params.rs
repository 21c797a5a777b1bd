//! Line control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::LineCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the line following PID law.
///
/// Fixed when a follower is created.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LineCtrlParams {
    /// Normalised X position the line should sit at in the sensor's view
    pub target_x: f64,

    /// Proportional gain
    pub k_p: f64,

    /// Derivative gain, applied to the per-observation change in error
    pub k_d: f64,

    /// Integral gain, applied to the unbounded sum of all errors so far
    pub k_i: f64,

    /// Sum of the magnitudes of the left and right wheel speeds
    pub total_wheel_speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LineCtrlParams {
    fn default() -> Self {
        Self {
            target_x: 0.35,
            k_p: 3.0,
            k_d: 2.0,
            k_i: 0.0,
            total_wheel_speed: 120.0,
        }
    }
}

impl LineCtrlParams {
    /// Check the parameters can drive the robot.
    ///
    /// A zero total wheel speed would command every wheel to zero, which the driver can't tell
    /// apart from a stop.
    pub fn check(&self) -> Result<(), LineCtrlError> {
        if self.total_wheel_speed.is_finite() && self.total_wheel_speed > 0.0 {
            Ok(())
        } else {
            Err(LineCtrlError::InvalidWheelSpeed(self.total_wheel_speed))
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
