//! Line following episode parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::line_ctrl::{LineCtrlError, LineCtrlParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FollowParams {
    /// The IR sensor used to look for obstacles ahead
    pub ir_sensor_id: u8,

    /// Distances strictly below this are treated as an obstacle
    pub obstacle_distance: f64,

    /// Pause between obstacle sensor readings, in milliseconds.
    ///
    /// Zero means read again as soon as the line follower has had a chance to run.
    pub obstacle_poll_period_ms: u64,

    /// Parameters for the line controller built for each episode
    pub line_ctrl: LineCtrlParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for FollowParams {
    fn default() -> Self {
        Self {
            ir_sensor_id: 1,
            obstacle_distance: 30.0,
            obstacle_poll_period_ms: 0,
            line_ctrl: LineCtrlParams::default(),
        }
    }
}

impl FollowParams {
    /// Copy of these parameters with a different total wheel speed.
    ///
    /// The speed must be positive and finite.
    pub fn with_speed(mut self, total_wheel_speed: f64) -> Result<Self, LineCtrlError> {
        self.line_ctrl.total_wheel_speed = total_wheel_speed;
        self.line_ctrl.check()?;
        Ok(self)
    }
}
