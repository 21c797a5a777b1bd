//! # Line control module
//!
//! Line control keeps the robot centred on a painted line. Each [`LineObservation`] from the line
//! recognition gives the normalised X position of the nearest point of the line; the difference
//! between this and the target X is the error fed into a PID law.
//!
//! The PID output is clamped to `[-1, 1]` and mapped onto a pair of wheel weights. The wheel on
//! the inside of the turn keeps full weight while the outer wheel's weight falls linearly, down
//! to full reverse at maximum error. The weights are then normalised so the magnitudes of the two
//! wheel speeds always add up to the configured total wheel speed.
//!
//! Controller state is owned by a single [`LineFollower`] and lives for one following episode.
//! There is no reset; start a new episode with a new follower.
//!
//! [`LineObservation`]: robot_if::LineObservation

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod follower;
pub mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use follower::*;
pub use params::LineCtrlParams;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during line control.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LineCtrlError {
    #[error("The observation contains no line points to steer towards")]
    EmptyObservation,

    #[error("The total wheel speed must be positive and finite, found {0}")]
    InvalidWheelSpeed(f64),
}
