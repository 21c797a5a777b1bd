//! # Line follower
//!
//! The PID law and steering weight mapping for following a line.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use robot_if::LineObservation;
use serde::Serialize;

// Internal
use super::{LineCtrlError, LineCtrlParams};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID line follower.
#[derive(Debug, Serialize, Clone)]
pub struct LineFollower {
    params: LineCtrlParams,

    /// The proportional error of the previous observation
    previous_error: f64,

    /// Sum of every proportional error seen so far.
    ///
    /// This is never clamped or decayed, so a long episode with a non-zero `k_i` will wind up.
    cumulative_error: f64,

    /// Terms from the most recent observation
    report: LineCtrlReport,
}

/// Controller terms from the most recent observation, for tuning.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct LineCtrlReport {
    pub p_error: f64,
    pub d_error: f64,
    pub cumulative_error: f64,

    /// The clamped PID output
    pub total_error: f64,

    pub left_weight: f64,
    pub right_weight: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LineFollower {

    /// Create a new follower with zeroed controller state.
    pub fn new(params: LineCtrlParams) -> Self {
        Self {
            params,
            previous_error: 0.0,
            cumulative_error: 0.0,
            report: LineCtrlReport::default(),
        }
    }

    pub fn params(&self) -> &LineCtrlParams {
        &self.params
    }

    /// The terms calculated for the most recent observation.
    pub fn report(&self) -> &LineCtrlReport {
        &self.report
    }

    /// Get the `(left, right)` wheel speeds for the given observation.
    ///
    /// Only the first (nearest) point of the observation is used. The observation must contain
    /// at least one point.
    pub fn get_wheel_speeds(
        &mut self,
        obs: &LineObservation
    ) -> Result<(f64, f64), LineCtrlError> {
        let actual_x = obs.primary_x().ok_or(LineCtrlError::EmptyObservation)?;

        // PID terms. The derivative and integral are per observation, not per second.
        let p_error = self.params.target_x - actual_x;
        let d_error = p_error - self.previous_error;
        self.cumulative_error += p_error;

        self.previous_error = p_error;

        let total_error = (
            p_error * self.params.k_p
            + d_error * self.params.k_d
            + self.cumulative_error * self.params.k_i
        ).clamp(-1.0, 1.0);

        let (left_weight, right_weight) = steering_weights(total_error);

        // Normalise so the magnitudes sum to the total wheel speed
        let total_weight = left_weight.abs() + right_weight.abs();
        let left_speed = self.params.total_wheel_speed * left_weight / total_weight;
        let right_speed = self.params.total_wheel_speed * right_weight / total_weight;

        self.report = LineCtrlReport {
            p_error,
            d_error,
            cumulative_error: self.cumulative_error,
            total_error,
            left_weight,
            right_weight,
        };

        trace!(
            "x = {:.3}, p = {:.3}, d = {:.3}, i = {:.3}, total = {:.3} -> L {:.1} R {:.1}",
            actual_x, p_error, d_error, self.cumulative_error, total_error, left_speed, right_speed
        );

        Ok((left_speed, right_speed))
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Map a clamped steering error onto `(left, right)` wheel weights.
///
/// Negative errors steer left, positive errors steer right. The inside wheel stays at full
/// weight while the outside wheel drops from 1 at zero error to -1 at full error.
fn steering_weights(total_error: f64) -> (f64, f64) {
    if total_error == 0.0 {
        (1.0, 1.0)
    }
    // Go left
    else if total_error < 0.0 {
        (1.0, 2.0 * total_error + 1.0)
    }
    // Go right
    else {
        (-2.0 * total_error + 1.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use robot_if::LineKind;

    const TOL: f64 = 1e-9;

    fn obs(x: f64) -> LineObservation {
        LineObservation::new(LineKind::Straight, &[(x, 0.0)])
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < TOL, "{} != {}", a, b);
    }

    #[test]
    fn test_on_target() {
        let mut follower = LineFollower::new(LineCtrlParams::default());

        let (left, right) = follower.get_wheel_speeds(&obs(0.35)).unwrap();

        assert_eq!((left, right), (60.0, 60.0));
        assert_eq!(follower.report().total_error, 0.0);
    }

    #[test]
    fn test_state_carries_between_observations() {
        let mut follower = LineFollower::new(LineCtrlParams::default());

        // First observation: p = 0.25, d = 0.25, output saturates at +1 (hard right)
        let (left, right) = follower.get_wheel_speeds(&obs(0.1)).unwrap();
        let first = *follower.report();

        assert_close(first.p_error, 0.25);
        assert_close(first.d_error, 0.25);
        assert_close(first.cumulative_error, 0.25);
        assert_close(first.total_error, 1.0);
        assert_close(left, -60.0);
        assert_close(right, 60.0);

        // Steady state: derivative vanishes, integral doubles
        let (left, right) = follower.get_wheel_speeds(&obs(0.1)).unwrap();
        let second = *follower.report();

        assert_close(second.d_error, 0.0);
        assert_close(second.cumulative_error, 2.0 * first.cumulative_error);
        assert_close(second.total_error, 0.75);
        assert_close(left, -40.0);
        assert_close(right, 80.0);
    }

    #[test]
    fn test_steer_left() {
        let mut follower = LineFollower::new(LineCtrlParams {
            k_d: 0.0,
            ..Default::default()
        });

        // Line to the right of target: p = -0.1, total = -0.3
        let (left, right) = follower.get_wheel_speeds(&obs(0.45)).unwrap();

        assert_close(follower.report().left_weight, 1.0);
        assert_close(follower.report().right_weight, 0.4);
        assert_close(left, 120.0 / 1.4);
        assert_close(right, 120.0 * 0.4 / 1.4);
    }

    #[test]
    fn test_integral_unbounded() {
        let mut follower = LineFollower::new(LineCtrlParams {
            k_i: 0.1,
            ..Default::default()
        });

        for _ in 0..1000 {
            follower.get_wheel_speeds(&obs(0.3)).unwrap();
        }

        // 1000 * 0.05, no clamping of the accumulator itself
        assert!((follower.report().cumulative_error - 50.0).abs() < 1e-6);
        assert_close(follower.report().total_error, 1.0);
    }

    #[test]
    fn test_speed_magnitudes_sum_to_total() {
        let mut stateful = LineFollower::new(LineCtrlParams {
            k_i: 0.2,
            ..Default::default()
        });

        let mut x = -2.0;
        while x <= 3.0 {
            let mut fresh = LineFollower::new(LineCtrlParams::default());

            for follower in [&mut fresh, &mut stateful].iter_mut() {
                let (left, right) = follower.get_wheel_speeds(&obs(x)).unwrap();
                let total = follower.params().total_wheel_speed;

                assert!((left.abs() + right.abs() - total).abs() < 1e-6);
                assert!(left.abs() <= total + 1e-6 && right.abs() <= total + 1e-6);
            }

            x += 0.01;
        }
    }

    #[test]
    fn test_only_primary_point_used() {
        let mut a = LineFollower::new(LineCtrlParams::default());
        let mut b = LineFollower::new(LineCtrlParams::default());

        let single = obs(0.2);
        let many = LineObservation::new(LineKind::Straight, &[(0.2, 0.0), (0.9, 0.5), (0.0, 1.0)]);

        assert_eq!(a.get_wheel_speeds(&single), b.get_wheel_speeds(&many));
    }

    #[test]
    fn test_empty_observation() {
        let mut follower = LineFollower::new(LineCtrlParams::default());

        assert_eq!(
            follower.get_wheel_speeds(&LineObservation::new(LineKind::Straight, &[])),
            Err(LineCtrlError::EmptyObservation)
        );
        // State untouched by the rejected observation
        assert_eq!(*follower.report(), LineCtrlReport::default());
    }

    #[test]
    fn test_steering_weights() {
        assert_eq!(steering_weights(0.0), (1.0, 1.0));
        assert_eq!(steering_weights(-1.0), (1.0, -1.0));
        assert_eq!(steering_weights(1.0), (-1.0, 1.0));
        assert_eq!(steering_weights(0.5), (0.0, 1.0));
    }
}
