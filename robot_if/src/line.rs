//! # Line Recognition Interface
//!
//! The robot's line recognition produces a [`LineObservation`] each frame. Observations are
//! delivered through a [`LineSubscription`], which only ever holds the most recent observation:
//! if the consumer is slower than the sensor, stale observations are overwritten rather than
//! queued.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One sample of perceived line geometry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineObservation {
    /// What the line recognition thinks it is looking at
    pub kind: LineKind,

    /// Points along the detected line, ordered nearest first.
    ///
    /// X is normalised across the sensor width, so lies roughly in `[0, 1]`. Empty when `kind`
    /// is [`LineKind::NoLine`].
    pub points: Vec<Point2<f64>>,
}

/// Receiving end of the line observation stream.
#[derive(Debug, Clone)]
pub struct LineSubscription {
    rx: watch::Receiver<LineObservation>,
}

/// Sending end of the line observation stream, held by the driver.
#[derive(Debug)]
pub struct LinePublisher {
    tx: watch::Sender<LineObservation>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Classification of a line observation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    NoLine,
    Straight,
    Intersection,
}

/// Colour the line recognition is configured to track.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineColour {
    Red,
    Green,
    Blue,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Create a connected publisher/subscription pair.
///
/// The initial value is a `NoLine` observation which is marked as already seen, so the first call
/// to [`LineSubscription::next`] waits for the first real publish.
pub fn line_channel() -> (LinePublisher, LineSubscription) {
    let (tx, rx) = watch::channel(LineObservation::no_line());

    (LinePublisher { tx }, LineSubscription { rx })
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LineObservation {
    /// An observation with no line in view.
    pub fn no_line() -> Self {
        Self {
            kind: LineKind::NoLine,
            points: Vec::new(),
        }
    }

    /// Build an observation from a list of `(x, y)` pairs.
    pub fn new(kind: LineKind, points: &[(f64, f64)]) -> Self {
        Self {
            kind,
            points: points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    /// Returns true if this observation actually contains a usable line.
    ///
    /// An observation claiming a line but carrying no points is not usable.
    pub fn has_line(&self) -> bool {
        self.kind != LineKind::NoLine && !self.points.is_empty()
    }

    /// The X coordinate of the nearest (primary) point, if there is one.
    pub fn primary_x(&self) -> Option<f64> {
        self.points.first().map(|p| p.x)
    }
}

impl LineSubscription {
    /// Wait for the next observation.
    ///
    /// Returns the newest observation published since the last call, skipping any that were
    /// overwritten in the meantime. Returns `None` once the publisher has been dropped.
    pub async fn next(&mut self) -> Option<LineObservation> {
        if self.rx.changed().await.is_err() {
            debug!("Line observation stream closed");
            return None;
        }

        let obs = self.rx.borrow().clone();
        Some(obs)
    }
}

impl LinePublisher {
    /// Publish a new observation, overwriting any unread one.
    pub fn publish(&self, obs: LineObservation) {
        trace!(
            "Publishing {:?} observation with {} points to {} subscribers",
            obs.kind,
            obs.points.len(),
            self.tx.receiver_count()
        );

        // Replace rather than send so that publishing with no subscribers is not an error
        self.tx.send_replace(obs);
    }

    /// Create a new subscription to this publisher.
    ///
    /// The current value is treated as already seen by the new subscription.
    pub fn subscribe(&self) -> LineSubscription {
        LineSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
