//! Route entries and the step-by-step view of a route

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use crate::track::{Connection, Correction, MoveAction};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A maneuver together with the correction hint for the step after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub mnvr: MoveAction,
    pub correction: Correction,
}

/// An ordered list of route entries produced for one pickup and drop-off request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Route {
    entries: Vec<RouteEntry>,
}

/// One step of a route as the dispatcher executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    /// Position of the step within the route
    pub index: usize,

    /// The maneuver to perform at this step
    pub mnvr: MoveAction,

    /// The rotation to apply before performing `mnvr`, taken from the previous route entry
    pub pre_correction: Correction,
}

/// Iterator over the steps of a route, see [`Route::steps`].
#[derive(Debug, Clone)]
pub struct RouteSteps<'a> {
    route: &'a Route,
    next: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RouteEntry {
    pub fn new(mnvr: MoveAction, correction: Correction) -> Self {
        Self { mnvr, correction }
    }
}

impl From<&Connection> for RouteEntry {
    fn from(conn: &Connection) -> Self {
        Self::new(conn.mnvr, conn.correction)
    }
}

impl Route {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the step at `index`.
    ///
    /// The step's `pre_correction` is the correction of entry `index - 1`, or `NoCorrection` for
    /// the first step.
    pub fn step(&self, index: usize) -> Option<RouteStep> {
        let entry = self.entries.get(index)?;

        let pre_correction = match index {
            0 => Correction::NoCorrection,
            i => self.entries[i - 1].correction,
        };

        Some(RouteStep {
            index,
            mnvr: entry.mnvr,
            pre_correction,
        })
    }

    /// Iterate over the steps of the route in order.
    pub fn steps(&self) -> RouteSteps<'_> {
        RouteSteps {
            route: self,
            next: 0,
        }
    }
}

impl<'a> Iterator for RouteSteps<'a> {
    type Item = RouteStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.route.step(self.next)?;
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.route.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for RouteSteps<'a> {}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pre_correction_lags_one_step() {
        let route = Route::new(vec![
            RouteEntry::new(MoveAction::Forward, Correction::CorrectLeft),
            RouteEntry::new(MoveAction::TurnRight, Correction::NoCorrection),
            RouteEntry::new(MoveAction::TurnLeft, Correction::CorrectRight),
            RouteEntry::new(MoveAction::CollectBox, Correction::NoCorrection),
        ]);

        let steps: Vec<RouteStep> = route.steps().collect();

        assert_eq!(steps.len(), 4);
        assert_eq!(
            steps[0],
            RouteStep {
                index: 0,
                mnvr: MoveAction::Forward,
                pre_correction: Correction::NoCorrection
            }
        );
        // Step 1 picks up step 0's correction, not its own
        assert_eq!(steps[1].mnvr, MoveAction::TurnRight);
        assert_eq!(steps[1].pre_correction, Correction::CorrectLeft);
        assert_eq!(steps[2].pre_correction, Correction::NoCorrection);
        assert_eq!(steps[3].mnvr, MoveAction::CollectBox);
        assert_eq!(steps[3].pre_correction, Correction::CorrectRight);

        assert_eq!(route.step(4), None);
    }

    #[test]
    fn test_empty_route() {
        let route = Route::default();

        assert!(route.is_empty());
        assert_eq!(route.steps().len(), 0);
        assert_eq!(route.step(0), None);
    }
}
