//! Pickup and drop-off route planner

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};

use crate::track::{Correction, MoveAction, NodeId, TrackGraph};

use super::{shortest_path, Route, RouteEntry, RouteError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Plans routes over a borrowed track.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    track: &'a TrackGraph,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<'a> RoutePlanner<'a> {
    pub fn new(track: &'a TrackGraph) -> Self {
        Self { track }
    }

    /// Plan a route which drives from `start` to `pickup`, collects the box, drives on to
    /// `dropoff` and drops it.
    ///
    /// The route is made up of:
    /// - the maneuvers of the start to pickup leg,
    /// - a `CollectBox` step,
    /// - the maneuvers of the pickup to drop-off leg, minus its first maneuver, since the robot
    ///   is already on that connection once the box has been collected,
    /// - a `DropBox` step.
    ///
    /// Either leg failing to find a path fails the whole plan, no partial route is returned.
    pub fn find_route(
        &self,
        start: NodeId,
        pickup: NodeId,
        dropoff: NodeId,
    ) -> Result<Route, RouteError> {
        if pickup == dropoff {
            return Err(RouteError::PickupIsDropoff(pickup));
        }

        let pickup_path = shortest_path(self.track, start, pickup)?;
        let drop_path = shortest_path(self.track, pickup, dropoff)?;

        debug!(
            "Pickup leg visits {} nodes, drop-off leg visits {} nodes",
            pickup_path.len(),
            drop_path.len()
        );

        let pickup_leg = self.maneuvers_from_path(&pickup_path)?;
        let drop_leg = self.maneuvers_from_path(&drop_path)?;

        let mut entries = Vec::with_capacity(pickup_leg.len() + drop_leg.len() + 1);

        entries.extend(pickup_leg);
        entries.push(RouteEntry::new(MoveAction::CollectBox, Correction::NoCorrection));
        // pickup != dropoff so the drop leg has at least one connection
        entries.extend(drop_leg.into_iter().skip(1));
        entries.push(RouteEntry::new(MoveAction::DropBox, Correction::NoCorrection));

        let route = Route::new(entries);

        info!(
            "Planned route {} -> {} -> {} with {} steps",
            self.node_label(start),
            self.node_label(pickup),
            self.node_label(dropoff),
            route.len()
        );

        Ok(route)
    }

    /// Convert a node sequence into the route entries of the connections between consecutive
    /// nodes.
    ///
    /// Every consecutive pair must be connected in the track, otherwise the path is inconsistent
    /// with the graph and `InconsistentGraph` is returned.
    pub fn maneuvers_from_path(&self, path: &[NodeId]) -> Result<Vec<RouteEntry>, RouteError> {
        path.windows(2)
            .map(|pair| {
                self.track
                    .connection(pair[0], pair[1])
                    .map(RouteEntry::from)
                    .ok_or(RouteError::InconsistentGraph {
                        from: pair[0],
                        to: pair[1],
                    })
            })
            .collect()
    }

    fn node_label(&self, id: NodeId) -> String {
        match self.track.name(id) {
            Some(name) => format!("{:?}", name),
            None => id.to_string(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
