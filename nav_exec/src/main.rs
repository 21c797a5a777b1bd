//! Main navigation executable entry point.
//!
//! # Architecture
//!
//! A single pickup and drop-off run:
//!
//!     - Load the track and the request from `nav_exec.toml`
//!     - Plan the route over the track
//!     - Run the route on the robot, following the line between intersections and dispatching
//!       each step's correction and maneuver at the intersection
//!
//! The robot is the scripted sim described by the `sim` table of the parameter file.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::info;

// Internal
use nav_lib::{
    params::NavExecParams,
    route::RoutePlanner,
    route_exec::{RouteOutcome, RouteRunner},
    sim_robot::{SimExecutor, SimRobot},
    track::{NodeId, TrackGraph},
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("nav_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    info!("Line Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: NavExecParams =
        util::params::load("nav_exec.toml").wrap_err("Could not load nav_exec params")?;

    info!("Exec parameters loaded");

    params
        .runner
        .follow
        .line_ctrl
        .check()
        .wrap_err("Invalid line control params")?;

    // ---- PLAN ROUTE ----

    let track = TrackGraph::from_spec(&params.track).wrap_err("Failed to build the track")?;
    info!("Track built with {} nodes", track.num_nodes());

    let start = resolve_node(&track, &params.start)?;
    let pickup = resolve_node(&track, &params.pickup)?;
    let dropoff = resolve_node(&track, &params.dropoff)?;

    let route = RoutePlanner::new(&track)
        .find_route(start, pickup, dropoff)
        .wrap_err("Failed to plan a route")?;

    for step in route.steps() {
        info!(
            "    {:>3}: {:?} (after {:?})",
            step.index, step.mnvr, step.pre_correction
        );
    }

    // ---- RUN ROUTE ----

    let robot = SimRobot::from_params(&params.sim);
    let executor = SimExecutor::new();

    let outcome = RouteRunner::new(params.runner)
        .run(&robot, &executor, &route)
        .await
        .wrap_err("Route execution failed")?;

    match outcome {
        RouteOutcome::Completed => info!("Run complete, box delivered"),
        RouteOutcome::Halted { step, reason } => {
            return Err(eyre!(
                "Run halted before step {} ({:?}): {:?}",
                step.index,
                step.mnvr,
                reason
            ))
        }
    }

    info!("End of execution");

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn resolve_node(track: &TrackGraph, name: &str) -> Result<NodeId, Report> {
    track
        .node_id(name)
        .ok_or_else(|| eyre!("No node named {:?} in the track", name))
}
