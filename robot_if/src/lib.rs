//! # Robot interface crate.
//!
//! Provides the abstract robot capabilities consumed by the navigation
//! software. The hardware driver lives outside this workspace and implements
//! [`Robot`]; everything in `nav_exec` is written against this interface
//! only.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Line recognition observations and the newest-overwrites subscription
pub mod line;

/// The robot capability trait and wheel demands
pub mod robot;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use line::*;
pub use robot::*;
