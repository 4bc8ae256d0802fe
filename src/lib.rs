//! National grid roadmap simulator.
//!
//! Enumerates solar, wind and storage build-out scenarios over a horizon of
//! years, dispatches every year hour by hour, and prices the result as a
//! yearly cost stream discounted to an NPV.

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod forecast;
/// CSV import and export.
pub mod io;
pub mod params;
pub mod profiles;
pub mod runner;
/// Dispatch, production summaries and cost engine.
pub mod sim;
pub mod sources;
pub mod telemetry;
