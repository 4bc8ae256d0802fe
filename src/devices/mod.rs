//! Device models used by the dispatch simulator.

/// Grid-scale battery storage model.
pub mod battery;

pub use battery::Battery;
