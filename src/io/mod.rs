/// CSV writers for dispatch and cost results.
pub mod export;
/// CSV readers for hourly demand and solar inputs.
pub mod import;
