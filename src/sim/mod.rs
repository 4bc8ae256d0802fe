/// Yearly cost and NPV engine.
pub mod costs;
/// Hourly merit-order dispatch.
pub mod dispatch;
pub mod kpi;
pub mod types;
