//! Error types for the simulation core.

use thiserror::Error;

use crate::sources::EnergySource;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid roadmap: {field} {message}")]
    InvalidRoadmap { field: String, message: String },

    #[error("year {year} is not covered by any interpolation range of `{param}`")]
    YearOutOfRange { param: String, year: i32 },

    #[error("cannot predict demand for {target_year}: series starts in {series_year}")]
    PredictBeforeSeries { series_year: i32, target_year: i32 },

    #[error("solar ratio at hour {hour} is {value}, expected a value in [0, 1]")]
    RatioOutOfRange { hour: usize, value: f64 },

    #[error("hourly series length mismatch: expected {expected} hours, got {actual} for {what}")]
    LengthMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("{0} is not a fixed generation source")]
    NotFixedSource(EnergySource),

    #[error("invalid parameter `{param}`: {message}")]
    InvalidParameter { param: String, message: String },

    #[error("input data error: {0}")]
    Input(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
