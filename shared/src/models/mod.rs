//! Data models for the time-series view and the prediction form

mod prediction;
mod timeseries;

pub use prediction::*;
pub use timeseries::*;
