//! Shared types and pure logic for the AgriYield Predictor client
//!
//! This crate contains everything that does not touch the network: the
//! time-series data model, the view-state reducer, series statistics, chart
//! projection and prediction-form validation. It is used by the native client
//! and, through WASM, by the browser view.

pub mod chart;
pub mod display;
pub mod models;
pub mod stats;
pub mod types;
pub mod validation;
pub mod view;

pub use chart::*;
pub use display::*;
pub use models::*;
pub use stats::*;
pub use types::*;
pub use validation::*;
pub use view::*;
