//! AgriYield Predictor client
//!
//! Client-side orchestration for the crop-yield service: the time-series
//! view (crop selection, forecast / history / performance tabs) and the
//! single-point prediction form. The backend is reached over HTTP through
//! [`gateway::DataGateway`].

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod prediction;
pub mod render;

pub use config::Config;
pub use controller::TabController;
pub use error::{ClientError, ClientResult};
pub use gateway::{AgriYieldClient, DataGateway};
pub use prediction::PredictionService;
