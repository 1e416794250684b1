//! Read-only data access for the time-series view

pub mod http;

use async_trait::async_trait;
use shared::{CropId, ForecastResult, HistoryResult, PerformanceResult};

use crate::error::ClientResult;

pub use http::AgriYieldClient;

/// The four time-series queries the view depends on.
///
/// All operations are idempotent reads with no ordering dependency between
/// them. Implementations must reject an out-of-range forecast horizon with
/// [`crate::ClientError::Validation`] before issuing any request.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// List crops with a trained model
    async fn list_crops(&self) -> ClientResult<Vec<CropId>>;

    /// Forecast `horizon_days` (1..=365) into the future
    async fn get_forecast(&self, crop: &CropId, horizon_days: u32) -> ClientResult<ForecastResult>;

    /// The trailing `period_days` of observed yields
    async fn get_history(&self, crop: &CropId, period_days: u32) -> ClientResult<HistoryResult>;

    /// Test-split metrics of the crop's model
    async fn get_performance(&self, crop: &CropId) -> ClientResult<PerformanceResult>;
}
