//! Time-series payload models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CropId, Tab};

/// Crop list returned by `/timeseries/crops`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropList {
    pub crops: Vec<CropId>,
}

/// Yield forecast for a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    #[serde(rename = "forecast_period")]
    pub horizon_days: u32,
    pub dates: Vec<NaiveDate>,
    pub predictions: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropId>,
}

impl ForecastResult {
    /// Dates and predictions are index-aligned
    pub fn is_aligned(&self) -> bool {
        self.dates.len() == self.predictions.len()
    }

    /// One date per day of the requested horizon
    pub fn covers_horizon(&self) -> bool {
        self.dates.len() == self.horizon_days as usize
    }

    /// Why the payload breaks its length invariants, if it does
    pub fn shape_error(&self) -> Option<String> {
        if !self.is_aligned() {
            Some(format!(
                "forecast has {} dates but {} predictions",
                self.dates.len(),
                self.predictions.len()
            ))
        } else if !self.covers_horizon() {
            Some(format!(
                "forecast_period is {} but {} dates were returned",
                self.horizon_days,
                self.dates.len()
            ))
        } else {
            None
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Historical yield values, oldest first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryResult {
    pub period_days: u32,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropId>,
}

/// Model performance metrics on the held-out test split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceResult {
    pub rmse: f64,
    pub mae: f64,
    /// Not clamped; can be negative for a model worse than the mean
    pub r2: f64,
    pub test_samples: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropId>,
}

/// Performance of every trained model, from `/timeseries/summary`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    pub total_crops: u32,
    pub crop_performance: Vec<PerformanceResult>,
}

impl PerformanceSummary {
    /// Sort entries by RMSE, best model first
    pub fn sort_by_rmse(&mut self) {
        self.crop_performance
            .sort_by(|a, b| a.rmse.total_cmp(&b.rmse));
    }

    pub fn best(&self) -> Option<&PerformanceResult> {
        self.crop_performance
            .iter()
            .min_by(|a, b| a.rmse.total_cmp(&b.rmse))
    }
}

/// Payload for one tab
#[derive(Debug, Clone, PartialEq)]
pub enum TabPayload {
    Forecast(ForecastResult),
    History(HistoryResult),
    Performance(PerformanceResult),
}

impl TabPayload {
    pub fn tab(&self) -> Tab {
        match self {
            TabPayload::Forecast(_) => Tab::Forecast,
            TabPayload::History(_) => Tab::History,
            TabPayload::Performance(_) => Tab::Performance,
        }
    }
}
