//! Derived display views for the three tabs
//!
//! Each view is a pure function of one payload and is recomputed on demand;
//! nothing here is cached on the view state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::{format_value, project, project_with_captions, trailing_window, ChartBar};
use crate::models::{ForecastResult, HistoryResult, PerformanceResult};
use crate::stats::{summarize, SeriesStats};

/// Number of trailing history points drawn in the history chart
pub const HISTORY_CHART_WINDOW: usize = 30;

/// Forecast tab content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastView {
    pub period_days: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub chart: Vec<ChartBar>,
    /// `None` when the forecast is empty
    pub stats: Option<SeriesStats>,
}

impl ForecastView {
    pub fn from_result(forecast: &ForecastResult) -> Self {
        Self {
            period_days: forecast.horizon_days,
            start_date: forecast.start_date(),
            end_date: forecast.end_date(),
            chart: project_with_captions(&forecast.predictions, &forecast.dates),
            stats: summarize(&forecast.predictions).ok(),
        }
    }
}

/// History tab content.
///
/// The chart covers only the trailing window while the statistics cover the
/// full series; the two scopes are kept as separate fields on purpose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryView {
    pub period_days: u32,
    pub data_points: usize,
    pub windowed_chart: Vec<ChartBar>,
    pub full_series_stats: Option<SeriesStats>,
}

impl HistoryView {
    pub fn from_result(history: &HistoryResult) -> Self {
        Self::with_window(history, HISTORY_CHART_WINDOW)
    }

    pub fn with_window(history: &HistoryResult, window: usize) -> Self {
        Self {
            period_days: history.period_days,
            data_points: history.values.len(),
            windowed_chart: project(trailing_window(&history.values, window)),
            full_series_stats: summarize(&history.values).ok(),
        }
    }
}

/// Qualitative RMSE rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RmseRating {
    /// RMSE below 25
    Excellent,
    /// RMSE below 35
    Good,
    NeedsImprovement,
}

impl std::fmt::Display for RmseRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RmseRating::Excellent => write!(f, "Excellent"),
            RmseRating::Good => write!(f, "Good"),
            RmseRating::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Qualitative R² rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitRating {
    /// R² above 0.8
    ExcellentFit,
    /// R² above 0.6
    GoodFit,
    PoorFit,
}

impl std::fmt::Display for FitRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitRating::ExcellentFit => write!(f, "Excellent fit"),
            FitRating::GoodFit => write!(f, "Good fit"),
            FitRating::PoorFit => write!(f, "Poor fit"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelQuality {
    High,
    Medium,
}

impl std::fmt::Display for ModelQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelQuality::High => write!(f, "High Quality"),
            ModelQuality::Medium => write!(f, "Medium Quality"),
        }
    }
}

pub fn rate_rmse(rmse: f64) -> RmseRating {
    if rmse < 25.0 {
        RmseRating::Excellent
    } else if rmse < 35.0 {
        RmseRating::Good
    } else {
        RmseRating::NeedsImprovement
    }
}

pub fn rate_fit(r2: f64) -> FitRating {
    if r2 > 0.8 {
        FitRating::ExcellentFit
    } else if r2 > 0.6 {
        FitRating::GoodFit
    } else {
        FitRating::PoorFit
    }
}

pub fn classify_model(rmse: f64, r2: f64) -> ModelQuality {
    if rmse < 25.0 && r2 > 0.6 {
        ModelQuality::High
    } else {
        ModelQuality::Medium
    }
}

/// Performance tab content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceView {
    pub rmse: String,
    pub mae: String,
    pub r2: String,
    pub test_samples: u32,
    pub rmse_rating: RmseRating,
    pub fit_rating: FitRating,
    pub quality: ModelQuality,
}

impl PerformanceView {
    pub fn from_result(performance: &PerformanceResult) -> Self {
        Self {
            rmse: format_value(performance.rmse),
            mae: format_value(performance.mae),
            r2: format_value(performance.r2),
            test_samples: performance.test_samples,
            rmse_rating: rate_rmse(performance.rmse),
            fit_rating: rate_fit(performance.r2),
            quality: classify_model(performance.rmse, performance.r2),
        }
    }
}
