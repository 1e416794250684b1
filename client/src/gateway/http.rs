//! HTTP client for the AgriYield backend
//!
//! Talks JSON to the time-series endpoints and to `/predict`, which may be
//! served from a different base URL.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use shared::{
    CropId, CropList, ForecastResult, HistoryResult, PerformanceResult, PerformanceSummary,
    PredictionOptions, PredictionResponse, YieldPredictionInput,
};

use super::DataGateway;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// AgriYield backend client
#[derive(Clone)]
pub struct AgriYieldClient {
    client: Client,
    base_url: String,
    prediction_base_url: String,
}

impl AgriYieldClient {
    /// Create a client with no request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            prediction_base_url: base_url.clone(),
            base_url,
        }
    }

    /// Create a client from the `api` configuration section
    pub fn from_config(api: &ApiConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = api.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: api.base_url.clone(),
            prediction_base_url: api.prediction_url().to_string(),
        })
    }

    /// Serve `/predict` from a different base URL
    pub fn with_prediction_url(mut self, prediction_base_url: impl Into<String>) -> Self {
        self.prediction_base_url = prediction_base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(base: &str, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| ClientError::Configuration(format!("Invalid base URL '{}': {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Configuration(format!("Base URL '{}' cannot have a path", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a response into `T`, surfacing the backend's `detail` on failure
    async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|detail| match detail {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            });

        let message = detail
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        tracing::warn!(status = status.as_u16(), %message, "Backend returned an error");

        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, u32)],
    ) -> ClientResult<T> {
        let url = Self::endpoint(&self.base_url, segments)?;
        tracing::debug!(%url, ?query, "GET");

        let response = self.client.get(url).query(query).send().await?;
        Self::read_json(response).await
    }

    /// Check the backend is reachable
    pub async fn health_check(&self) -> ClientResult<()> {
        let url = Self::endpoint(&self.base_url, &["health-check"])?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Server {
                status: response.status().as_u16(),
                message: format!("Request failed with status code {}", response.status().as_u16()),
            });
        }
        Ok(())
    }

    /// Performance of every trained model, best RMSE first
    pub async fn get_summary(&self) -> ClientResult<PerformanceSummary> {
        let mut summary: PerformanceSummary =
            self.get_json(&["timeseries", "summary"], &[]).await?;
        summary.sort_by_rmse();
        Ok(summary)
    }

    /// Option lists for the prediction form's selects
    pub async fn prediction_options(&self) -> ClientResult<PredictionOptions> {
        let (crop_types, soil_types, weather_conditions) = tokio::try_join!(
            self.get_json::<Vec<String>>(&["crop_types"], &[]),
            self.get_json::<Vec<String>>(&["soil_types"], &[]),
            self.get_json::<Vec<String>>(&["weather_conditions"], &[]),
        )?;
        Ok(PredictionOptions {
            crop_types,
            soil_types,
            weather_conditions,
        })
    }

    /// Submit a validated single-point prediction
    pub async fn predict(&self, input: &YieldPredictionInput) -> ClientResult<PredictionResponse> {
        let url = Self::endpoint(&self.prediction_base_url, &["predict"])?;
        tracing::debug!(%url, "POST");

        let response = self.client.post(url).json(input).send().await?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl DataGateway for AgriYieldClient {
    async fn list_crops(&self) -> ClientResult<Vec<CropId>> {
        let list: CropList = self.get_json(&["timeseries", "crops"], &[]).await?;
        Ok(list.crops)
    }

    async fn get_forecast(&self, crop: &CropId, horizon_days: u32) -> ClientResult<ForecastResult> {
        shared::validate_horizon(horizon_days)
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let forecast: ForecastResult = self
            .get_json(
                &["timeseries", "forecast", crop.as_str()],
                &[("days", horizon_days)],
            )
            .await?;

        match forecast.shape_error() {
            Some(reason) => Err(ClientError::Decode(reason)),
            None => Ok(forecast),
        }
    }

    async fn get_history(&self, crop: &CropId, period_days: u32) -> ClientResult<HistoryResult> {
        shared::validate_history_period(period_days)
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        self.get_json(
            &["timeseries", "history", crop.as_str()],
            &[("days", period_days)],
        )
        .await
    }

    async fn get_performance(&self, crop: &CropId) -> ClientResult<PerformanceResult> {
        self.get_json(&["timeseries", "performance", crop.as_str()], &[])
            .await
    }
}
