//! WebAssembly module for AgriYield Predictor
//!
//! Provides client-side computation for:
//! - Series statistics and chart projection
//! - Forecast / history / performance view derivation
//! - Horizon and prediction form validation
//!
//! Structured inputs and outputs cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    classify_model, project, rate_fit, rate_rmse, summarize, validate_horizon,
    validate_prediction_form, ForecastResult, ForecastView, HistoryResult, HistoryView,
    PerformanceResult, PerformanceView, PredictionForm, HISTORY_CHART_WINDOW,
};

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn parse<'a, T: serde::Deserialize<'a>>(what: &str, json: &'a str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

/// Log to the browser console and hand the message back to JavaScript
fn js_error(message: String) -> JsValue {
    let value = JsValue::from_str(&message);
    web_sys::console::warn_1(&value);
    value
}

fn series_stats_json(values: &[f64]) -> Result<String, String> {
    let stats = summarize(values).map_err(|e| e.to_string())?;
    to_json(&stats)
}

fn forecast_view_json(forecast_json: &str) -> Result<String, String> {
    let forecast: ForecastResult = parse("forecast", forecast_json)?;
    if let Some(reason) = forecast.shape_error() {
        return Err(reason);
    }
    to_json(&ForecastView::from_result(&forecast))
}

fn history_view_json(history_json: &str, window: usize) -> Result<String, String> {
    let history: HistoryResult = parse("history", history_json)?;
    to_json(&HistoryView::with_window(&history, window))
}

fn performance_view_json(performance_json: &str) -> Result<String, String> {
    let performance: PerformanceResult = parse("performance", performance_json)?;
    to_json(&PerformanceView::from_result(&performance))
}

fn prediction_input_json(form_json: &str) -> Result<String, String> {
    let form: PredictionForm = parse("form", form_json)?;
    let input = validate_prediction_form(&form).map_err(|e| e.to_string())?;
    to_json(&input)
}

/// Min / max / mean of a series, as JSON
#[wasm_bindgen]
pub fn summarize_series(values: &[f64]) -> Result<String, JsValue> {
    series_stats_json(values).map_err(js_error)
}

/// Normalized bar heights for a series, as a JSON array of bars
#[wasm_bindgen]
pub fn project_chart(values: &[f64]) -> Result<String, JsValue> {
    to_json(&project(values)).map_err(js_error)
}

/// Derive the forecast tab's display model from a forecast response
#[wasm_bindgen]
pub fn forecast_view(forecast_json: &str) -> Result<String, JsValue> {
    forecast_view_json(forecast_json).map_err(js_error)
}

/// Derive the history tab's display model; a `window` of 0 uses the default
#[wasm_bindgen]
pub fn history_view(history_json: &str, window: usize) -> Result<String, JsValue> {
    let window = if window == 0 {
        HISTORY_CHART_WINDOW
    } else {
        window
    };
    history_view_json(history_json, window).map_err(js_error)
}

/// Derive the performance tab's display model from a performance response
#[wasm_bindgen]
pub fn performance_view(performance_json: &str) -> Result<String, JsValue> {
    performance_view_json(performance_json).map_err(js_error)
}

/// Validation message for a forecast horizon, or nothing when it is valid
#[wasm_bindgen]
pub fn horizon_error(days: u32) -> Option<String> {
    validate_horizon(days).err().map(str::to_string)
}

/// Validate the raw prediction form and return the request body as JSON
#[wasm_bindgen]
pub fn validate_prediction(form_json: &str) -> Result<String, JsValue> {
    prediction_input_json(form_json).map_err(js_error)
}

#[wasm_bindgen]
pub fn rmse_rating(rmse: f64) -> String {
    rate_rmse(rmse).to_string()
}

#[wasm_bindgen]
pub fn fit_rating(r2: f64) -> String {
    rate_fit(r2).to_string()
}

#[wasm_bindgen]
pub fn model_quality(rmse: f64, r2: f64) -> String {
    classify_model(rmse, r2).to_string()
}
