//! Client-side validation, run before any request is issued

use thiserror::Error;
use validator::Validate;

use crate::models::{
    CropType, PredictionForm, Readings, SoilType, WeatherCondition, YieldPredictionInput,
};

/// Longest forecast the backend will produce
pub const MAX_HORIZON_DAYS: u32 = 365;

/// Longest history window the backend will return (10 years)
pub const MAX_HISTORY_DAYS: u32 = 3650;

// ============================================================================
// Time-series Validations
// ============================================================================

/// Validate forecast horizon is in `[1, 365]`
pub fn validate_horizon(days: u32) -> Result<(), &'static str> {
    if days < 1 || days > MAX_HORIZON_DAYS {
        return Err("Days must be between 1 and 365");
    }
    Ok(())
}

/// Validate history period is in `[1, 3650]`
pub fn validate_history_period(days: u32) -> Result<(), &'static str> {
    if days < 1 || days > MAX_HISTORY_DAYS {
        return Err("Days must be between 1 and 3650");
    }
    Ok(())
}

// ============================================================================
// Prediction Form Validations
// ============================================================================

/// Prediction form rejected before submission
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Please fill all fields correctly and try again.")]
    MissingFields,

    #[error("Temperature, Rainfall, and Humidity must be valid numbers.")]
    NotANumber,

    #[error("{label} must be between {min} and {max}")]
    OutOfRange {
        label: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Unknown {field}: {value}")]
    UnknownOption { field: &'static str, value: String },
}

const NUMERIC_RANGES: [(&str, &str, f64, f64); 3] = [
    ("temperature", "Temperature (°C)", 10.0, 45.0),
    ("rainfall", "Rainfall (mm)", 100.0, 2000.0),
    ("humidity", "Humidity (%)", 30.0, 90.0),
];

fn parse_number(raw: &str) -> Result<f64, FormError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(FormError::NotANumber)
}

fn parse_option<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, FormError> {
    raw.parse::<T>().map_err(|_| FormError::UnknownOption {
        field,
        value: raw.trim().to_string(),
    })
}

/// Validate the raw form and convert it into a request body.
///
/// Checks run in order: required fields, numeric parsing, numeric ranges,
/// then the select options.
pub fn validate_prediction_form(form: &PredictionForm) -> Result<YieldPredictionInput, FormError> {
    if form.fields().iter().any(|(_, value)| value.trim().is_empty()) {
        return Err(FormError::MissingFields);
    }

    let readings = Readings {
        temperature: parse_number(&form.temperature)?,
        rainfall: parse_number(&form.rainfall)?,
        humidity: parse_number(&form.humidity)?,
    };

    if let Err(errors) = readings.validate() {
        let field_errors = errors.field_errors();
        // Report the first offending field in form order
        if let Some((_, label, min, max)) = NUMERIC_RANGES
            .iter()
            .find(|(field, ..)| field_errors.contains_key(field))
        {
            return Err(FormError::OutOfRange {
                label: *label,
                min: *min,
                max: *max,
            });
        }
    }

    Ok(YieldPredictionInput {
        temperature: readings.temperature,
        rainfall: readings.rainfall,
        humidity: readings.humidity,
        soil_type: parse_option::<SoilType>("soil_type", &form.soil_type)?,
        weather_condition: parse_option::<WeatherCondition>(
            "weather_condition",
            &form.weather_condition,
        )?,
        crop_type: parse_option::<CropType>("crop_type", &form.crop_type)?,
    })
}
