//! Single-point yield prediction models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Soil types offered by the prediction form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Peaty,
    Silty,
}

/// Weather conditions offered by the prediction form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeatherCondition {
    Sunny,
    Rainy,
    Stormy,
    Cloudy,
}

/// Crop types offered by the prediction form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CropType {
    Wheat,
    Barley,
    Corn,
    Soybeans,
    Rice,
}

macro_rules! form_option {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or(())
            }
        }
    };
}

form_option!(SoilType { Clay, Sandy, Loamy, Peaty, Silty });
form_option!(WeatherCondition { Sunny, Rainy, Stormy, Cloudy });
form_option!(CropType { Wheat, Barley, Corn, Soybeans, Rice });

/// Raw prediction form as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionForm {
    pub temperature: String,
    pub rainfall: String,
    pub humidity: String,
    pub soil_type: String,
    pub weather_condition: String,
    pub crop_type: String,
}

impl PredictionForm {
    /// Field names paired with their raw values, in form order
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("temperature", &self.temperature),
            ("rainfall", &self.rainfall),
            ("humidity", &self.humidity),
            ("soil_type", &self.soil_type),
            ("weather_condition", &self.weather_condition),
            ("crop_type", &self.crop_type),
        ]
    }
}

/// Numeric half of the form; ranges are checked before the selects are read
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct Readings {
    /// Degrees Celsius
    #[validate(range(min = 10.0, max = 45.0))]
    pub temperature: f64,
    /// Millimetres per year
    #[validate(range(min = 100.0, max = 2000.0))]
    pub rainfall: f64,
    /// Percent
    #[validate(range(min = 30.0, max = 90.0))]
    pub humidity: f64,
}

/// Validated body of `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldPredictionInput {
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub soil_type: SoilType,
    pub weather_condition: WeatherCondition,
    pub crop_type: CropType,
}

/// Successful prediction response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResponse {
    pub predicted_yield: f64,
}

/// Option lists backing the prediction form's select inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionOptions {
    pub crop_types: Vec<String>,
    pub soil_types: Vec<String>,
    pub weather_conditions: Vec<String>,
}

/// What the prediction form displays after a submit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionFormState {
    pub predicted_yield: Option<f64>,
    pub error_message: Option<String>,
}

impl PredictionFormState {
    /// Reset before a new submission
    pub fn begin_submit(&mut self) {
        self.predicted_yield = None;
        self.error_message = None;
    }

    pub fn succeed(&mut self, predicted_yield: f64) {
        self.predicted_yield = Some(predicted_yield);
        self.error_message = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.predicted_yield = None;
        self.error_message = Some(message.into());
    }
}
