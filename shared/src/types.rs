//! Common types used across the client

use serde::{Deserialize, Serialize};

/// Opaque crop identifier as returned by the backend.
///
/// The empty identifier means "no crop selected".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CropId(String);

impl CropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "no selection" identifier
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn is_selected(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CropId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CropId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The three mutually exclusive data views of the time-series page
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Forecast,
    History,
    Performance,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Forecast, Tab::History, Tab::Performance];

    pub fn code(&self) -> &'static str {
        match self {
            Tab::Forecast => "forecast",
            Tab::History => "history",
            Tab::Performance => "performance",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Forecast => write!(f, "Forecast"),
            Tab::History => write!(f, "History"),
            Tab::Performance => write!(f, "Performance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_crop_is_no_selection() {
        assert!(!CropId::none().is_selected());
        assert!(!CropId::default().is_selected());
        assert!(CropId::from("Wheat").is_selected());
    }

    #[test]
    fn test_crop_id_is_transparent_in_json() {
        let crops: Vec<CropId> = serde_json::from_str(r#"["Wheat","Rice"]"#).unwrap();
        assert_eq!(crops, vec![CropId::from("Wheat"), CropId::from("Rice")]);
        assert_eq!(serde_json::to_string(&crops[0]).unwrap(), r#""Wheat""#);
    }

    #[test]
    fn test_tab_codes() {
        assert_eq!(Tab::Forecast.code(), "forecast");
        assert_eq!(Tab::History.to_string(), "History");
        assert_eq!(Tab::default(), Tab::Forecast);
    }
}
