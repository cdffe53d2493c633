//! Serde shapes for the per-region part of the forecast document.
//!
//! Only the fields the parser reads are modelled; everything else in the
//! upstream payload is ignored.

use serde::Deserialize;

/// Key path from the document root to the list of regions.
pub const LOCATION_PATH: [&str; 7] = [
    "cwaopendata",
    "resources",
    "resource",
    "data",
    "agrWeatherForecasts",
    "weatherForecasts",
    "location",
];

/// One entry of the `location` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiLocation {
    #[serde(rename = "locationName")]
    pub location_name: String,
    #[serde(rename = "weatherElements")]
    pub weather_elements: ApiWeatherElements,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiWeatherElements {
    #[serde(rename = "MaxT", default)]
    pub max_t: ApiElement,
    #[serde(rename = "MinT", default)]
    pub min_t: ApiElement,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiElement {
    #[serde(default)]
    pub daily: Vec<ApiDaily>,
}

/// One day of one element. `temperature` is optional here so that its
/// absence can be reported with the region and date attached.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDaily {
    #[serde(rename = "dataDate")]
    pub data_date: String,
    #[serde(default)]
    pub temperature: Option<ApiTemperature>,
}

/// Temperatures arrive as strings (`"30"`), occasionally as bare numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiTemperature {
    Number(f64),
    Text(String),
}

impl ApiTemperature {
    /// Coerce to a finite `f64`, returning the raw text on failure.
    pub fn to_celsius(&self) -> Result<f64, String> {
        let value = match self {
            ApiTemperature::Number(n) => *n,
            ApiTemperature::Text(s) => s.trim().parse::<f64>().map_err(|_| s.clone())?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.raw())
        }
    }

    fn raw(&self) -> String {
        match self {
            ApiTemperature::Number(n) => n.to_string(),
            ApiTemperature::Text(s) => s.clone(),
        }
    }
}
