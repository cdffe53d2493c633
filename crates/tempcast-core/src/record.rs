use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text form of `dataDate` in the database and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One region's forecast for one day, as produced by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub region_name: String,
    pub data_date: NaiveDate,
    /// Daily maximum, degrees Celsius
    pub maxt: f64,
    /// Daily minimum, degrees Celsius
    pub mint: f64,
}

impl ForecastRecord {
    pub fn new(region_name: impl Into<String>, data_date: NaiveDate, maxt: f64, mint: f64) -> Self {
        Self {
            region_name: region_name.into(),
            data_date,
            maxt,
            mint,
        }
    }

    /// The (region, date) pair the store keys on.
    pub fn key(&self) -> (&str, NaiveDate) {
        (&self.region_name, self.data_date)
    }
}

/// A row read back from the store. Temperatures are nullable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredForecast {
    pub id: i64,
    pub region_name: String,
    pub data_date: NaiveDate,
    pub mint: Option<f64>,
    pub maxt: Option<f64>,
}

/// Aggregate view of one region's stored days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub region_name: String,
    pub days: u32,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub lowest_mint: Option<f64>,
    pub highest_maxt: Option<f64>,
}

impl RegionSummary {
    /// Temperature range widened by `padding` degrees on both ends, suitable
    /// as a chart axis domain.
    pub fn temperature_domain(&self, padding: f64) -> Option<(f64, f64)> {
        match (self.lowest_mint, self.highest_maxt) {
            (Some(low), Some(high)) => Some((low - padding, high + padding)),
            _ => None,
        }
    }
}
