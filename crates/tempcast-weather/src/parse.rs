//! Flattens the forecast document into `ForecastRecord`s.
//!
//! Parsing is all-or-nothing: one bad temperature or date fails the whole
//! document and no records are returned.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use tempcast_core::{ForecastRecord, PairingMode, ParseError, DATE_FORMAT};

use crate::types::{ApiDaily, ApiLocation, LOCATION_PATH};

/// Parse a forecast document into records, in document order.
///
/// Regions appear in the order of the `location` list; within a region, days
/// follow the order of the `MaxT` daily list. No sorting is done.
pub fn parse_records(
    document: &Value,
    pairing: PairingMode,
) -> Result<Vec<ForecastRecord>, ParseError> {
    let locations = locations(document)?;
    let location_path = LOCATION_PATH.join(".");

    let mut records = Vec::new();
    for (index, entry) in locations.iter().enumerate() {
        let location = ApiLocation::deserialize(entry).map_err(|e| ParseError::Malformed {
            path: format!("{}[{}]", location_path, index),
            message: e.to_string(),
        })?;

        let region = location.location_name.as_str();
        let max = &location.weather_elements.max_t.daily;
        let min = &location.weather_elements.min_t.daily;

        let paired = match pairing {
            PairingMode::Positional => pair_positional(region, max, min)?,
            PairingMode::ByDate => pair_by_date(region, max, min)?,
        };
        records.extend(paired);
    }

    tracing::debug!(
        "Parsed {} records from {} regions",
        records.len(),
        locations.len()
    );
    Ok(records)
}

/// Walk the fixed key path down to the `location` array.
fn locations(document: &Value) -> Result<&[Value], ParseError> {
    let mut node = document;
    for (depth, key) in LOCATION_PATH.iter().enumerate() {
        node = node.get(key).ok_or_else(|| ParseError::MissingKey {
            path: LOCATION_PATH[..=depth].join("."),
        })?;
    }

    node.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ParseError::UnexpectedType {
            path: LOCATION_PATH.join("."),
            expected: "array",
        })
}

fn pair_positional(
    region: &str,
    max: &[ApiDaily],
    min: &[ApiDaily],
) -> Result<Vec<ForecastRecord>, ParseError> {
    if max.len() != min.len() {
        tracing::warn!(
            "{}: {} MaxT entries but {} MinT entries, dropping the unpaired tail",
            region,
            max.len(),
            min.len()
        );
    }

    max.iter()
        .zip(min)
        .map(|(high, low)| {
            let data_date = parse_date(region, &high.data_date)?;
            if parse_date(region, &low.data_date)? != data_date {
                tracing::warn!(
                    "{}: MaxT date {} paired with MinT date {}",
                    region,
                    high.data_date,
                    low.data_date
                );
            }
            build_record(region, data_date, high, low)
        })
        .collect()
}

fn pair_by_date(
    region: &str,
    max: &[ApiDaily],
    min: &[ApiDaily],
) -> Result<Vec<ForecastRecord>, ParseError> {
    let mut lows: HashMap<NaiveDate, &ApiDaily> = HashMap::with_capacity(min.len());
    for low in min {
        let date = parse_date(region, &low.data_date)?;
        if let Some(previous) = lows.insert(date, low) {
            tracing::warn!(
                "{}: duplicate MinT entry for {}, using {} over {}",
                region,
                date,
                low.data_date,
                previous.data_date
            );
        }
    }

    let mut records = Vec::with_capacity(max.len());
    for high in max {
        let data_date = parse_date(region, &high.data_date)?;
        match lows.get(&data_date) {
            Some(low) => records.push(build_record(region, data_date, high, low)?),
            None => tracing::warn!(
                "{}: no MinT entry for {}, skipping day",
                region,
                high.data_date
            ),
        }
    }
    Ok(records)
}

/// `data_date` is always taken from the maximum entry.
fn build_record(
    region: &str,
    data_date: NaiveDate,
    high: &ApiDaily,
    low: &ApiDaily,
) -> Result<ForecastRecord, ParseError> {
    let maxt = temperature(region, high, "MaxT")?;
    let mint = temperature(region, low, "MinT")?;
    Ok(ForecastRecord::new(region, data_date, maxt, mint))
}

fn temperature(region: &str, day: &ApiDaily, element: &str) -> Result<f64, ParseError> {
    let raw = day.temperature.as_ref().ok_or_else(|| ParseError::MissingKey {
        path: format!("{}.{}[{}].temperature", region, element, day.data_date),
    })?;

    raw.to_celsius()
        .map_err(|value| ParseError::InvalidTemperature {
            region: region.to_string(),
            date: day.data_date.clone(),
            value,
        })
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose local date is used.
fn parse_date(region: &str, raw: &str) -> Result<NaiveDate, ParseError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ParseError::InvalidDate {
            region: region.to_string(),
            value: raw.to_string(),
        })
}
