//! CWA agricultural weather forecast access for tempcast
//!
//! Fetches the `F-A0010-001` dataset and flattens it into per-region,
//! per-day temperature records.

pub mod client;
pub mod parse;
pub mod types;

pub use client::ForecastClient;
pub use parse::parse_records;
