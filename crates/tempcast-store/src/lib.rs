//! SQLite persistence for regional temperature forecasts.

pub mod store;

pub use store::ForecastStore;
