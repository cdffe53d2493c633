//! One ingestion cycle: fetch the forecast, parse it, upsert it.

pub mod ingestor;
pub mod stage;

pub use ingestor::{IngestReport, Ingestor};
pub use stage::IngestStage;
