use std::collections::HashSet;

use tempcast_core::{ApiCredential, Config, IngestError, PairingMode};
use tempcast_store::ForecastStore;
use tempcast_weather::{parse_records, ForecastClient};

use crate::stage::IngestStage;

/// Outcome of a successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub records_written: usize,
    pub regions: usize,
}

/// Runs fetch → parse → upsert against a store.
///
/// Stages run strictly in order and nothing is retried. A failed fetch or
/// parse never reaches the store.
#[derive(Debug)]
pub struct Ingestor {
    client: ForecastClient,
    pairing: PairingMode,
    stage: IngestStage,
}

impl Ingestor {
    pub fn new(client: ForecastClient, pairing: PairingMode) -> Self {
        Self {
            client,
            pairing,
            stage: IngestStage::Idle,
        }
    }

    /// Build the client from configuration and an explicit credential.
    pub fn from_config(config: &Config, credential: ApiCredential) -> Result<Self, IngestError> {
        let client = ForecastClient::new(credential, &config.api)?;
        Ok(Self::new(client, config.ingest.pairing))
    }

    /// Stage reached by the most recent `run`.
    pub fn stage(&self) -> IngestStage {
        self.stage
    }

    /// Run one ingestion cycle.
    pub async fn run(&mut self, store: &mut ForecastStore) -> Result<IngestReport, IngestError> {
        self.stage = IngestStage::Idle;

        match self.cycle(store).await {
            Ok(report) => {
                self.advance();
                tracing::info!(
                    "{} records written for {} regions",
                    report.records_written,
                    report.regions
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Ingestion failed while {}: {}", self.stage, e);
                self.stage = IngestStage::Failed;
                Err(e)
            }
        }
    }

    async fn cycle(&mut self, store: &mut ForecastStore) -> Result<IngestReport, IngestError> {
        self.advance();
        let document = self.client.fetch().await?;

        self.advance();
        let records = parse_records(&document, self.pairing)?;

        self.advance();
        let records_written = store.upsert(&records)?;

        let regions = records
            .iter()
            .map(|r| r.region_name.as_str())
            .collect::<HashSet<_>>()
            .len();

        Ok(IngestReport {
            records_written,
            regions,
        })
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            tracing::debug!("Ingest stage {} -> {}", self.stage, next);
            self.stage = next;
        }
    }
}
