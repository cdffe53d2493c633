mod cli;

use std::path::Path;
use std::process::ExitCode;

use tempcast_core::{ApiCredential, Config, IngestError, StoredForecast, DATE_FORMAT};
use tempcast_ingest::Ingestor;
use tempcast_store::ForecastStore;

use crate::cli::{Command, MissingRegion, USAGE};

/// Degrees added above and below the stored range for chart axes
const CHART_PADDING: f64 = 3.0;

#[tokio::main]
async fn main() -> ExitCode {
    load_env_file(None);

    if let Err(e) = tempcast_core::init() {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    let credential = match ApiCredential::from_env() {
        Ok(credential) => credential,
        Err(e) => return exit_with(IngestError::from(e)),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(Command::Usage) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(command) => command,
        Err(MissingRegion(mode)) => {
            eprintln!("Usage: tempcast {} <region_name>", mode);
            return ExitCode::FAILURE;
        }
    };

    match run(command, credential).await {
        Ok(code) => code,
        Err(e) => exit_with(e),
    }
}

/// Load `.env` from the working directory (or a parent), or from `path` when
/// given. A missing file is ignored; the process environment still applies.
fn load_env_file(path: Option<&Path>) {
    match path {
        Some(path) => dotenv::from_path(path).ok(),
        None => dotenv::dotenv().ok().map(|_| ()),
    };
}

fn exit_with(e: IngestError) -> ExitCode {
    tracing::error!("{}", e);
    eprintln!("[Error] {}", e.user_message());
    ExitCode::FAILURE
}

async fn run(command: Command, credential: ApiCredential) -> Result<ExitCode, IngestError> {
    match command {
        Command::Fetch => {
            let (config, mut store) = open_store()?;

            println!("Fetching CWA data ...");
            let mut ingestor = Ingestor::from_config(&config, credential)?;
            let report = ingestor.run(&mut store).await?;
            println!(
                "{} records have been written/updated.",
                report.records_written
            );
        }
        Command::Regions => {
            let (_, store) = open_store()?;
            let mut regions = store.list_regions()?;
            if regions.is_empty() {
                eprintln!("The database has no data yet. Run: tempcast fetch");
            }
            regions.sort();
            for region in regions {
                println!("{}", region);
            }
        }
        Command::Dump(region) => {
            let (_, store) = open_store()?;
            for row in store.query_by_region(&region)? {
                println!("{}", format_row(&row));
            }
        }
        Command::Summary(region) => {
            let (_, store) = open_store()?;
            let Some(summary) = store.summarize_region(&region)? else {
                eprintln!("No data stored for {}", region);
                return Ok(ExitCode::FAILURE);
            };

            println!("Region:    {}", summary.region_name);
            println!("Days:      {}", summary.days);
            println!(
                "Dates:     {} to {}",
                summary.first_date.format(DATE_FORMAT),
                summary.last_date.format(DATE_FORMAT)
            );
            println!("Lowest:    {}", format_temperature(summary.lowest_mint));
            println!("Highest:   {}", format_temperature(summary.highest_maxt));
            if let Some((low, high)) = summary.temperature_domain(CHART_PADDING) {
                println!("Chart:     {:.1} to {:.1}", low, high);
            }
        }
        Command::Usage => println!("{}", USAGE),
    }

    Ok(ExitCode::SUCCESS)
}

fn open_store() -> Result<(Config, ForecastStore), IngestError> {
    let (config, _) = Config::load_validated()?;
    let store = ForecastStore::open(&config.store.database_path)?;
    Ok((config, store))
}

fn format_row(row: &StoredForecast) -> String {
    format!(
        "{}  {}  {}",
        row.data_date.format(DATE_FORMAT),
        format_temperature(row.mint),
        format_temperature(row.maxt)
    )
}

fn format_temperature(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |t| format!("{:.1}", t))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_format_row() {
        let row = StoredForecast {
            id: 1,
            region_name: "北部地區".to_string(),
            data_date: "2025-05-12".parse().unwrap(),
            mint: Some(20.0),
            maxt: None,
        };
        assert_eq!(format_row(&row), "2025-05-12  20.0  -");
    }

    #[test]
    fn test_env_file_supplies_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "CWA_TOKEN=token-from-env-file\n").unwrap();
        std::env::remove_var(tempcast_core::CREDENTIAL_ENV);

        load_env_file(Some(&path));

        let credential = ApiCredential::from_env().unwrap();
        assert_eq!(credential.expose(), "token-from-env-file");
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        load_env_file(Some(&dir.path().join("absent.env")));
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(Some(20.0)), "20.0");
        assert_eq!(format_temperature(None), "-");
    }
}
