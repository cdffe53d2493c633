//! Single-table SQLite store keyed by (region, date).

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;

use tempcast_core::{ForecastRecord, RegionSummary, StoreError, StoredForecast, DATE_FORMAT};

const UPSERT_SQL: &str = r#"
    INSERT INTO TemperatureForecasts (regionName, dataDate, mint, maxt)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT (regionName, dataDate)
    DO UPDATE SET mint = excluded.mint, maxt = excluded.maxt
"#;

/// Forecast rows, at most one per (regionName, dataDate).
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Wrap an existing connection and make sure the schema exists.
    pub fn new(conn: Connection) -> Result<Self, StoreError> {
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open (or create) a database file at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        tracing::debug!("Opening forecast store at {}", path.display());
        Self::new(Connection::open(path)?)
    }

    /// Create an in-memory store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Create the forecast table if it does not exist. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS TemperatureForecasts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                regionName TEXT NOT NULL,
                dataDate TEXT NOT NULL,
                mint REAL,
                maxt REAL,
                UNIQUE (regionName, dataDate)
            );

            CREATE INDEX IF NOT EXISTS idx_forecasts_region ON TemperatureForecasts(regionName);
            "#,
        )?;
        Ok(())
    }

    /// Insert or replace every record in one transaction.
    ///
    /// Either the whole batch is written or none of it is. Returns the number
    /// of records written.
    pub fn upsert(&mut self, records: &[ForecastRecord]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for record in records {
                if record.region_name.trim().is_empty() {
                    return Err(StoreError::InvalidRecord(format!(
                        "empty regionName for {}",
                        record.data_date
                    )));
                }

                stmt.execute(params![
                    record.region_name,
                    record.data_date.format(DATE_FORMAT).to_string(),
                    record.mint,
                    record.maxt,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!("Upserted {} forecast records", records.len());
        Ok(records.len())
    }

    /// Distinct region names, in no particular order.
    pub fn list_regions(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT regionName FROM TemperatureForecasts")?;

        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }

    /// All rows for a region, oldest date first. Unknown regions yield an
    /// empty list.
    pub fn query_by_region(&self, region: &str) -> Result<Vec<StoredForecast>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, regionName, dataDate, mint, maxt
            FROM TemperatureForecasts
            WHERE regionName = ?1
            ORDER BY date(dataDate) ASC, dataDate ASC
            "#,
        )?;

        let rows = stmt.query_map(params![region], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
            ))
        })?;

        let forecasts = rows
            .map(|row| -> Result<StoredForecast, StoreError> {
                let (id, region_name, data_date, mint, maxt) = row?;
                Ok(StoredForecast {
                    id,
                    data_date: parse_stored_date(&data_date)?,
                    region_name,
                    mint,
                    maxt,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forecasts)
    }

    /// Day count, date span and temperature extremes for a region, or `None`
    /// if nothing is stored for it.
    pub fn summarize_region(&self, region: &str) -> Result<Option<RegionSummary>, StoreError> {
        let (days, first, last, lowest_mint, highest_maxt) = self.conn.query_row(
            r#"
            SELECT COUNT(*), MIN(dataDate), MAX(dataDate), MIN(mint), MAX(maxt)
            FROM TemperatureForecasts
            WHERE regionName = ?1
            "#,
            params![region],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, Option<f64>>(4)?,
                ))
            },
        )?;

        // MIN/MAX over zero rows come back NULL.
        let (Some(first), Some(last)) = (first, last) else {
            return Ok(None);
        };

        Ok(Some(RegionSummary {
            region_name: region.to_string(),
            days,
            first_date: parse_stored_date(&first)?,
            last_date: parse_stored_date(&last)?,
            lowest_mint,
            highest_maxt,
        }))
    }

    /// Total number of stored rows.
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM TemperatureForecasts", [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| StoreError::Corrupt(format!("unreadable dataDate {:?}", raw)))
}
