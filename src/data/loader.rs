use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;

use crate::config::GroupingConfig;

use super::model::{GasRecord, MonthlyRecord, Session, ShareRecord};
use super::reshape;
use super::DataError;

// ---------------------------------------------------------------------------
// Fixed file names inside the data directory
// ---------------------------------------------------------------------------

pub const ANNUAL_FILE: &str = "annual_surface_temperature_change.csv";
pub const MONTHLY_FILE: &str = "monthly_surface_temperature_change.csv";
pub const GAS_FILE: &str = "global_warming_by_gas_and_source.csv";
pub const SHARE_FILE: &str = "share_of_contribution_to_global_warming.csv";
pub const CONFIG_FILE: &str = "grouping.json";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a complete session from a data directory.
///
/// Reads the four CSV files by fixed name, melts the wide tables into
/// long records and builds the session lookups. Any missing file,
/// unreadable content or unexpected column layout aborts the whole load
/// with the corresponding [`DataError`].
pub fn load_session(dir: &Path) -> Result<Session, DataError> {
    let config = load_config(&dir.join(CONFIG_FILE))?;
    let annual = load_annual(&dir.join(ANNUAL_FILE), &config)?;
    let monthly = load_monthly(&dir.join(MONTHLY_FILE))?;
    let gas = load_gas(&dir.join(GAS_FILE))?;
    let shares = load_share(&dir.join(SHARE_FILE))?;
    Ok(Session::from_tables(annual, monthly, gas, shares, config))
}

/// Read the optional grouping config. A missing file means defaults;
/// invalid JSON is a schema error rather than a silent fallback.
pub fn load_config(path: &Path) -> Result<GroupingConfig, DataError> {
    if !path.exists() {
        return Ok(GroupingConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|e| DataError::load(path, e))?;
    serde_json::from_str(&text)
        .map_err(|e| DataError::schema(path, format!("invalid grouping config: {e}")))
}

// ---------------------------------------------------------------------------
// Per-file loaders
// ---------------------------------------------------------------------------

/// Read a CSV file into (headers, rows). Open and read failures are
/// load errors; header/value validation happens in the callers.
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<StringRecord>), DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::load(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::load(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result.map_err(|e| DataError::load(path, e))?);
    }
    Ok((headers, rows))
}

/// Wide annual temperature file → long [`super::model::AnnualRecord`]s.
fn load_annual(
    path: &Path,
    config: &GroupingConfig,
) -> Result<Vec<super::model::AnnualRecord>, DataError> {
    let (headers, rows) = read_csv(path)?;
    reshape::melt_annual(path, &headers, &rows, &config.developed_iso3)
}

/// Fixed-schema monthly file, deserialized through serde.
#[derive(Debug, Deserialize)]
struct MonthlyRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Mean_Temp")]
    value: Option<f64>,
}

fn load_monthly(path: &Path) -> Result<Vec<MonthlyRecord>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::load(path, e))?;
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<MonthlyRow>().enumerate() {
        let row = result
            .map_err(|e| DataError::schema(path, format!("row {}: {e}", row_no + 2)))?;
        // Empty measurement cells are skipped, never zero-filled.
        let Some(value) = row.value else { continue };
        let record = MonthlyRecord::new(row.entity, row.year, row.month, value)
            .ok_or_else(|| {
                DataError::schema(
                    path,
                    format!("row {}: month {} is not a calendar month", row_no + 2, row.month),
                )
            })?;
        records.push(record);
    }
    Ok(records)
}

/// Gas contribution file: {Entity, Code, Year} plus six "Change in …"
/// columns relabelled onto the fixed taxonomy.
fn load_gas(path: &Path) -> Result<Vec<GasRecord>, DataError> {
    let (headers, rows) = read_csv(path)?;

    let entity_idx = require_column(path, &headers, "Entity")?;
    let year_idx = require_column(path, &headers, "Year")?;

    let series_columns: Vec<(usize, super::model::GasSeries)> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| reshape::gas_series(h).map(|s| (idx, s)))
        .collect();
    if series_columns.is_empty() {
        return Err(DataError::schema(
            path,
            format!("no {:?} gas/source columns found", reshape::GAS_COLUMN_PREFIX),
        ));
    }

    let mut records = Vec::new();
    for (row_no, row) in rows.iter().enumerate() {
        let entity = row.get(entity_idx).unwrap_or("").trim();
        let year_cell = row.get(year_idx).unwrap_or("").trim();
        let year = year_cell.parse::<i32>().map_err(|_| {
            DataError::schema(
                path,
                format!("row {}: {year_cell:?} is not a year", row_no + 2),
            )
        })?;

        for &(idx, series) in &series_columns {
            let cell = row.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                DataError::schema(
                    path,
                    format!("row {}: {cell:?} in {series} column is not a number", row_no + 2),
                )
            })?;
            records.push(GasRecord {
                entity: entity.to_string(),
                year,
                series,
                value,
            });
        }
    }
    Ok(records)
}

/// Fixed-schema contribution-share file, deserialized through serde.
#[derive(Debug, Deserialize)]
struct ShareRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Share of contribution to global warming")]
    share: Option<f64>,
}

fn load_share(path: &Path) -> Result<Vec<ShareRecord>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::load(path, e))?;
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<ShareRow>().enumerate() {
        let row = result
            .map_err(|e| DataError::schema(path, format!("row {}: {e}", row_no + 2)))?;
        let Some(share) = row.share else { continue };
        records.push(ShareRecord {
            entity: row.entity,
            year: row.year,
            share,
        });
    }
    Ok(records)
}

fn require_column(path: &Path, headers: &[String], name: &str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DataError::schema(path, format!("missing column {name:?}")))
}
