//! City CSV loading for the bikeshare explorer.
//!
//! Reads one trip-log CSV into a [`TripTable`], parsing the timestamp
//! columns and deriving the calendar fields used by the filters and reports.

use std::io::Read;
use std::path::Path;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{
    TripRecord, TripTable, BIRTH_YEAR, END_TIME, GENDER, REQUIRED_COLUMNS, START_TIME,
};
use bikeshare_core::time_utils::parse_timestamp;
use serde::Deserialize;
use tracing::{debug, info};

/// Typed view of the columns the reports need. Extra columns are ignored
/// here and kept verbatim in [`TripRecord::cells`].
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the CSV at `path` into a [`TripTable`].
///
/// Fails with [`BikeshareError::FileRead`] when the file cannot be opened, and
/// with the errors of [`read_trips`] for content problems.
pub fn read_city_csv(path: &Path) -> Result<TripTable> {
    let file = std::fs::File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let start = std::time::Instant::now();
    let table = read_trips(std::io::BufReader::new(file), path)?;

    info!(
        "Loaded {} rows from {} in {:.3}s",
        table.len(),
        path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(table)
}

/// Parse CSV content from any reader. `source` is only used in error messages.
///
/// * Every column in [`REQUIRED_COLUMNS`] must be present in the header.
/// * Every `Start Time` / `End Time` cell must be a valid timestamp.
/// * Empty text cells become missing values for that row only.
/// * A row shorter than the header is missing its trailing cells.
pub fn read_trips<R: Read>(reader: R, source: &Path) -> Result<TripTable> {
    let csv_err = |e: csv::Error| BikeshareError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                path: source.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    debug!(
        "{}: columns {:?} (gender: {}, birth year: {})",
        source.display(),
        headers.iter().collect::<Vec<_>>(),
        headers.iter().any(|h| h == GENDER),
        headers.iter().any(|h| h == BIRTH_YEAR),
    );

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();

    while rdr.read_record(&mut record).map_err(csv_err)? {
        // Header is line 1, so the first data row is line 2.
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(rows.len() as u64 + 2);

        let raw: RawTrip = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push(Some(to_record(raw, &record, line)?));
    }

    Ok(TripTable::new(
        headers.iter().map(str::to_string).collect(),
        rows,
    ))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn to_record(raw: RawTrip, cells: &csv::StringRecord, line: u64) -> Result<TripRecord> {
    let start_time = parse_column(&raw.start_time, START_TIME, line)?;
    let end_time = parse_column(&raw.end_time, END_TIME, line)?;

    let mut record = TripRecord {
        start_time,
        end_time,
        start_station: non_empty(raw.start_station),
        end_station: non_empty(raw.end_station),
        user_type: non_empty(raw.user_type),
        gender: non_empty(raw.gender),
        birth_year: raw.birth_year.filter(|y| y.is_finite()).map(|y| y as i32),
        month: 0,
        day: 0,
        cells: cells.iter().map(str::to_string).collect(),
    };
    record.derive_calendar_fields();
    Ok(record)
}

fn parse_column(value: &str, column: &str, line: u64) -> Result<chrono::NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| BikeshareError::TimestampParse {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Whitespace-only cells count as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
