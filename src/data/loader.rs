use crate::data::series::{PricePoint, PriceSeries};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

//other columns (open, high, low, volume...) are ignored
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "Timestamp")]
    timestamp: String,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(default, alias = "Symbol")]
    symbol: Option<String>,
}

//parses rfc3339 timestamps or plain yyyy-mm-dd dates (midnight utc)
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .context(format!("Unrecognized timestamp '{}'", raw))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context(format!("Invalid date '{}'", raw))?;
    Ok(midnight.and_utc())
}

//loads a closing price series from a csv file
//if the file has a symbol column, only rows for `symbol` are kept
pub fn load_csv<P: AsRef<Path>>(path: P, symbol: &str) -> Result<PriceSeries> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        if let Some(row_symbol) = &record.symbol {
            if row_symbol != symbol {
                skipped += 1;
                continue;
            }
        }

        let timestamp = parse_timestamp(&record.timestamp)
            .context(format!("Failed to parse timestamp at line {}", index + 2))?;

        points.push(PricePoint::new(timestamp, record.close));
    }

    //sort by timestamp to ensure chronological order
    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    tracing::debug!(
        path = ?path,
        loaded = points.len(),
        skipped,
        "loaded price records"
    );

    let series = PriceSeries::new(symbol, points)
        .context(format!("Invalid price data in {:?}", path))?;
    Ok(series)
}
