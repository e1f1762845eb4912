use crate::engine::SimulationRow;
use crate::metrics::{MetricsReport, TransitionModel};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

//flat csv shape of a simulation row, undefined cells are left empty
#[derive(Debug, Serialize)]
struct TableRecord {
    timestamp: String,
    close: f64,
    sma_short: Option<f64>,
    sma_long: Option<f64>,
    ema_fast: Option<f64>,
    ema_slow: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    signal: Option<i8>,
    position: Option<i8>,
    trade: Option<i8>,
    realized_pnl: f64,
    cumulative_pnl: f64,
}

impl From<&SimulationRow> for TableRecord {
    fn from(row: &SimulationRow) -> Self {
        let ind = &row.indicators;
        TableRecord {
            timestamp: ind.timestamp.to_rfc3339(),
            close: ind.close,
            sma_short: ind.sma_short,
            sma_long: ind.sma_long,
            ema_fast: ind.ema_fast,
            ema_slow: ind.ema_slow,
            macd: ind.macd,
            macd_signal: ind.macd_signal,
            signal: row.signal.map(|s| s.value()),
            position: row.position,
            trade: row.trade,
            realized_pnl: row.realized_pnl,
            cumulative_pnl: row.cumulative_pnl,
        }
    }
}

//writes the full per-period results table
pub fn save_table_csv(rows: &[SimulationRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create CSV file: {:?}", path))?;

    for row in rows {
        writer.serialize(TableRecord::from(row))?;
    }

    writer.flush()?;
    Ok(())
}

//writes the named metrics as a json object
pub fn save_metrics_json(metrics: &MetricsReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&metrics.to_named_map())?;
    std::fs::write(path, json).context(format!("Failed to write metrics to {:?}", path))?;
    Ok(())
}

//writes the labeled transition matrix as json
pub fn save_transitions_json(model: &TransitionModel, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    std::fs::write(path, json).context(format!("Failed to write transitions to {:?}", path))?;
    Ok(())
}
