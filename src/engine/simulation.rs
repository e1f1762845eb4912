use crate::error::{BacktestError, Result};
use crate::indicator::IndicatorRow;
use crate::instrument::FuturesContract;
use crate::strategy::Signal;
use serde::{Deserialize, Serialize};

//one period of the simulated run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRow {
    pub indicators: IndicatorRow,
    pub signal: Option<Signal>,

    //position held during this period (yesterday's signal)
    pub position: Option<i8>,

    //change in held position since the previous period
    pub trade: Option<i8>,

    //trade * next close * contract size, zero when any factor is undefined
    pub realized_pnl: f64,

    //running sum of realized_pnl
    pub cumulative_pnl: f64,
}

//converts signals into held positions, trades and realized pnl
//a signal decided at period t is held from t + 1 and the trade executes at the close of t + 1
pub fn simulate(
    rows: &[IndicatorRow],
    signals: &[Option<Signal>],
    contract: &FuturesContract,
) -> Result<Vec<SimulationRow>> {
    if rows.len() != signals.len() {
        return Err(BacktestError::invalid_parameter(
            "signals",
            format!(
                "expected one signal per period ({}), got {}",
                rows.len(),
                signals.len()
            ),
        ));
    }

    if !contract.contract_size.is_finite() || contract.contract_size <= 0.0 {
        return Err(BacktestError::invalid_parameter(
            "contract_size",
            format!("must be a positive number, got {}", contract.contract_size),
        ));
    }

    let mut out = Vec::with_capacity(rows.len());
    let mut prev_position: Option<i8> = None;
    let mut cumulative = 0.0;

    for (t, row) in rows.iter().enumerate() {
        let (position, trade) = if t == 0 {
            //flat baseline, no prior signal to carry
            (Some(0), Some(0))
        } else {
            let position = signals[t - 1].map(|s| s.value());
            let trade = match (position, prev_position) {
                (Some(now), Some(before)) => Some(now - before),
                _ => None,
            };
            (position, trade)
        };

        let next_close = rows.get(t + 1).map(|r| r.close);
        let realized_pnl = match (trade, next_close) {
            (Some(qty), Some(price)) => contract.notional(price, qty as i32),
            _ => 0.0,
        };

        cumulative += realized_pnl;

        out.push(SimulationRow {
            indicators: *row,
            signal: signals[t],
            position,
            trade,
            realized_pnl,
            cumulative_pnl: cumulative,
        });

        //the period 0 baseline is not a carried signal, so the first trade stays undefined
        prev_position = if t == 0 { None } else { position };
    }

    let trades = out.iter().filter(|r| r.trade.unwrap_or(0) != 0).count();
    tracing::debug!(
        periods = out.len(),
        trades,
        final_pnl = cumulative,
        "simulated positions"
    );

    Ok(out)
}
