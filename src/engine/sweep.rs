use crate::config::{RiskConfig, StrategyConfig};
use crate::data::PriceSeries;
use crate::engine::backtest::BacktestEngine;
use crate::error::BacktestError;
use crate::instrument::FuturesContract;
use crate::metrics::MetricsReport;
use prettytable::{Cell, Row, Table};
use rayon::prelude::*;

//outcome of one grid point
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub short_window: usize,
    pub long_window: usize,
    pub final_pnl: Option<f64>,
    pub outcome: Result<MetricsReport, BacktestError>,
}

//every (short, long) pair with short < long
pub fn window_grid(short: &[usize], long: &[usize]) -> Vec<(usize, usize)> {
    let mut grid = Vec::new();
    for &s in short {
        for &l in long {
            if s < l {
                grid.push((s, l));
            }
        }
    }
    grid
}

//runs one independent backtest per window pair in parallel, results keep grid order
pub fn run_sweep(
    series: &PriceSeries,
    base: &StrategyConfig,
    risk: &RiskConfig,
    contract: &FuturesContract,
    grid: &[(usize, usize)],
) -> Vec<SweepResult> {
    tracing::info!(points = grid.len(), "running parameter sweep");

    grid.par_iter()
        .map(|&(short_window, long_window)| {
            let strategy = StrategyConfig {
                short_window,
                long_window,
                ..*base
            };

            let run = BacktestEngine::new(strategy, *risk, contract.clone())
                .and_then(|engine| engine.run(series));

            match run {
                Ok(result) => SweepResult {
                    short_window,
                    long_window,
                    final_pnl: Some(result.final_pnl()),
                    outcome: Ok(result.metrics),
                },
                Err(err) => {
                    tracing::warn!(short_window, long_window, error = %err, "sweep point failed");
                    SweepResult {
                        short_window,
                        long_window,
                        final_pnl: None,
                        outcome: Err(err),
                    }
                }
            }
        })
        .collect()
}

//builds the sweep summary table
pub fn sweep_table(results: &[SweepResult]) -> Table {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Short"),
        Cell::new("Long"),
        Cell::new("Final P&L"),
        Cell::new("Sharpe"),
        Cell::new("Max Drawdown"),
        Cell::new("VaR"),
    ]));

    for result in results {
        let mut cells = vec![
            Cell::new(&result.short_window.to_string()),
            Cell::new(&result.long_window.to_string()),
        ];

        match &result.outcome {
            Ok(metrics) => {
                cells.push(Cell::new(&format!("{:.2}", result.final_pnl.unwrap_or(0.0))));
                cells.push(Cell::new(
                    &metrics
                        .sharpe_ratio
                        .map(|s| format!("{:.3}", s))
                        .unwrap_or_else(|| "undefined".to_string()),
                ));
                cells.push(Cell::new(&format!("{:.2}", metrics.max_drawdown)));
                cells.push(Cell::new(&format!("{:.2}", metrics.value_at_risk)));
            }
            Err(err) => {
                cells.push(Cell::new(&err.to_string()));
            }
        }

        table.add_row(Row::new(cells));
    }

    table
}
