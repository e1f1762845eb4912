use crate::config::{RiskConfig, StrategyConfig};
use crate::data::PriceSeries;
use crate::engine::simulation::{simulate, SimulationRow};
use crate::error::Result;
use crate::indicator::compute_indicators;
use crate::instrument::FuturesContract;
use crate::metrics::{MetricsReport, TransitionModel};
use crate::strategy::{generate_signals, Signal};

//result of a backtest
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub rows: Vec<SimulationRow>,
    pub metrics: MetricsReport,
    pub transitions: TransitionModel,
}

impl BacktestResult {
    pub fn signals(&self) -> Vec<Option<Signal>> {
        self.rows.iter().map(|r| r.signal).collect()
    }

    pub fn final_pnl(&self) -> f64 {
        self.rows.last().map(|r| r.cumulative_pnl).unwrap_or(0.0)
    }
}

//runs indicators -> signals -> positions -> {metrics, transitions} over one series
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    strategy: StrategyConfig,
    risk: RiskConfig,
    contract: FuturesContract,
}

impl BacktestEngine {
    //creates a new backtest engine, validating all parameters up front
    pub fn new(
        strategy: StrategyConfig,
        risk: RiskConfig,
        contract: FuturesContract,
    ) -> Result<Self> {
        strategy.validate()?;
        risk.validate()?;
        //re-run contract validation for contracts built by hand
        FuturesContract::new(contract.symbol.clone(), contract.contract_size)?;

        Ok(BacktestEngine {
            strategy,
            risk,
            contract,
        })
    }

    //runs the backtest; fails before producing anything if a statistic cannot be computed
    pub fn run(&self, series: &PriceSeries) -> Result<BacktestResult> {
        tracing::info!(
            symbol = series.symbol(),
            periods = series.len(),
            contract_size = self.contract.contract_size,
            "running backtest"
        );

        let indicators = compute_indicators(series, &self.strategy);
        let signals = generate_signals(&indicators, self.strategy.rule);
        let rows = simulate(&indicators, &signals, &self.contract)?;

        let metrics = MetricsReport::from_rows(&rows, &self.risk)?;
        let transitions = TransitionModel::from_signals(&signals);

        let result = BacktestResult {
            rows,
            metrics,
            transitions,
        };

        tracing::info!(
            final_pnl = result.final_pnl(),
            max_drawdown = result.metrics.max_drawdown,
            "backtest complete"
        );

        Ok(result)
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    pub fn risk(&self) -> &RiskConfig {
        &self.risk
    }

    //returns a reference to the contract
    pub fn contract(&self) -> &FuturesContract {
        &self.contract
    }
}
