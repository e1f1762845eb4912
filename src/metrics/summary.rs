use crate::config::RiskConfig;
use crate::engine::simulation::SimulationRow;
use crate::error::{BacktestError, Result};
use crate::metrics::timeseries::{cumulative_sum, max_drawdown, quantile_linear};
use indexmap::IndexMap;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//risk and performance metrics for a backtest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    //number of pnl values the statistics were computed from
    pub observations: usize,
    pub mean_daily_pnl: f64,
    pub daily_volatility: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,

    //none when daily volatility is zero
    pub sharpe_ratio: Option<f64>,
    pub max_drawdown: f64,
    pub var_quantile: f64,
    pub value_at_risk: f64,
    pub expected_shortfall: f64,
}

impl MetricsReport {
    //calculate metrics from the realized pnl column of a simulation
    pub fn from_rows(rows: &[SimulationRow], risk: &RiskConfig) -> Result<Self> {
        let pnl: Vec<Option<f64>> = rows.iter().map(|r| Some(r.realized_pnl)).collect();
        Self::from_pnl(&pnl, risk)
    }

    //calculate metrics from a pnl series; none and non-finite entries are left out
    pub fn from_pnl(pnl: &[Option<f64>], risk: &RiskConfig) -> Result<Self> {
        risk.validate()?;

        let values: Vec<f64> = pnl.iter().flatten().copied().filter(|v| v.is_finite()).collect();

        if values.is_empty() {
            return Err(BacktestError::insufficient(
                "mean daily P&L",
                format!("no defined P&L values among {} periods", pnl.len()),
            ));
        }
        if values.len() < 2 {
            return Err(BacktestError::insufficient(
                "daily volatility",
                "sample standard deviation needs at least 2 P&L values",
            ));
        }

        let mean = values.as_slice().mean();
        let std_dev = values.as_slice().std_dev();

        let annualized_return = mean * risk.trading_days;
        let annualized_volatility = std_dev * risk.trading_days.sqrt();
        let sharpe_ratio = if std_dev == 0.0 {
            None
        } else {
            Some(annualized_return / annualized_volatility)
        };

        //max drawdown
        let max_dd = max_drawdown(&cumulative_sum(&values));

        //tail risk
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let var = quantile_linear(&sorted, risk.var_quantile).ok_or_else(|| {
            BacktestError::insufficient("value at risk", "no P&L values to rank")
        })?;

        //var never falls below the smallest value, so the tail holds at least one entry
        let cut = sorted.partition_point(|&v| v <= var);
        let expected_shortfall = sorted[..cut].mean();

        let report = MetricsReport {
            observations: values.len(),
            mean_daily_pnl: mean,
            daily_volatility: std_dev,
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            max_drawdown: max_dd,
            var_quantile: risk.var_quantile,
            value_at_risk: var,
            expected_shortfall,
        };

        tracing::debug!(
            observations = report.observations,
            mean = report.mean_daily_pnl,
            max_drawdown = report.max_drawdown,
            "computed risk metrics"
        );

        Ok(report)
    }

    fn var_label(&self) -> String {
        let confidence = (1.0 - self.var_quantile) * 100.0;
        format!("Value at Risk (VaR) {}%", confidence.round())
    }

    //named scalars in report order; a none value has no defined result
    pub fn to_named_map(&self) -> IndexMap<String, Option<f64>> {
        let mut map = IndexMap::new();
        map.insert("Mean Daily P&L".to_string(), Some(self.mean_daily_pnl));
        map.insert("Sharpe Ratio".to_string(), self.sharpe_ratio);
        map.insert("Maximum Drawdown".to_string(), Some(self.max_drawdown));
        map.insert(self.var_label(), Some(self.value_at_risk));
        map.insert("Expected Shortfall".to_string(), Some(self.expected_shortfall));
        map.insert("Daily Volatility".to_string(), Some(self.daily_volatility));
        map.insert("Annualized Return".to_string(), Some(self.annualized_return));
        map.insert(
            "Annualized Volatility".to_string(),
            Some(self.annualized_volatility),
        );
        map
    }

    //builds the metrics table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Observations"),
            Cell::new(&format!("{}", self.observations)),
        ]));

        for (name, value) in self.to_named_map() {
            let text = match value {
                Some(v) => format!("{:.2}", v),
                None => "undefined".to_string(),
            };
            table.add_row(Row::new(vec![Cell::new(&name), Cell::new(&text)]));
        }

        table
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }
}
