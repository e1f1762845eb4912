use crate::error::{BacktestError, Result};
use crate::instrument::FuturesContract;
use crate::strategy::SignalRule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//indicator windows, spans and the signal rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub short_window: usize,
    pub long_window: usize,
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: usize,
    pub rule: SignalRule,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            short_window: 10,
            long_window: 30,
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
            rule: SignalRule::Legacy,
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("fast_span", self.fast_span),
            ("slow_span", self.slow_span),
            ("signal_span", self.signal_span),
        ];

        for (name, value) in lengths {
            if value == 0 {
                return Err(BacktestError::invalid_parameter(name, "must be at least 1"));
            }
        }

        if self.short_window >= self.long_window {
            tracing::warn!(
                short_window = self.short_window,
                long_window = self.long_window,
                "short window is not shorter than long window"
            );
        }
        if self.fast_span >= self.slow_span {
            tracing::warn!(
                fast_span = self.fast_span,
                slow_span = self.slow_span,
                "fast span is not shorter than slow span"
            );
        }

        Ok(())
    }
}

//risk statistics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    //periods per year used to annualize the return ratio
    pub trading_days: f64,

    //lower-tail quantile for value-at-risk (0.05 = 95% var)
    pub var_quantile: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            trading_days: 252.0,
            var_quantile: 0.05,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.trading_days.is_finite() || self.trading_days <= 0.0 {
            return Err(BacktestError::invalid_parameter(
                "trading_days",
                format!("must be positive, got {}", self.trading_days),
            ));
        }

        if !(self.var_quantile > 0.0 && self.var_quantile < 1.0) {
            return Err(BacktestError::invalid_parameter(
                "var_quantile",
                format!("must lie strictly between 0 and 1, got {}", self.var_quantile),
            ));
        }

        Ok(())
    }
}

//contract configuration as read from a config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    pub symbol: String,
    pub contract_size: f64,
}

impl ContractConfig {
    //converts to a validated FuturesContract
    pub fn to_futures_contract(&self) -> Result<FuturesContract> {
        FuturesContract::new(self.symbol.clone(), self.contract_size)
    }
}

//complete backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfiguration {
    //data
    pub data_path: PathBuf,

    //contract specification
    pub contract: ContractConfig,

    //strategy and statistics
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub risk: RiskConfig,

    //optional output paths
    #[serde(default)]
    pub output_table_csv: Option<PathBuf>,
    #[serde(default)]
    pub output_metrics_json: Option<PathBuf>,
    #[serde(default)]
    pub output_transitions_json: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        let contract = FuturesContract::crude_oil();
        BacktestConfiguration {
            data_path: PathBuf::from("data.csv"),
            contract: ContractConfig {
                symbol: contract.symbol,
                contract_size: contract.contract_size,
            },
            strategy: StrategyConfig::default(),
            risk: RiskConfig::default(),
            output_table_csv: None,
            output_metrics_json: None,
            output_transitions_json: None,
        }
    }
}

impl BacktestConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //checks every run-scoped parameter before anything is computed
    pub fn validate(&self) -> Result<()> {
        self.contract.to_futures_contract()?;
        self.strategy.validate()?;
        self.risk.validate()
    }
}
