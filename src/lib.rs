//a Rust-based SMA/MACD strategy backtester and risk analyzer for futures contracts

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod instrument;
pub mod metrics;
pub mod report;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BacktestConfiguration, ContractConfig, RiskConfig, StrategyConfig};
    pub use crate::data::{load_csv, PricePoint, PriceSeries};
    pub use crate::engine::{
        run_sweep, simulate, sweep_table, window_grid, BacktestEngine, BacktestResult,
        SimulationRow, SweepResult,
    };
    pub use crate::error::BacktestError;
    pub use crate::indicator::{compute_indicators, IndicatorRow};
    pub use crate::instrument::FuturesContract;
    pub use crate::metrics::{MetricsReport, TransitionModel};
    pub use crate::report::{save_metrics_json, save_table_csv, save_transitions_json};
    pub use crate::strategy::{generate_signal, generate_signals, Signal, SignalRule};
}
