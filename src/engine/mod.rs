pub mod backtest;
pub mod simulation;
pub mod sweep;

pub use backtest::{BacktestEngine, BacktestResult};
pub use simulation::{simulate, SimulationRow};
pub use sweep::{run_sweep, sweep_table, window_grid, SweepResult};
