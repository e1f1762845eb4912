pub mod summary;
pub mod timeseries;
pub mod transition;

pub use summary::MetricsReport;
pub use timeseries::{cumulative_sum, drawdown_series, max_drawdown, quantile_linear};
pub use transition::TransitionModel;
