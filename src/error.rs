use thiserror::Error;

//errors raised by the backtest pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error("Insufficient data for {statistic}: {reason}")]
    InsufficientData {
        statistic: &'static str,
        reason: String,
    },
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Invalid price series: {reason}")]
    InvalidSeries { reason: String },
}

impl BacktestError {
    pub fn insufficient(statistic: &'static str, reason: impl Into<String>) -> Self {
        BacktestError::InsufficientData {
            statistic,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        BacktestError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BacktestError>;
