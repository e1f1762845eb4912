pub mod exponential;
pub mod moving_average;

pub use exponential::{ewm, ewm_optional, smoothing_factor};
pub use moving_average::{rolling_mean, sma};

use crate::config::StrategyConfig;
use crate::data::PriceSeries;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//indicator values for one period
//a field is none until its warm-up window has been observed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

//computes one indicator row per price point
pub fn compute_indicators(series: &PriceSeries, config: &StrategyConfig) -> Vec<IndicatorRow> {
    if series.is_empty() {
        return Vec::new();
    }

    let closes = series.closes();

    //the four base columns only read closes, so they can be built side by side
    let ((sma_short, sma_long), (ema_fast, ema_slow)) = rayon::join(
        || {
            rayon::join(
                || rolling_mean(&closes, config.short_window),
                || rolling_mean(&closes, config.long_window),
            )
        },
        || {
            rayon::join(
                || ewm(&closes, config.fast_span),
                || ewm(&closes, config.slow_span),
            )
        },
    );

    //macd needs both ema columns finished
    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(fast, slow)| Some(fast - slow))
        .collect();
    let macd_signal = ewm_optional(&macd, config.signal_span);

    let rows: Vec<IndicatorRow> = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorRow {
            timestamp: point.timestamp,
            close: point.close,
            sma_short: sma_short[i],
            sma_long: sma_long[i],
            ema_fast: Some(ema_fast[i]),
            ema_slow: Some(ema_slow[i]),
            macd: macd[i],
            macd_signal: macd_signal[i],
        })
        .collect();

    tracing::debug!(
        periods = rows.len(),
        short_window = config.short_window,
        long_window = config.long_window,
        "computed indicators"
    );

    rows
}
