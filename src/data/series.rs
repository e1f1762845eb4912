use crate::error::{BacktestError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//a single closing price observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        PricePoint { timestamp, close }
    }
}

//validated, time-ordered closing prices for one instrument
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    //creates a series, rejecting non-positive closes and unordered or duplicate timestamps
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(BacktestError::InvalidSeries {
                    reason: format!(
                        "close at {} must be a positive number, got {}",
                        point.timestamp, point.close
                    ),
                });
            }

            if i > 0 && point.timestamp <= points[i - 1].timestamp {
                return Err(BacktestError::InvalidSeries {
                    reason: format!(
                        "timestamps must be strictly increasing: {} follows {}",
                        point.timestamp,
                        points[i - 1].timestamp
                    ),
                });
            }
        }

        Ok(PriceSeries {
            symbol: symbol.into(),
            points,
        })
    }

    //builds a daily series from raw closes, starting at the given timestamp
    pub fn from_closes(
        symbol: impl Into<String>,
        start: DateTime<Utc>,
        closes: &[f64],
    ) -> Result<Self> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + chrono::Duration::days(i as i64), close))
            .collect();
        PriceSeries::new(symbol, points)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
