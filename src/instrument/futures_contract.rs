use crate::error::{BacktestError, Result};
use serde::{Deserialize, Serialize};

//represents a futures contract specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuturesContract {
    //contract symbol (eg cl, es)
    pub symbol: String,

    //units of the underlying per contract, used as the p&l multiplier
    pub contract_size: f64,
}

impl FuturesContract {
    //creates a new futurescontract, rejecting non-positive sizes
    pub fn new(symbol: impl Into<String>, contract_size: f64) -> Result<Self> {
        if !contract_size.is_finite() || contract_size <= 0.0 {
            return Err(BacktestError::invalid_parameter(
                "contract_size",
                format!("must be a positive number, got {}", contract_size),
            ));
        }

        Ok(FuturesContract {
            symbol: symbol.into(),
            contract_size,
        })
    }

    //signed value of `quantity` contracts at `price`
    pub fn notional(&self, price: f64, quantity: i32) -> f64 {
        quantity as f64 * price * self.contract_size
    }

    //helper to create a nymex wti crude oil contract (1000 barrels)
    pub fn crude_oil() -> Self {
        FuturesContract {
            symbol: "CL=F".to_string(),
            contract_size: 1000.0,
        }
    }
}

impl Default for FuturesContract {
    fn default() -> Self {
        FuturesContract {
            symbol: "UNKNOWN".to_string(),
            contract_size: 1.0,
        }
    }
}
