use crate::indicator::IndicatorRow;
use serde::{Deserialize, Serialize};
use std::fmt;

//discrete trading signal for one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    Sell,
    Hold,
    Buy,
}

impl Signal {
    //converts to position sign (Buy = +1, Hold = 0, Sell = -1)
    pub fn value(&self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }

    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Signal::Sell),
            0 => Some(Signal::Hold),
            1 => Some(Signal::Buy),
            _ => None,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

//how indicator state is mapped to a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalRule {
    //buy on short > long and macd > signal, then sell on short <= long or macd < signal;
    //the sell test runs last and wins, so the two conditions overlap
    #[default]
    Legacy,

    //buy and sell both require agreement of the two indicators, everything else holds
    Exclusive,
}

impl SignalRule {
    //parse signal rule from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legacy" | "default" => Some(SignalRule::Legacy),
            "exclusive" | "strict" => Some(SignalRule::Exclusive),
            _ => None,
        }
    }
}

//maps one indicator row to a signal; none if any input is still warming up
pub fn generate_signal(row: &IndicatorRow, rule: SignalRule) -> Option<Signal> {
    let short = row.sma_short?;
    let long = row.sma_long?;
    let macd = row.macd?;
    let macd_signal = row.macd_signal?;

    let signal = match rule {
        SignalRule::Legacy => {
            let mut signal = Signal::Hold;
            if short > long && macd > macd_signal {
                signal = Signal::Buy;
            }
            if short <= long || macd < macd_signal {
                signal = Signal::Sell;
            }
            signal
        }
        SignalRule::Exclusive => {
            if short > long && macd > macd_signal {
                Signal::Buy
            } else if short < long && macd < macd_signal {
                Signal::Sell
            } else {
                Signal::Hold
            }
        }
    };

    Some(signal)
}

pub fn generate_signals(rows: &[IndicatorRow], rule: SignalRule) -> Vec<Option<Signal>> {
    rows.iter().map(|row| generate_signal(row, rule)).collect()
}
