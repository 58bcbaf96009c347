use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a concrete calculator so outer layers (CLI, factory) can stay
/// calculator-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorId {
    StockData,
    DailyReturns,
}

impl CalculatorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorId::StockData => "stock-data",
            CalculatorId::DailyReturns => "daily-returns",
        }
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CalculatorId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock-data" => Ok(CalculatorId::StockData),
            "daily-returns" => Ok(CalculatorId::DailyReturns),
            other => Err(format!("unknown calculator '{}'", other)),
        }
    }
}
