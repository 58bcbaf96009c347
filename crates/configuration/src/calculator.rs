use crate::error::ConfigError;
use crate::range::DateRange;

fn validate_tickers(tickers: &[String]) -> Result<(), ConfigError> {
    if tickers.is_empty() {
        return Err(ConfigError::ValidationError(
            "tickers must contain at least one entry".to_string(),
        ));
    }
    Ok(())
}

/// Immutable parameters for the stock-data calculator: which tickers to
/// fetch, over which window.
#[derive(Debug, Clone, PartialEq)]
pub struct StockDataConfig {
    range: DateRange,
    tickers: Vec<String>,
}

impl StockDataConfig {
    pub fn new(range: DateRange, tickers: Vec<String>) -> Result<Self, ConfigError> {
        validate_tickers(&tickers)?;
        Ok(Self { range, tickers })
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }
}

/// Immutable parameters for the daily-returns calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReturnsConfig {
    range: DateRange,
    tickers: Vec<String>,
}

impl DailyReturnsConfig {
    pub fn new(range: DateRange, tickers: Vec<String>) -> Result<Self, ConfigError> {
        validate_tickers(&tickers)?;
        Ok(Self { range, tickers })
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }
}
