use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of adjusted price history for a single ticker, as returned by a
/// market-data provider.
///
/// `close` is adjusted for splits and dividends; `dividends` and
/// `stock_splits` carry the corporate actions that occurred on the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub dividends: f64,
    pub stock_splits: f64,
    pub volume: f64,
}

/// A single entry of the active-listings universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub asset_type: String,
    pub ipo_date: Option<NaiveDate>,
    pub status: String,
}
