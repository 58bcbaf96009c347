use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::{Listing, PriceBar};
use serde::Deserialize;
use std::collections::BTreeMap;

// The provider keys every JSON field with a numbered, human-readable label,
// so each field needs an explicit rename. All numeric values arrive as
// strings and are parsed at the edge.

/// The response to a `TIME_SERIES_DAILY_ADJUSTED` query.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta: SeriesMetaData,
    // BTreeMap keys sort ascending, which conveniently yields date order.
    #[serde(rename = "Time Series (Daily)")]
    pub series: BTreeMap<NaiveDate, DailyBar>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesMetaData {
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: String,
}

/// One day of the adjusted daily series.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. adjusted close")]
    pub adjusted_close: String,
    #[serde(rename = "6. volume")]
    pub volume: String,
    #[serde(rename = "7. dividend amount")]
    pub dividend_amount: String,
    #[serde(rename = "8. split coefficient")]
    pub split_coefficient: String,
}

/// The provider reports failures inside a 200 response, under one of several
/// top-level keys depending on the failure kind (bad request, rate limit,
/// informational rejection).
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl ApiErrorResponse {
    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

fn parse_float(field: &str, value: &str) -> Result<f64, ApiError> {
    value.parse::<f64>().map_err(|_| {
        ApiError::InvalidData(format!("field '{}' is not a number: '{}'", field, value))
    })
}

/// Parses a daily-series response body into `PriceBar`s for `ticker`,
/// keeping only bars dated within `[start, end]`.
///
/// `close` carries the adjusted close (split- and dividend-adjusted), which
/// is what downstream return calculations want.
pub fn parse_daily_series(
    body: &str,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<PriceBar>, ApiError> {
    let response: DailySeriesResponse = serde_json::from_str(body).map_err(|parse_err| {
        // A well-formed error payload beats a serde message about a missing key.
        match serde_json::from_str::<ApiErrorResponse>(body).ok().and_then(|e| e.message().map(String::from)) {
            Some(message) => ApiError::Provider {
                endpoint: "TIME_SERIES_DAILY_ADJUSTED".to_string(),
                message,
            },
            None => ApiError::Deserialization(parse_err.to_string()),
        }
    })?;

    let mut bars = Vec::new();
    for (date, bar) in &response.series {
        if *date < start || *date > end {
            continue;
        }
        bars.push(PriceBar {
            date: *date,
            ticker: ticker.to_string(),
            open: parse_float("1. open", &bar.open)?,
            high: parse_float("2. high", &bar.high)?,
            low: parse_float("3. low", &bar.low)?,
            close: parse_float("5. adjusted close", &bar.adjusted_close)?,
            dividends: parse_float("7. dividend amount", &bar.dividend_amount)?,
            stock_splits: parse_float("8. split coefficient", &bar.split_coefficient)?,
            volume: parse_float("6. volume", &bar.volume)?,
        });
    }
    Ok(bars)
}

#[derive(Debug, Deserialize)]
struct ListingRecord {
    symbol: String,
    name: String,
    exchange: String,
    #[serde(rename = "assetType")]
    asset_type: String,
    #[serde(rename = "ipoDate")]
    ipo_date: String,
    #[serde(rename = "delistingDate")]
    #[allow(dead_code)]
    delisting_date: String,
    status: String,
}

/// Parses the CSV body of a `LISTING_STATUS` query.
pub fn parse_listings(body: &str) -> Result<Vec<Listing>, ApiError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut listings = Vec::new();
    for record in reader.deserialize::<ListingRecord>() {
        let record = record.map_err(|e| ApiError::Deserialization(e.to_string()))?;
        listings.push(Listing {
            // "null" marks absent dates in this feed.
            ipo_date: NaiveDate::parse_from_str(&record.ipo_date, "%Y-%m-%d").ok(),
            symbol: record.symbol,
            name: record.name,
            exchange: record.exchange,
            asset_type: record.asset_type,
            status: record.status,
        });
    }
    Ok(listings)
}
