use async_trait::async_trait;
use chrono::{DateTime, Utc};
use configuration::ApiSettings;
use core_types::{Listing, PriceBar};

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ApiError;
pub use responses::{parse_daily_series, parse_listings};

/// The generic, abstract interface for a market-data provider.
/// This trait is the contract calculators program against, allowing the
/// underlying implementation (live HTTP client or in-memory fixture) to be
/// swapped out.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetches the adjusted daily price history for one ticker, limited to
    /// bars dated within `[start, end]`.
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, ApiError>;

    /// Fetches the universe of actively listed symbols.
    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, ApiError>;
}

/// A concrete implementation of `MarketDataClient` for the Alpha Vantage API.
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(api: &ApiSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: api.base_url.clone(),
            api_key: api.key.clone(),
        }
    }

    async fn get_text(&self, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = format!("{}/query", self.base_url);
        let response = self.client.get(&url).query(params).send().await?;
        // The provider reports request-level failures inside 200 bodies;
        // error_for_status only catches transport/gateway problems.
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketDataClient for AlphaVantageClient {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, ApiError> {
        let body = self
            .get_text(&[
                ("function", "TIME_SERIES_DAILY_ADJUSTED"),
                ("symbol", ticker),
                ("outputsize", "full"),
                ("apikey", &self.api_key),
            ])
            .await?;

        parse_daily_series(&body, ticker, start.date_naive(), end.date_naive())
    }

    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let body = self
            .get_text(&[
                ("function", "LISTING_STATUS"),
                ("state", "active"),
                ("apikey", &self.api_key),
            ])
            .await?;

        parse_listings(&body)
    }
}
