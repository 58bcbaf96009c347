use crate::error::CalculatorError;
use crate::Calculator;
use api_client::MarketDataClient;
use async_trait::async_trait;
use configuration::StockDataConfig;
use core_types::{Column, DataType, Frame, PriceBar, Schema};
use std::sync::Arc;

/// Calculator that fetches adjusted daily price history for a set of tickers
/// and normalizes it into a single frame.
///
/// The provider is injected behind the `MarketDataClient` trait, so tests can
/// run against an in-memory fixture instead of the live API.
pub struct StockDataCalculator {
    config: StockDataConfig,
    client: Arc<dyn MarketDataClient>,
}

impl StockDataCalculator {
    pub fn new(config: StockDataConfig, client: Arc<dyn MarketDataClient>) -> Self {
        Self { config, client }
    }

    /// Columnar transpose of the fetched bars. Bars must already be in the
    /// desired row order.
    fn bars_to_frame(bars: &[PriceBar]) -> Result<Frame, CalculatorError> {
        let frame = Frame::new(vec![
            Column::date("BUSINESS_DATE", bars.iter().map(|b| Some(b.date)).collect()),
            Column::utf8("TICKER", bars.iter().map(|b| Some(b.ticker.clone())).collect()),
            Column::float("CLOSE", bars.iter().map(|b| Some(b.close)).collect()),
            Column::float("DIVIDENDS", bars.iter().map(|b| Some(b.dividends)).collect()),
            Column::float("HIGH", bars.iter().map(|b| Some(b.high)).collect()),
            Column::float("LOW", bars.iter().map(|b| Some(b.low)).collect()),
            Column::float("OPEN", bars.iter().map(|b| Some(b.open)).collect()),
            Column::float(
                "STOCK_SPLITS",
                bars.iter().map(|b| Some(b.stock_splits)).collect(),
            ),
            Column::float("VOLUME", bars.iter().map(|b| Some(b.volume)).collect()),
        ])?;
        Ok(frame)
    }
}

#[async_trait]
impl Calculator for StockDataCalculator {
    fn output_schema(&self) -> Schema {
        Schema::new()
            .with_field("BUSINESS_DATE", DataType::Date)
            .with_field("TICKER", DataType::Utf8)
            .with_field("CLOSE", DataType::Float)
            .with_field("DIVIDENDS", DataType::Float)
            .with_field("HIGH", DataType::Float)
            .with_field("LOW", DataType::Float)
            .with_field("OPEN", DataType::Float)
            .with_field("STOCK_SPLITS", DataType::Float)
            .with_field("VOLUME", DataType::Float)
    }

    async fn calculate(&self) -> Result<Frame, CalculatorError> {
        let range = self.config.range();
        let mut bars = Vec::new();
        for ticker in self.config.tickers() {
            tracing::debug!(%ticker, "fetching daily history");
            let fetched = self
                .client
                .fetch_daily_history(ticker, range.start(), range.end())
                .await?;
            tracing::debug!(%ticker, bars = fetched.len(), "fetched daily history");
            bars.extend(fetched);
        }

        // Deterministic row order: ticker, then business date.
        bars.sort_by(|a, b| a.ticker.cmp(&b.ticker).then(a.date.cmp(&b.date)));

        Self::bars_to_frame(&bars)
    }
}
