use crate::error::CalculatorError;
use crate::stock_data::StockDataCalculator;
use crate::{Calculator, CalculatorExt};
use api_client::MarketDataClient;
use async_trait::async_trait;
use configuration::{DailyReturnsConfig, StockDataConfig};
use core_types::{Column, DataType, Frame, Schema};
use std::sync::Arc;

/// Extra days fetched before the configured start so the first in-range row
/// has a prior close to compute returns against.
const LOOKBACK_DAYS: i64 = 7;

/// Calculator that computes daily log and arithmetic returns for stock
/// tickers.
///
/// Fetches close prices via `StockDataCalculator`, computes returns using the
/// prior day's close, and outputs a validated frame filtered to the
/// configured date range.
pub struct DailyReturnsCalculator {
    config: DailyReturnsConfig,
    client: Arc<dyn MarketDataClient>,
}

impl DailyReturnsCalculator {
    pub fn new(config: DailyReturnsConfig, client: Arc<dyn MarketDataClient>) -> Self {
        Self { config, client }
    }

    /// Fetches close prices with the lookback buffer applied.
    async fn fetch_stock_data(&self) -> Result<Frame, CalculatorError> {
        let stock_config = StockDataConfig::new(
            self.config.range().with_lookback(LOOKBACK_DAYS),
            self.config.tickers().to_vec(),
        )?;
        StockDataCalculator::new(stock_config, self.client.clone())
            .execute()
            .await
    }
}

/// Adds `PREV_CLOSE`, `LOG_RETURN` and `ARITHMETIC_RETURN` columns derived
/// from the prior close within each ticker.
///
/// The first observation per ticker has no prior close, so its return cells
/// are null; tickers never bleed into each other.
pub fn compute_returns(frame: &Frame) -> Result<Frame, CalculatorError> {
    let frame = analytics::log_returns(frame, "TICKER", "CLOSE")?;

    // log_returns guarantees these columns exist with Float dtype.
    let closes = frame.column("CLOSE").unwrap().as_float().unwrap();
    let prev_closes = frame.column("PREV_CLOSE").unwrap().as_float().unwrap();

    let arithmetic = closes
        .iter()
        .zip(prev_closes)
        .map(|(close, prev)| match (close, prev) {
            (Some(c), Some(p)) => Some((c - p) / p),
            _ => None,
        })
        .collect();

    let mut columns = frame.columns().to_vec();
    columns.push(Column::float("ARITHMETIC_RETURN", arithmetic));
    Ok(Frame::new(columns)?)
}

#[async_trait]
impl Calculator for DailyReturnsCalculator {
    fn output_schema(&self) -> Schema {
        Schema::new()
            .with_field("BUSINESS_DATE", DataType::Date)
            .with_field("TICKER", DataType::Utf8)
            .with_field("CLOSE", DataType::Float)
            .with_field("LOG_RETURN", DataType::Float)
            .with_field("ARITHMETIC_RETURN", DataType::Float)
    }

    async fn calculate(&self) -> Result<Frame, CalculatorError> {
        let with_buffer = self.fetch_stock_data().await?;
        let with_returns = compute_returns(&with_buffer)?;

        // Drop the buffer rows now that they have seeded the prior closes.
        let range = self.config.range();
        let dates = with_returns
            .column("BUSINESS_DATE")
            .and_then(Column::as_date)
            .ok_or_else(|| {
                CalculatorError::Calculation("stock data lost its BUSINESS_DATE column".to_string())
            })?;
        let keep: Vec<bool> = dates
            .iter()
            .map(|d| d.is_some_and(|d| range.contains_date(d)))
            .collect();
        let in_range = with_returns.retain_rows(&keep)?;

        let columns = ["BUSINESS_DATE", "TICKER", "CLOSE", "LOG_RETURN", "ARITHMETIC_RETURN"]
            .into_iter()
            .map(|name| {
                in_range.column(name).cloned().ok_or_else(|| {
                    CalculatorError::Calculation(format!("missing derived column '{}'", name))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Frame::new(columns)?)
    }
}
