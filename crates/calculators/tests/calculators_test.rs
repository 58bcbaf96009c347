//! End-to-end tests for the concrete calculators, run against an in-memory
//! market-data provider.

use api_client::{ApiError, MarketDataClient};
use async_trait::async_trait;
use calculators::{
    create_calculator, Calculator, CalculatorError, CalculatorExt, CalculatorId,
    DailyReturnsCalculator, StockDataCalculator,
};
use chrono::{DateTime, NaiveDate, Utc};
use configuration::{
    ApiSettings, Calculators, DailyReturnsConfig, DailyReturnsParams, DateRange, Settings,
    StockDataConfig, StockDataParams,
};
use core_types::{DataType, Frame, Listing, PriceBar};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bar(ticker: &str, on: NaiveDate, close: f64) -> PriceBar {
    PriceBar {
        date: on,
        ticker: ticker.to_string(),
        open: close * 0.99,
        high: close * 1.01,
        low: close * 0.98,
        close,
        dividends: 0.0,
        stock_splits: 1.0,
        volume: 1_000_000.0,
    }
}

/// Serves canned bars, filtered the way the live provider would filter them.
struct InMemoryMarketData {
    bars: Vec<PriceBar>,
}

#[async_trait]
impl MarketDataClient for InMemoryMarketData {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, ApiError> {
        Ok(self
            .bars
            .iter()
            .filter(|b| {
                b.ticker == ticker
                    && b.date >= start.date_naive()
                    && b.date <= end.date_naive()
            })
            .cloned()
            .collect())
    }

    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, ApiError> {
        Ok(Vec::new())
    }
}

/// A provider that is always down.
struct UnavailableMarketData;

#[async_trait]
impl MarketDataClient for UnavailableMarketData {
    async fn fetch_daily_history(
        &self,
        _ticker: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, ApiError> {
        Err(ApiError::Provider {
            endpoint: "TIME_SERIES_DAILY_ADJUSTED".to_string(),
            message: "provider offline".to_string(),
        })
    }

    async fn fetch_active_listings(&self) -> Result<Vec<Listing>, ApiError> {
        Err(ApiError::Provider {
            endpoint: "LISTING_STATUS".to_string(),
            message: "provider offline".to_string(),
        })
    }
}

fn fixture_client() -> Arc<dyn MarketDataClient> {
    // 2025-01-03 is a Friday inside the lookback buffer; 01-06..01-08 are the
    // in-range business days.
    Arc::new(InMemoryMarketData {
        bars: vec![
            bar("AAPL", date(2025, 1, 3), 95.0),
            bar("AAPL", date(2025, 1, 6), 100.0),
            bar("AAPL", date(2025, 1, 7), 110.0),
            bar("AAPL", date(2025, 1, 8), 121.0),
            bar("MSFT", date(2025, 1, 3), 210.0),
            bar("MSFT", date(2025, 1, 6), 200.0),
            bar("MSFT", date(2025, 1, 7), 190.0),
            bar("MSFT", date(2025, 1, 8), 209.0),
        ],
    })
}

fn run_range() -> DateRange {
    DateRange::from_dates(date(2025, 1, 6), date(2025, 1, 8)).unwrap()
}

fn column_floats<'a>(frame: &'a Frame, name: &str) -> &'a [Option<f64>] {
    frame.column(name).unwrap().as_float().unwrap()
}

#[tokio::test]
async fn stock_data_produces_the_full_nine_column_frame() {
    let config = StockDataConfig::new(
        run_range(),
        vec!["AAPL".to_string(), "MSFT".to_string()],
    )
    .unwrap();
    let calculator = StockDataCalculator::new(config, fixture_client());
    let frame = calculator.execute().await.unwrap();

    assert_eq!(frame.width(), 9);
    assert_eq!(frame.height(), 6);
    assert_eq!(
        frame.column("BUSINESS_DATE").unwrap().dtype(),
        DataType::Date
    );
    // Rows come back sorted by ticker then date.
    let tickers = frame.column("TICKER").unwrap().as_utf8().unwrap();
    assert_eq!(tickers[0].as_deref(), Some("AAPL"));
    assert_eq!(tickers[5].as_deref(), Some("MSFT"));
    let closes = column_floats(&frame, "CLOSE");
    assert_eq!(closes[0], Some(100.0));
    assert_eq!(closes[3], Some(200.0));
}

#[tokio::test]
async fn daily_returns_uses_the_lookback_close_for_the_first_in_range_row() {
    let config = DailyReturnsConfig::new(run_range(), vec!["AAPL".to_string()]).unwrap();
    let calculator = DailyReturnsCalculator::new(config, fixture_client());
    let frame = calculator.execute().await.unwrap();

    // Only in-range rows survive; the buffered 01-03 bar is dropped.
    assert_eq!(frame.height(), 3);
    let dates = frame.column("BUSINESS_DATE").unwrap().as_date().unwrap();
    assert_eq!(dates[0], Some(date(2025, 1, 6)));

    // But the buffer seeded the prior close, so even the first row has a return.
    let log = column_floats(&frame, "LOG_RETURN");
    let expected_first = (100.0f64 / 95.0).ln();
    assert!((log[0].unwrap() - expected_first).abs() < 1e-10);

    let arithmetic = column_floats(&frame, "ARITHMETIC_RETURN");
    assert!((arithmetic[0].unwrap() - (100.0 - 95.0) / 95.0).abs() < 1e-10);
}

#[tokio::test]
async fn daily_returns_output_matches_its_declared_schema() {
    let config = DailyReturnsConfig::new(run_range(), vec!["AAPL".to_string()]).unwrap();
    let calculator = DailyReturnsCalculator::new(config, fixture_client());
    let frame = calculator.execute().await.unwrap();

    let schema = frame.schema();
    let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
    assert_eq!(
        names,
        vec![
            "BUSINESS_DATE",
            "TICKER",
            "CLOSE",
            "LOG_RETURN",
            "ARITHMETIC_RETURN"
        ]
    );
}

#[tokio::test]
async fn provider_failures_surface_as_source_errors() {
    let config = DailyReturnsConfig::new(run_range(), vec!["AAPL".to_string()]).unwrap();
    let calculator =
        DailyReturnsCalculator::new(config, Arc::new(UnavailableMarketData));
    let err = calculator.execute().await.unwrap_err();
    assert!(matches!(err, CalculatorError::Source(_)));
}

fn settings() -> Settings {
    Settings {
        api: ApiSettings {
            key: "demo".to_string(),
            base_url: "http://localhost".to_string(),
        },
        calculators: Calculators {
            stock_data: StockDataParams {
                tickers: vec!["AAPL".to_string(), "MSFT".to_string()],
            },
            daily_returns: DailyReturnsParams {
                tickers: vec!["AAPL".to_string()],
            },
        },
    }
}

#[tokio::test]
async fn factory_builds_working_calculators_from_settings() {
    let calculator: Box<dyn Calculator> = create_calculator(
        CalculatorId::DailyReturns,
        &settings(),
        run_range(),
        fixture_client(),
    )
    .unwrap();

    let frame = calculator.execute().await.unwrap();
    assert_eq!(frame.width(), 5);
}

#[tokio::test]
async fn factory_rejects_empty_ticker_lists_before_any_calculation() {
    let mut settings = settings();
    settings.calculators.daily_returns.tickers.clear();

    let err = create_calculator(
        CalculatorId::DailyReturns,
        &settings,
        run_range(),
        Arc::new(UnavailableMarketData),
    )
    .unwrap_err();
    assert!(matches!(err, CalculatorError::Config(_)));
}
