use crate::daily_returns::DailyReturnsCalculator;
use crate::error::CalculatorError;
use crate::stock_data::StockDataCalculator;
use crate::Calculator;
use api_client::MarketDataClient;
use configuration::{DailyReturnsConfig, DateRange, Settings, StockDataConfig};
use core_types::enums::CalculatorId;
use std::sync::Arc;

/// Creates a new calculator instance based on the provided ID, settings and
/// run window.
///
/// The compiler will error if a new `CalculatorId` is added but not handled
/// here.
pub fn create_calculator(
    id: CalculatorId,
    settings: &Settings,
    range: DateRange,
    client: Arc<dyn MarketDataClient>,
) -> Result<Box<dyn Calculator>, CalculatorError> {
    match id {
        CalculatorId::StockData => {
            let params = settings.calculators.stock_data.clone();
            let config = StockDataConfig::new(range, params.tickers)?;
            Ok(Box::new(StockDataCalculator::new(config, client)))
        }
        CalculatorId::DailyReturns => {
            let params = settings.calculators.daily_returns.clone();
            let config = DailyReturnsConfig::new(range, params.tickers)?;
            Ok(Box::new(DailyReturnsCalculator::new(config, client)))
        }
    }
}
