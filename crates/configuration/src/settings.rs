use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub calculators: Calculators,
}

/// Connection details for the market-data provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// The provider API key. Usually supplied via the environment rather
    /// than committed to the settings file.
    #[serde(default)]
    pub key: String,
    /// Provider base URL. Overridable so tests can point at a local server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://www.alphavantage.co".to_string()
}

/// Contains the parameter tables for all available calculators.
#[derive(Debug, Clone, Deserialize)]
pub struct Calculators {
    pub stock_data: StockDataParams,
    pub daily_returns: DailyReturnsParams,
}

/// Parameters for the stock-data calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct StockDataParams {
    /// Ticker symbols to fetch when none are passed on the command line.
    pub tickers: Vec<String>,
}

/// Parameters for the daily-returns calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyReturnsParams {
    pub tickers: Vec<String>,
}
