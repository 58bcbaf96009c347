use analytics::AnalyticsError;
use api_client::ApiError;
use configuration::error::ConfigError;
use core_types::{CoreError, SchemaError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Calculator received an invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Data source error: {0}")]
    Source(#[from] ApiError),

    #[error("Output schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Metric derivation failed: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("Invalid frame produced during calculation: {0}")]
    Frame(#[from] CoreError),

    #[error("An error occurred during calculation: {0}")]
    Calculation(String),
}
