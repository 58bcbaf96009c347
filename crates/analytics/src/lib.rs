//! # Meridian Analytics
//!
//! This crate provides the quantitative metrics for time-series frames:
//! per-partition returns, dispersion, annualization, and moving averages.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every metric is a pure function from a
//!   `Frame` to a new `Frame` with one or two columns added. Inputs are never
//!   mutated, which makes the metrics highly reliable and easy to test.
//!
//! ## Public API
//!
//! - The metric functions themselves (`log_returns`, `mean_returns`, ...).
//! - `AnalyticsError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod metrics;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyticsError;
pub use metrics::{
    annualized_returns, annualized_volatility, cumulative_log_returns,
    exponential_moving_average, log_returns, mean_returns, simple_moving_average,
    std_dev_returns, TRADING_DAYS_PER_YEAR,
};
