use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod calculator;
pub mod error;
pub mod range;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use calculator::{DailyReturnsConfig, StockDataConfig};
pub use range::DateRange;
pub use settings::{ApiSettings, Calculators, DailyReturnsParams, Settings, StockDataParams};

/// Loads the application configuration from the `meridian.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Settings`
/// struct, and returns it.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `meridian.toml`
        .add_source(config::File::with_name("meridian"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
