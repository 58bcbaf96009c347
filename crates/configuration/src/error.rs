use thiserror::Error;

/// Errors surfaced while loading `meridian.toml` or constructing calculator
/// configs. Validation failures fire at construction time, before any
/// calculation logic runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}
