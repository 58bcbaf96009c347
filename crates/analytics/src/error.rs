use core_types::DataType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Column '{0}' not found in frame")]
    MissingColumn(String),

    #[error("Column '{column}' has dtype {actual}, expected {expected}")]
    WrongDType {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
