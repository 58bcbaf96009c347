use crate::schema::DataType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// Raised when a produced frame does not conform to a declared output schema.
///
/// Carries enough detail to diagnose the mismatch without re-running the
/// producer: the full missing/unexpected column lists, or the offending
/// column with both type tags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("result columns do not match declared schema; missing: {missing:?}, unexpected: {unexpected:?}")]
    ColumnMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("column '{column}' has dtype {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
