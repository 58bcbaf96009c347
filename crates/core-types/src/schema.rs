use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of column types a frame can carry.
///
/// Validation compares these tags exactly: an `Int` column is never accepted
/// where a `Float` column is declared, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Date,
    Utf8,
    Float,
    Int,
    Boolean,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Date => "Date",
            DataType::Utf8 => "Utf8",
            DataType::Float => "Float",
            DataType::Int => "Int",
            DataType::Boolean => "Boolean",
        };
        write!(f, "{}", name)
    }
}

/// An ordered mapping of column name to declared `DataType`.
///
/// Calculators declare their expected output as a `Schema`, and frames report
/// their observed layout as one. The two are compared with `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<(String, DataType)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for declaring a schema field by field.
    pub fn with_field(mut self, name: &str, dtype: DataType) -> Self {
        self.fields.push((name.to_string(), dtype));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up the declared type for a column, if the column is declared.
    pub fn dtype(&self, name: &str) -> Option<DataType> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, dtype)| *dtype)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dtype(name).is_some()
    }

    /// Iterates over the declared fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.fields.iter().map(|(name, dtype)| (name.as_str(), *dtype))
    }

    /// Checks an observed schema against this declared one.
    ///
    /// The column-name sets must be exactly equal. A mismatch reports *all*
    /// missing and unexpected columns at once, so a failure can be diagnosed
    /// without re-running the producer. For columns present on both sides,
    /// the type tags must match exactly.
    pub fn validate(&self, observed: &Schema) -> Result<(), SchemaError> {
        let missing: Vec<String> = self
            .iter()
            .filter(|(name, _)| !observed.contains(name))
            .map(|(name, _)| name.to_string())
            .collect();
        let unexpected: Vec<String> = observed
            .iter()
            .filter(|(name, _)| !self.contains(name))
            .map(|(name, _)| name.to_string())
            .collect();

        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(SchemaError::ColumnMismatch { missing, unexpected });
        }

        for (name, expected) in self.iter() {
            // Unwrap is safe: the name sets were just shown to be equal.
            let actual = observed.dtype(name).unwrap();
            if actual != expected {
                return Err(SchemaError::TypeMismatch {
                    column: name.to_string(),
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }
}

impl FromIterator<(String, DataType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, DataType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
