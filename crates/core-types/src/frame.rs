use crate::error::CoreError;
use crate::schema::{DataType, Schema};
use chrono::NaiveDate;

/// The typed value vector backing a single column.
///
/// Every cell is an `Option`, so producers can represent holes (e.g. the
/// first observation of a returns series has no prior close).
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Date(Vec<Option<NaiveDate>>),
    Utf8(Vec<Option<String>>),
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
    Boolean(Vec<Option<bool>>),
}

impl ColumnValues {
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnValues::Date(_) => DataType::Date,
            ColumnValues::Utf8(_) => DataType::Utf8,
            ColumnValues::Float(_) => DataType::Float,
            ColumnValues::Int(_) => DataType::Int,
            ColumnValues::Boolean(_) => DataType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Date(v) => v.len(),
            ColumnValues::Utf8(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Int(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn retained(&self, keep: &[bool]) -> ColumnValues {
        fn filter<T: Clone>(values: &[Option<T>], keep: &[bool]) -> Vec<Option<T>> {
            values
                .iter()
                .zip(keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v.clone())
                .collect()
        }
        match self {
            ColumnValues::Date(v) => ColumnValues::Date(filter(v, keep)),
            ColumnValues::Utf8(v) => ColumnValues::Utf8(filter(v, keep)),
            ColumnValues::Float(v) => ColumnValues::Float(filter(v, keep)),
            ColumnValues::Int(v) => ColumnValues::Int(filter(v, keep)),
            ColumnValues::Boolean(v) => ColumnValues::Boolean(filter(v, keep)),
        }
    }
}

/// A named, typed column of a `Frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: &str, values: ColumnValues) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    pub fn date(name: &str, values: Vec<Option<NaiveDate>>) -> Self {
        Self::new(name, ColumnValues::Date(values))
    }

    pub fn utf8(name: &str, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnValues::Utf8(values))
    }

    pub fn float(name: &str, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnValues::Float(values))
    }

    pub fn int(name: &str, values: Vec<Option<i64>>) -> Self {
        Self::new(name, ColumnValues::Int(values))
    }

    pub fn boolean(name: &str, values: Vec<Option<bool>>) -> Self {
        Self::new(name, ColumnValues::Boolean(values))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.values.dtype()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    /// The cells of a date column, or `None` if this column is not a date column.
    pub fn as_date(&self) -> Option<&[Option<NaiveDate>]> {
        match &self.values {
            ColumnValues::Date(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_utf8(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Utf8(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&[Option<i64>]> {
        match &self.values {
            ColumnValues::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&[Option<bool>]> {
        match &self.values {
            ColumnValues::Boolean(v) => Some(v),
            _ => None,
        }
    }
}

/// A columnar result table: an ordered sequence of named, typed columns.
///
/// A `Frame` is produced fresh per calculator invocation and handed to the
/// caller by value. It exposes its column name/type metadata explicitly via
/// `schema()`, which is what calculator output validation compares against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Assembles a frame from columns, enforcing the structural invariants:
    /// unique column names and equal column lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self, CoreError> {
        if let Some(first) = columns.first() {
            let height = first.len();
            for column in &columns {
                if column.len() != height {
                    return Err(CoreError::InvalidInput(
                        "Frame".to_string(),
                        format!(
                            "column '{}' has length {}, expected {}",
                            column.name(),
                            column.len(),
                            height
                        ),
                    ));
                }
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == column.name()) {
                return Err(CoreError::InvalidInput(
                    "Frame".to_string(),
                    format!("duplicate column name '{}'", column.name()),
                ));
            }
        }
        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// The observed schema: every column's name and type tag, in column order.
    pub fn schema(&self) -> Schema {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.dtype()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns a new frame keeping only the rows where `keep` is true.
    ///
    /// The mask must have exactly one entry per row.
    pub fn retain_rows(&self, keep: &[bool]) -> Result<Frame, CoreError> {
        if keep.len() != self.height() {
            return Err(CoreError::InvalidInput(
                "Frame::retain_rows".to_string(),
                format!("mask length {} does not match height {}", keep.len(), self.height()),
            ));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values.retained(keep)))
            .collect();
        Ok(Frame { columns })
    }
}
