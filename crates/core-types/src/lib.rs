pub mod enums;
pub mod error;
pub mod frame;
pub mod schema;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::CalculatorId;
pub use error::{CoreError, SchemaError};
pub use frame::{Column, ColumnValues, Frame};
pub use schema::{DataType, Schema};
pub use structs::{Listing, PriceBar};
