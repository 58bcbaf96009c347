//! # Meridian Calculator Library
//!
//! This crate contains the core ETL contract for the Meridian system. It
//! defines a universal `Calculator` trait and provides the concrete
//! calculators that produce schema-validated frames.
//!
//! ## Architectural Principles
//!
//! - **Enforced Output Contract:** Callers run calculators through
//!   `CalculatorExt::execute`, which validates the produced frame against the
//!   calculator's declared `output_schema` before handing it over. A
//!   calculator cannot opt out of validation: `CalculatorExt` is implemented
//!   blanket-style for every `Calculator`, so there is nothing to override.
//! - **Calculator Agnostic Callers:** By using the `Calculator` trait, outer
//!   layers (the CLI, any future orchestrator) can operate on any calculator
//!   without knowing its internals.
//! - **Extensibility:** Adding a new calculator involves creating a new
//!   module, implementing the `Calculator` trait, and adding it to the
//!   `CalculatorId` enum and `factory`.
//!
//! ## Public API
//!
//! The primary public components are:
//! - `Calculator`: the trait all calculators implement.
//! - `CalculatorExt::execute`: the enforced run-and-validate entry point.
//! - `CalculatorId`: a simple enum to identify which calculator to create.
//! - `create_calculator`: the factory function to construct a calculator.
//! - The concrete calculator structs themselves (e.g. `DailyReturnsCalculator`).

// Declare all the modules that constitute this crate.
pub mod daily_returns;
pub mod error;
pub mod factory;
pub mod stock_data;

// Re-export the key components to create a clean, public-facing API.
pub use daily_returns::{compute_returns, DailyReturnsCalculator};
pub use error::CalculatorError;
pub use factory::create_calculator;
pub use stock_data::StockDataCalculator;

// Re-export CalculatorId from core_types
pub use core_types::enums::CalculatorId;

use async_trait::async_trait;
use core_types::{Frame, Schema};

/// The core trait that all calculators must implement.
///
/// A calculator owns its configuration and whatever collaborators it was
/// given at construction (data sources, other calculators); both operations
/// therefore take no explicit inputs.
///
/// The `Send + Sync` bounds allow calculator instances to be driven from any
/// task when an external orchestrator runs several concurrently; instances
/// share no state with each other.
#[async_trait]
pub trait Calculator: Send + Sync {
    /// Declares the expected output: a mapping of column name to type tag.
    ///
    /// Must be deterministic and side-effect-free; `execute` consults it
    /// after every calculation.
    fn output_schema(&self) -> Schema;

    /// Produces the result frame.
    ///
    /// Implementations read `self`'s config and collaborators. Errors are
    /// calculator-specific and propagate unmodified through `execute`.
    async fn calculate(&self) -> Result<Frame, CalculatorError>;
}

/// The enforcement point of the calculator contract.
///
/// `execute` is deliberately *not* part of `Calculator`: it lives in this
/// extension trait with a blanket implementation, so no calculator can
/// provide (or shadow) its own version — every caller that goes through the
/// trait gets the same run-then-validate behavior.
#[async_trait]
pub trait CalculatorExt: Calculator {
    /// Runs `calculate` and validates the produced frame against
    /// `output_schema`.
    ///
    /// - A calculation error is returned as-is; the schema is never
    ///   consulted in that case. No retry, no suppression.
    /// - The frame's column-name set must equal the declared set exactly,
    ///   and each column's type tag must match exactly.
    /// - On success the frame is returned untouched: same columns, same
    ///   order, same rows as `calculate` produced.
    ///
    /// Each call is independent; nothing is memoized between calls.
    async fn execute(&self) -> Result<Frame, CalculatorError> {
        let frame = self.calculate().await?;
        let schema = self.output_schema();
        schema.validate(&frame.schema())?;
        Ok(frame)
    }
}

#[async_trait]
impl<T: Calculator + ?Sized> CalculatorExt for T {}

impl std::fmt::Debug for dyn Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Calculator")
    }
}
