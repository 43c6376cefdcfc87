//! # calc_core - Paper Arithmetic Engine
//!
//! `calc_core` is the computational heart of Paper Calculator. It answers
//! arithmetic the way a student works it on paper: every carry, borrow,
//! partial product and long-division cycle comes back as structured data
//! a front end can lay out. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Exact**: arbitrary-precision integers on a shared decimal scale,
//!   never floating point
//! - **Stateless**: pure functions from operands to results
//! - **JSON-First**: all result and step types implement Serialize/Deserialize
//! - **Rich Errors**: a closed set of domain error kinds with user messages
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{evaluate, CalculatorSettings, ErrorKind};
//!
//! let settings = CalculatorSettings::default();
//!
//! let sum = evaluate("123,45+67", &settings).unwrap();
//! assert_eq!(sum.formatted(','), "190,45");
//!
//! assert_eq!(evaluate("5/0", &settings), Err(ErrorKind::DivideByZero));
//! ```
//!
//! ## Modules
//!
//! - [`operand`] - Display text parsing and decimal operands
//! - [`kernel`] - Decimal alignment and big-integer arithmetic
//! - [`steps`] - Carry, borrow, partial-product and long-division steps
//! - [`calculations`] - The six keypad operations and [`evaluate`]
//! - [`format`] - Result formatting
//! - [`settings`] - Separator, history cap and division view
//! - [`history`] - Remembered calculations
//! - [`errors`] - Structured error types
//! - [`file_io`] - History persistence with atomic saves and locking

pub mod calculations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod format;
pub mod history;
pub mod kernel;
pub mod operand;
pub mod settings;
pub mod steps;

#[cfg(test)]
mod proptests;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    evaluate, Calculation, CalculationResult, DivisionPresentation, DivisionView, Factorization, SquareRoot,
};
pub use errors::{CalcError, CalcResult, ErrorKind};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_history, load_or_create_history, save_history, HistoryLock};
pub use format::{format_remainder, format_result};
pub use history::{History, HistoryEntry, Recorded};
pub use operand::{Operand, Operator, ParsedExpression};
pub use settings::CalculatorSettings;
pub use steps::Step;
