//! # Error Types
//!
//! Two layers of errors live here:
//!
//! - [`ErrorKind`] - the user-facing classification every arithmetic entry
//!   point returns. These are expected outcomes (a zero divisor, a number
//!   with no exact root), never crashes. Each kind maps to exactly one
//!   message; displaying it is the caller's job.
//! - [`CalcError`] - everything else the crate can hit: history file I/O,
//!   lock contention, malformed JSON, schema mismatches.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::ErrorKind;
//! use calc_core::operand::Operand;
//! use calc_core::calculations::division::{divide, DivisionView};
//!
//! let five = Operand::integer("5");
//! let zero = Operand::integer("0");
//! let err = divide(&five, &zero, DivisionView::Simplified).unwrap_err();
//! assert_eq!(err, ErrorKind::DivideByZero);
//! assert_eq!(err.code(), "DIVIDE_BY_ZERO");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations that touch the outside world
pub type CalcResult<T> = Result<T, CalcError>;

/// Domain classification for a calculation that cannot produce a number.
///
/// All variants are recoverable. The `Display` text is the message shown
/// to the student.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ErrorKind {
    /// Non-zero dividend over a zero divisor
    #[error("The divisor is zero, there is no solution.")]
    DivideByZero,

    /// Both dividend and divisor are zero
    #[error("The dividend and the divisor are both zero, there is no solution.")]
    ZeroDividedByZero,

    /// Zero dividend over a non-zero divisor; the quotient is zero
    #[error("The dividend is zero, so the result is zero.")]
    ZeroDividend,

    /// Either factor is zero; the product is zero
    #[error("Multiplying by zero always gives zero.")]
    MultiplyByZero,

    /// The product exceeds the digit ceiling
    #[error("The result is too large.")]
    ResultTooLarge,

    /// Zero has no prime decomposition
    #[error("Zero cannot be factorized.")]
    CannotFactorizeZero,

    /// Square root of a negative number
    #[error("Cannot take the square root of a negative number.")]
    NegativeRadicand,

    /// The radicand is not a perfect square
    #[error("This number has no exact integer square root.")]
    NonExactRoot,

    /// The radicand has a decimal part
    #[error("The square root only works with whole numbers.")]
    NonIntegerRadicand,

    /// Malformed expression
    #[error("Invalid operation.")]
    InvalidOperation,
}

impl ErrorKind {
    /// Human-readable message for this kind.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Short error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::DivideByZero => "DIVIDE_BY_ZERO",
            ErrorKind::ZeroDividedByZero => "ZERO_DIVIDED_BY_ZERO",
            ErrorKind::ZeroDividend => "ZERO_DIVIDEND",
            ErrorKind::MultiplyByZero => "MULTIPLY_BY_ZERO",
            ErrorKind::ResultTooLarge => "RESULT_TOO_LARGE",
            ErrorKind::CannotFactorizeZero => "CANNOT_FACTORIZE_ZERO",
            ErrorKind::NegativeRadicand => "NEGATIVE_RADICAND",
            ErrorKind::NonExactRoot => "NON_EXACT_ROOT",
            ErrorKind::NonIntegerRadicand => "NON_INTEGER_RADICAND",
            ErrorKind::InvalidOperation => "INVALID_OPERATION",
        }
    }

    /// Informational kinds describe a definite answer (zero) rather than
    /// an impossible one.
    pub fn is_informational(&self) -> bool {
        matches!(self, ErrorKind::ZeroDividend | ErrorKind::MultiplyByZero)
    }
}

/// Structured error type for everything outside pure arithmetic.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A calculation was rejected with a domain classification
    #[error("{0}")]
    Domain(ErrorKind),

    /// A setting or argument is out of range
    #[error("Bad value {value} for {field}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Reading or writing the history file failed
    #[error("Could not {operation} {path}: {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// History file is locked by another process
    #[error("History {path} is in use by {locked_by} (since {locked_at})")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// History JSON could not be read or written
    #[error("History is not valid JSON: {reason}")]
    SerializationError { reason: String },

    /// History schema version mismatch
    #[error("History schema {file_version} is not supported (this build reads {expected_version})")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl From<ErrorKind> for CalcError {
    fn from(kind: ErrorKind) -> Self {
        CalcError::Domain(kind)
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

impl CalcError {
    /// Settings or argument rejection
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// I/O failure on `path` during `operation`
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Another process owns the history lock
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Domain outcomes and lock contention go away on their own; the rest need a fix
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. } | CalcError::Domain(_))
    }

    /// Stable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Domain(kind) => kind.code(),
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
