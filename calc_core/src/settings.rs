//! # Calculator Settings
//!
//! User-adjustable knobs. They travel inside the history file (see
//! [`crate::history::History`]) and can be overridden per invocation by
//! the front end.

use serde::{Deserialize, Serialize};

use crate::calculations::division::DivisionView;
use crate::errors::{CalcError, CalcResult};
use crate::operand::INPUT_SEPARATORS;

/// Default number of remembered calculations
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Upper bound for the history cap
pub const MAX_HISTORY_LIMIT: usize = 50;

/// Settings shared by every calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "decimal_separator": ",",
///   "history_limit": 10,
///   "division_view": "Simplified"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Separator used when formatting results
    pub decimal_separator: char,

    /// Maximum number of history entries kept
    pub history_limit: usize,

    /// Division layout used unless the caller asks otherwise
    pub division_view: DivisionView,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            decimal_separator: ',',
            history_limit: DEFAULT_HISTORY_LIMIT,
            division_view: DivisionView::Simplified,
        }
    }
}

impl CalculatorSettings {
    /// Validate settings loaded from disk or the command line.
    pub fn validate(&self) -> CalcResult<()> {
        if !INPUT_SEPARATORS.contains(&self.decimal_separator) {
            return Err(CalcError::invalid_input(
                "decimal_separator",
                self.decimal_separator.to_string(),
                "Separator must be ',' or '.'",
            ));
        }
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(CalcError::invalid_input(
                "history_limit",
                self.history_limit.to_string(),
                format!("History limit must be between 1 and {MAX_HISTORY_LIMIT}"),
            ));
        }
        Ok(())
    }

    /// Builder-style separator override
    pub fn with_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Builder-style division view override
    pub fn with_division_view(mut self, view: DivisionView) -> Self {
        self.division_view = view;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CalculatorSettings::default();
        assert_eq!(settings.decimal_separator, ',');
        assert_eq!(settings.history_limit, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_separator() {
        let settings = CalculatorSettings::default().with_separator(';');
        let err = settings.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_history_limit_bounds() {
        let mut settings = CalculatorSettings::default();
        settings.history_limit = 0;
        assert!(settings.validate().is_err());
        settings.history_limit = MAX_HISTORY_LIMIT;
        assert!(settings.validate().is_ok());
        settings.history_limit = MAX_HISTORY_LIMIT + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: CalculatorSettings = serde_json::from_str(r#"{"decimal_separator":"."}"#).unwrap();
        assert_eq!(settings.decimal_separator, '.');
        assert_eq!(settings.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(settings.division_view, DivisionView::Simplified);
    }
}
