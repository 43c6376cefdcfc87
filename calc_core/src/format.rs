//! # Result Formatting
//!
//! Turns scaled digit strings back into what the student reads: the
//! separator reinserted, trailing decimal zeros and a bare separator
//! dropped, and a minus sign for negative differences.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::format::format_digits;
//!
//! assert_eq!(format_digits("19045", 2, ','), "190,45");
//! assert_eq!(format_digits("1500", 3, ','), "1,5");
//! assert_eq!(format_digits("5", 2, ','), "0,05");
//! assert_eq!(format_digits("2000", 3, '.'), "2");
//! ```

use crate::calculations::CalculationResult;
use crate::operand::Operand;

/// Insert `separator` `decimal_places` digits from the right and tidy up.
pub fn format_digits(digits: &str, decimal_places: usize, separator: char) -> String {
    let digits = if digits.is_empty() { "0" } else { digits };

    if decimal_places == 0 {
        return strip_leading_zeros(digits).to_string();
    }

    let padded = if digits.len() <= decimal_places {
        format!("{digits:0>width$}", width = decimal_places + 1)
    } else {
        digits.to_string()
    };

    let split = padded.len() - decimal_places;
    let int_part = strip_leading_zeros(&padded[..split]);
    let frac_part = padded[split..].trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}{separator}{frac_part}")
    }
}

/// Keep at least one digit.
fn strip_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Final answer of a calculation, with sign.
pub fn format_result(result: &CalculationResult, separator: char) -> String {
    let body = format_digits(&result.result_digits, result.result_decimal_places, separator);
    if result.is_negative && body != "0" {
        format!("-{body}")
    } else {
        body
    }
}

/// Division remainder, if the result has one.
pub fn format_remainder(result: &CalculationResult, separator: char) -> Option<String> {
    result
        .remainder
        .as_ref()
        .map(|r| format_digits(&r.digits, r.decimal_places, separator))
}

/// An operand as typed, normalized.
pub fn format_operand(operand: &Operand, separator: char) -> String {
    format_digits(&operand.digits, operand.decimal_places, separator)
}
