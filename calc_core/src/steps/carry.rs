//! Addition carries.
//!
//! Columns are summed right to left across every operand. When many
//! operands are stacked a column can produce a carry of 10 or more, so the
//! carry value is a digit string rather than a single digit.

use serde::{Deserialize, Serialize};

use super::digit_value;

/// A carry produced by `column` and written above `column + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryStep {
    /// Column that produced the carry, counted from the right
    pub column: usize,
    /// Carry value (may be more than one digit)
    pub value: String,
}

/// Carries for summing equal-width aligned digit strings, in the order
/// they are produced (rightmost column first).
pub fn decompose_carries(aligned: &[String]) -> Vec<CarryStep> {
    let width = aligned.iter().map(String::len).max().unwrap_or(0);
    let mut steps = Vec::new();
    let mut carry: u64 = 0;

    for column in 0..width {
        let column_sum = aligned.iter().fold(carry, |acc, digits| {
            let bytes = digits.as_bytes();
            // Shorter strings are treated as left-padded with zeros
            let digit = bytes
                .len()
                .checked_sub(column + 1)
                .map(|i| digit_value(bytes[i]) as u64)
                .unwrap_or(0);
            acc + digit
        });

        carry = column_sum / 10;
        if carry > 0 {
            tracing::trace!(column, carry, "carry");
            steps.push(CarryStep {
                column,
                value: carry.to_string(),
            });
        }
    }

    steps
}
