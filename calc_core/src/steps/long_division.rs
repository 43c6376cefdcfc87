//! # Long Division
//!
//! The one and only long-division algorithm in the crate. Both the
//! simplified view (dividend, divisor, quotient, final remainder) and the
//! expanded view (every product and remainder row) are projections of the
//! same [`LongDivision`] value, so the two can never disagree.
//!
//! ## Algorithm
//!
//! Digits of the dividend are appended to a running chunk. Once the chunk
//! reaches the divisor, every following position yields a quotient digit:
//!
//! ```text
//! chunk      = remainder * 10 + next digit
//! q          = chunk div divisor        (0..=9)
//! product    = q * divisor
//! remainder  = chunk - product
//! ```
//!
//! A zero remainder resets the chunk to empty (not `"0"`), so the next
//! chunk does not grow a leading zero. When the chunk is still below the
//! divisor after the quotient has begun, a degenerate step with product 0
//! records the zero quotient digit.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::kernel::to_biguint;

/// One chunk / product / remainder cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionStep {
    /// Value being divided at this step (no leading zeros)
    pub dividend_chunk: String,
    /// Quotient digit times the divisor
    pub product: String,
    /// `dividend_chunk - product`
    pub remainder: String,
    /// Index of the dividend digit the chunk ends on (left to right)
    pub position_in_dividend: usize,
    /// Quotient digit written at this position
    pub quotient_digit: u8,
}

impl DivisionStep {
    /// True for the zero-quotient steps that only bring a digit down.
    pub fn is_bring_down_only(&self) -> bool {
        self.quotient_digit == 0
    }
}

/// A complete long division on scaled integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongDivision {
    pub dividend: String,
    pub divisor: String,
    pub quotient: String,
    pub steps: Vec<DivisionStep>,
}

impl LongDivision {
    /// Remainder left after the last step.
    pub fn final_remainder(&self) -> &str {
        self.steps
            .last()
            .map(|s| s.remainder.as_str())
            .unwrap_or(self.dividend.as_str())
    }

    /// Column of the dividend above which the first quotient digit sits.
    pub fn quotient_start_column(&self) -> usize {
        self.steps
            .first()
            .map(|s| s.position_in_dividend)
            .unwrap_or(0)
    }

    /// Dividend, divisor, quotient and final remainder only.
    pub fn simplified(&self) -> SimplifiedDivision {
        simplified(self)
    }

    /// Every intermediate row.
    pub fn expanded(&self) -> ExpandedDivision {
        expanded(self)
    }
}

/// Divide two digit strings the way it is done on paper.
///
/// Returns [`ErrorKind::DivideByZero`] for a zero divisor. A quotient of
/// zero yields a single step spanning the whole dividend.
pub fn decompose_division(dividend: &str, divisor: &str) -> Result<LongDivision, ErrorKind> {
    let divisor_value = to_biguint(divisor)?;
    if divisor_value.is_zero() {
        return Err(ErrorKind::DivideByZero);
    }

    let mut steps = Vec::new();
    let mut quotient = String::new();
    let mut chunk = String::new();

    for (position, digit) in dividend.chars().enumerate() {
        chunk.push(digit);
        let chunk_value = to_biguint(&chunk)?;

        if quotient.is_empty() && chunk_value < divisor_value {
            continue;
        }

        let (quotient_digit, product) = next_quotient_digit(&chunk_value, &divisor_value);
        let remainder = &chunk_value - &product;

        let step = DivisionStep {
            dividend_chunk: chunk_value.to_string(),
            product: product.to_string(),
            remainder: remainder.to_string(),
            position_in_dividend: position,
            quotient_digit,
        };
        tracing::trace!(?step, "division step");
        steps.push(step);

        quotient.push(char::from(b'0' + quotient_digit));
        chunk = if remainder.is_zero() {
            String::new()
        } else {
            remainder.to_string()
        };
    }

    if quotient.is_empty() {
        let whole = to_biguint(dividend)?.to_string();
        quotient.push('0');
        steps.push(DivisionStep {
            dividend_chunk: whole.clone(),
            product: "0".to_string(),
            remainder: whole,
            position_in_dividend: dividend.len().saturating_sub(1),
            quotient_digit: 0,
        });
    }

    Ok(LongDivision {
        dividend: dividend.to_string(),
        divisor: divisor_value.to_string(),
        quotient,
        steps,
    })
}

/// Largest `q` in 0..=9 with `q * divisor <= chunk`, found by repeated
/// subtraction, together with `q * divisor`.
fn next_quotient_digit(chunk: &BigUint, divisor: &BigUint) -> (u8, BigUint) {
    let mut digit = 0u8;
    let mut product = BigUint::zero();
    while digit < 9 && &product + divisor <= *chunk {
        product += divisor;
        digit += 1;
    }
    (digit, product)
}

/// The usual layout: no intermediate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedDivision {
    pub dividend: String,
    pub divisor: String,
    pub quotient: String,
    pub final_remainder: String,
}

/// One product / remainder pair of the expanded layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedRow {
    /// Chunk the row divides
    pub dividend_chunk: String,
    /// Subtracted product, right-aligned on `end_column`
    pub product: String,
    /// Remainder, right-aligned on `end_column`
    pub remainder: String,
    /// Dividend column both values end on
    pub end_column: usize,
    /// Digit brought down next to the remainder, if any remain
    pub brought_down: Option<char>,
    pub quotient_digit: u8,
}

/// The full paper layout with every intermediate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedDivision {
    pub dividend: String,
    pub divisor: String,
    pub quotient: String,
    /// Column of the dividend under the first quotient digit
    pub quotient_start_column: usize,
    pub rows: Vec<ExpandedRow>,
    pub final_remainder: String,
}

/// Project a division onto the simplified layout.
pub fn simplified(division: &LongDivision) -> SimplifiedDivision {
    SimplifiedDivision {
        dividend: division.dividend.clone(),
        divisor: division.divisor.clone(),
        quotient: division.quotient.clone(),
        final_remainder: division.final_remainder().to_string(),
    }
}

/// Project a division onto the expanded layout.
pub fn expanded(division: &LongDivision) -> ExpandedDivision {
    let dividend: Vec<char> = division.dividend.chars().collect();
    let rows = division
        .steps
        .iter()
        .map(|step| ExpandedRow {
            dividend_chunk: step.dividend_chunk.clone(),
            product: step.product.clone(),
            remainder: step.remainder.clone(),
            end_column: step.position_in_dividend,
            brought_down: dividend.get(step.position_in_dividend + 1).copied(),
            quotient_digit: step.quotient_digit,
        })
        .collect();

    ExpandedDivision {
        dividend: division.dividend.clone(),
        divisor: division.divisor.clone(),
        quotient: division.quotient.clone(),
        quotient_start_column: division.quotient_start_column(),
        rows,
        final_remainder: division.final_remainder().to_string(),
    }
}
