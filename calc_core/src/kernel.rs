//! # Exact Arithmetic Kernel
//!
//! Decimal-aligned big-integer arithmetic. Operands are brought to a
//! common scale by right-padding their digits with zeros, then handled as
//! plain unsigned integers. The step engines in [`crate::steps`] work on
//! the same aligned digit strings so every step lines up with the result.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

use crate::errors::ErrorKind;
use crate::operand::Operand;

/// Operands brought to a common scale and a common width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedOperands {
    /// Digit strings, all `width` long (left-padded with zeros)
    pub digits: Vec<String>,
    /// Shared number of decimal places
    pub decimal_places: usize,
}

impl AlignedOperands {
    /// Width of every aligned digit string
    pub fn width(&self) -> usize {
        self.digits.first().map(String::len).unwrap_or(0)
    }

    /// Aligned digits as integers
    pub fn values(&self) -> Result<Vec<BigUint>, ErrorKind> {
        self.digits.iter().map(|d| to_biguint(d)).collect()
    }
}

/// Scale every operand to the largest decimal-place count and left-pad
/// them to the same width.
pub fn align(operands: &[Operand]) -> AlignedOperands {
    let decimal_places = operands.iter().map(|o| o.decimal_places).max().unwrap_or(0);
    let scaled: Vec<String> = operands
        .iter()
        .map(|o| o.digits_at_scale(decimal_places))
        .collect();
    let width = scaled.iter().map(String::len).max().unwrap_or(0);

    AlignedOperands {
        digits: scaled.into_iter().map(|d| left_pad(&d, width)).collect(),
        decimal_places,
    }
}

/// Left-pad a digit string with zeros to `width`.
pub fn left_pad(digits: &str, width: usize) -> String {
    format!("{digits:0>width$}")
}

/// Parse a digit string. Leading zeros are fine.
pub fn to_biguint(digits: &str) -> Result<BigUint, ErrorKind> {
    if digits.is_empty() {
        return Err(ErrorKind::InvalidOperation);
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(ErrorKind::InvalidOperation)
}

/// Sum of all values.
pub fn sum(values: &[BigUint]) -> BigUint {
    values.iter().fold(BigUint::zero(), |acc, v| acc + v)
}

/// `|a - b|` and whether `a < b`.
pub fn abs_difference(a: &BigUint, b: &BigUint) -> (BigUint, bool) {
    if a < b {
        (b - a, true)
    } else {
        (a - b, false)
    }
}

/// Product of two values.
pub fn product(a: &BigUint, b: &BigUint) -> BigUint {
    a * b
}

/// Truncating quotient and remainder. `None` for a zero divisor.
pub fn quotient_remainder(dividend: &BigUint, divisor: &BigUint) -> Option<(BigUint, BigUint)> {
    if divisor.is_zero() {
        return None;
    }
    Some(dividend.div_rem(divisor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_align_scales_and_pads() {
        let aligned = align(&[Operand::new("12345", 2), Operand::integer("67")]);
        assert_eq!(aligned.decimal_places, 2);
        assert_eq!(aligned.digits, vec!["12345", "06700"]);
        assert_eq!(aligned.width(), 5);
    }

    #[test]
    fn test_align_many_operands() {
        let aligned = align(&[
            Operand::new("5", 1),
            Operand::new("125", 3),
            Operand::integer("100"),
        ]);
        assert_eq!(aligned.decimal_places, 3);
        assert_eq!(aligned.digits, vec!["000500", "000125", "100000"]);
    }

    #[test]
    fn test_to_biguint_accepts_leading_zeros() {
        assert_eq!(to_biguint("007").unwrap(), big(7));
        assert_eq!(to_biguint(""), Err(ErrorKind::InvalidOperation));
        assert_eq!(to_biguint("1,5"), Err(ErrorKind::InvalidOperation));
    }

    #[test]
    fn test_sum_beyond_u64() {
        let a = to_biguint("99999999999999999999").unwrap();
        let total = sum(&[a.clone(), a, big(2)]);
        assert_eq!(total.to_string(), "200000000000000000000");
    }

    #[test]
    fn test_abs_difference_reports_sign() {
        assert_eq!(abs_difference(&big(5), &big(8)), (big(3), true));
        assert_eq!(abs_difference(&big(8), &big(5)), (big(3), false));
        assert_eq!(abs_difference(&big(5), &big(5)), (big(0), false));
    }

    #[test]
    fn test_quotient_remainder() {
        assert_eq!(quotient_remainder(&big(17), &big(5)), Some((big(3), big(2))));
        assert_eq!(quotient_remainder(&big(17), &big(0)), None);
    }
}
