//! Multiplication partial products.
//!
//! One row per multiplier digit, starting with the rightmost digit. Each
//! row is shifted left by its distance from the right end of the
//! multiplier. A one-digit multiplier needs no rows: the product is
//! written directly.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::digit_value;
use crate::errors::ErrorKind;
use crate::kernel::to_biguint;

/// Multiplicand times a single multiplier digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialProductRow {
    /// The multiplier digit for this row
    pub multiplier_digit: u8,
    /// Multiplicand times that digit
    pub value: String,
    /// Columns the row is shifted left (position of the digit from the right)
    pub column_offset: usize,
}

/// Rows for `multiplicand x multiplier`, least-significant digit first.
/// Empty when the multiplier has a single digit.
pub fn decompose_partial_products(
    multiplicand: &str,
    multiplier: &str,
) -> Result<Vec<PartialProductRow>, ErrorKind> {
    if multiplier.len() <= 1 {
        return Ok(Vec::new());
    }

    let top = to_biguint(multiplicand)?;
    let rows = multiplier
        .bytes()
        .rev()
        .enumerate()
        .map(|(column_offset, b)| {
            let multiplier_digit = digit_value(b);
            let value = &top * BigUint::from(multiplier_digit);
            tracing::trace!(column_offset, multiplier_digit, "partial product");
            PartialProductRow {
                multiplier_digit,
                value: value.to_string(),
                column_offset,
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_for_two_digit_multiplier() {
        let rows = decompose_partial_products("123", "45").unwrap();
        assert_eq!(
            rows,
            vec![
                PartialProductRow {
                    multiplier_digit: 5,
                    value: "615".to_string(),
                    column_offset: 0,
                },
                PartialProductRow {
                    multiplier_digit: 4,
                    value: "492".to_string(),
                    column_offset: 1,
                },
            ]
        );
    }

    #[test]
    fn test_single_digit_multiplier_has_no_rows() {
        assert!(decompose_partial_products("123", "7").unwrap().is_empty());
    }

    #[test]
    fn test_zero_digit_row() {
        let rows = decompose_partial_products("12", "105").unwrap();
        assert_eq!(rows[1].multiplier_digit, 0);
        assert_eq!(rows[1].value, "0");
        assert_eq!(rows[2].column_offset, 2);
    }

    #[test]
    fn test_shifted_rows_add_up_to_product() {
        let rows = decompose_partial_products("987", "654").unwrap();
        let total: u64 = rows
            .iter()
            .map(|r| r.value.parse::<u64>().unwrap() * 10u64.pow(r.column_offset as u32))
            .sum();
        assert_eq!(total, 987 * 654);
    }

    #[test]
    fn test_invalid_multiplicand() {
        assert_eq!(
            decompose_partial_products("", "12"),
            Err(ErrorKind::InvalidOperation)
        );
    }
}
