//! # Subtraction
//!
//! `a - b` with ordinary sign semantics: the larger magnitude always goes
//! on top of the paper layout and the result is negated when `a < b`.

use crate::errors::ErrorKind;
use crate::kernel;
use crate::operand::{Operand, Operator};
use crate::steps::{decompose_borrows, Step};

use super::CalculationResult;

/// Subtract `b` from `a`.
///
/// Borrow steps are computed on the magnitude-ordered, decimal-aligned
/// digits, so their columns always refer to the top row of the layout.
pub fn subtract(a: &Operand, b: &Operand) -> Result<CalculationResult, ErrorKind> {
    a.validate()?;
    b.validate()?;

    let operands = [a.clone(), b.clone()];
    let aligned = kernel::align(&operands);
    let values = aligned.values()?;
    let (difference, is_negative) = kernel::abs_difference(&values[0], &values[1]);

    let (top, bottom) = if is_negative {
        (&aligned.digits[1], &aligned.digits[0])
    } else {
        (&aligned.digits[0], &aligned.digits[1])
    };
    let trace = decompose_borrows(top, bottom);

    tracing::debug!(
        decimal_places = aligned.decimal_places,
        borrows = trace.steps.len(),
        is_negative,
        "subtraction"
    );

    let steps = trace.steps.into_iter().map(Step::from).collect();
    let mut result = CalculationResult::new(
        Operator::Subtract,
        &operands,
        difference.to_string(),
        aligned.decimal_places,
        steps,
    );
    result.is_negative = is_negative;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::BorrowStep;

    #[test]
    fn test_500_minus_123() {
        let result = subtract(&Operand::integer("500"), &Operand::integer("123")).unwrap();
        assert_eq!(result.result_digits, "377");
        assert!(!result.is_negative);
        assert_eq!(
            result.steps,
            vec![Step::Borrow(BorrowStep {
                from_column: 2,
                from_new_value: 4,
                to_column: 0,
                to_new_value: 10,
            })]
        );
    }

    #[test]
    fn test_smaller_minus_larger_is_negative() {
        let result = subtract(&Operand::integer("123"), &Operand::integer("500")).unwrap();
        assert_eq!(result.result_digits, "377");
        assert!(result.is_negative);
        // Borrows are taken from 500, the larger magnitude
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.formatted(','), "-377");
    }

    #[test]
    fn test_equal_operands() {
        let result = subtract(&Operand::new("25", 1), &Operand::new("250", 2)).unwrap();
        assert_eq!(result.formatted(','), "0");
        assert!(!result.is_negative);
    }

    #[test]
    fn test_decimal_alignment() {
        // 10 - 0,01 = 9,99
        let result = subtract(&Operand::integer("10"), &Operand::new("001", 2)).unwrap();
        assert_eq!(result.result_digits, "999");
        assert_eq!(result.result_decimal_places, 2);
        assert_eq!(result.formatted(','), "9,99");
        match &result.steps[0] {
            Step::Borrow(b) => {
                assert_eq!(b.from_column, 3);
                assert_eq!(b.to_column, 0);
                assert_eq!(b.passed_columns(), 1..3);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }
}
