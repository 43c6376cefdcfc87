//! # Addition
//!
//! Sums two or more operands column by column. Operands are aligned on
//! their decimal separator first, so the carries line up with the digits
//! the student sees.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::addition::add;
//! use calc_core::operand::Operand;
//!
//! let result = add(&[Operand::integer("999"), Operand::integer("1")]).unwrap();
//! assert_eq!(result.result_digits, "1000");
//! assert_eq!(result.steps.len(), 3);
//! ```

use crate::errors::ErrorKind;
use crate::kernel;
use crate::operand::{Operand, Operator};
use crate::steps::{decompose_carries, Step};

use super::CalculationResult;

/// Add two or more operands.
///
/// The result keeps the largest decimal-place count of the operands;
/// trailing zero decimals are only dropped when formatting.
///
/// # Errors
///
/// [`ErrorKind::InvalidOperation`] for fewer than two operands or a
/// malformed operand.
pub fn add(operands: &[Operand]) -> Result<CalculationResult, ErrorKind> {
    if operands.len() < 2 {
        return Err(ErrorKind::InvalidOperation);
    }
    for operand in operands {
        operand.validate()?;
    }

    let aligned = kernel::align(operands);
    let total = kernel::sum(&aligned.values()?);
    let steps: Vec<Step> = decompose_carries(&aligned.digits)
        .into_iter()
        .map(Step::from)
        .collect();

    tracing::debug!(
        operands = operands.len(),
        decimal_places = aligned.decimal_places,
        carries = steps.len(),
        "addition"
    );

    Ok(CalculationResult::new(
        Operator::Add,
        operands,
        total.to_string(),
        aligned.decimal_places,
        steps,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::CarryStep;

    fn carries(result: &CalculationResult) -> Vec<CarryStep> {
        result
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Carry(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_999_plus_1() {
        let result = add(&[Operand::integer("999"), Operand::integer("1")]).unwrap();
        assert_eq!(result.result_digits, "1000");
        assert_eq!(result.result_decimal_places, 0);
        assert!(!result.is_negative);

        let steps = carries(&result);
        assert_eq!(steps.iter().map(|c| c.column).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(steps.iter().all(|c| c.value == "1"));
    }

    #[test]
    fn test_decimal_alignment() {
        let result = add(&[Operand::new("12345", 2), Operand::integer("67")]).unwrap();
        assert_eq!(result.result_digits, "19045");
        assert_eq!(result.result_decimal_places, 2);
        // 5+0, 4+0, 3+7=10 carries into 2+6+1
        let steps = carries(&result);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].column, 2);
    }

    #[test]
    fn test_scale_kept_before_stripping() {
        let result = add(&[Operand::new("15", 1), Operand::new("25", 1)]).unwrap();
        assert_eq!(result.result_digits, "40");
        assert_eq!(result.result_decimal_places, 1);
        assert_eq!(result.formatted(','), "4");
    }

    #[test]
    fn test_many_operands_multi_digit_carry() {
        let operands = vec![Operand::integer("9"); 12];
        let result = add(&operands).unwrap();
        assert_eq!(result.result_digits, "108");
        assert_eq!(carries(&result)[0].value, "10");
    }

    #[test]
    fn test_requires_two_operands() {
        assert_eq!(add(&[Operand::integer("5")]), Err(ErrorKind::InvalidOperation));
        assert_eq!(add(&[]), Err(ErrorKind::InvalidOperation));
    }

    #[test]
    fn test_rejects_malformed_operand() {
        let bad = Operand::new("1x", 0);
        assert_eq!(add(&[bad, Operand::integer("1")]), Err(ErrorKind::InvalidOperation));
    }
}
