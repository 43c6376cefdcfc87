//! # Division
//!
//! Truncating long division on decimal-scaled integers.
//!
//! ## Scaling rule
//!
//! With `d1` decimals in the dividend and `d2` in the divisor:
//!
//! - when `d2 > d1` the dividend is right-padded with `d2 - d1` zeros
//!   before dividing, so the divisor's decimals never eat into the quotient
//! - the quotient has `max(d1 - d2, 0)` decimal places
//! - the remainder has `max(d1, d2)` decimal places
//!
//! so `divisor × quotient + remainder == dividend` holds on the scaled
//! values. Digits beyond the dividend's own decimals are not generated:
//! `7,5 ÷ 2` is `3,7` remainder `0,1`.
//!
//! ## Views
//!
//! Both views come from the same decomposition; see
//! [`crate::steps::long_division`].

use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::operand::{Operand, Operator};
use crate::steps::long_division::{
    decompose_division, DivisionStep, ExpandedDivision, LongDivision, SimplifiedDivision,
};
use crate::steps::Step;

use super::{CalculationResult, Remainder};

/// Which division layout the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DivisionView {
    /// Dividend, divisor, quotient and final remainder
    #[default]
    Simplified,
    /// Every intermediate product and remainder row
    Expanded,
}

/// Renderer-facing division layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view")]
pub enum DivisionPresentation {
    Simplified(SimplifiedDivision),
    Expanded(ExpandedDivision),
}

/// Digit strings actually divided, plus quotient and remainder scales.
struct ScaledDivision {
    dividend: String,
    quotient_places: usize,
    remainder_places: usize,
}

fn scale(dividend: &Operand, divisor: &Operand) -> ScaledDivision {
    ScaledDivision {
        dividend: dividend.digits_at_scale(divisor.decimal_places),
        quotient_places: dividend.decimal_places.saturating_sub(divisor.decimal_places),
        remainder_places: dividend.decimal_places.max(divisor.decimal_places),
    }
}

/// Divide `dividend` by `divisor`.
///
/// # Errors
///
/// - [`ErrorKind::ZeroDividedByZero`] when both are zero
/// - [`ErrorKind::DivideByZero`] for a zero divisor
/// - [`ErrorKind::ZeroDividend`] for a zero dividend (the answer is zero)
pub fn divide(dividend: &Operand, divisor: &Operand, view: DivisionView) -> Result<CalculationResult, ErrorKind> {
    dividend.validate()?;
    divisor.validate()?;

    match (dividend.is_zero(), divisor.is_zero()) {
        (true, true) => return Err(ErrorKind::ZeroDividedByZero),
        (false, true) => return Err(ErrorKind::DivideByZero),
        (true, false) => return Err(ErrorKind::ZeroDividend),
        (false, false) => {}
    }

    let scaled = scale(dividend, divisor);
    let division = decompose_division(&scaled.dividend, &divisor.digits)?;

    tracing::debug!(
        quotient_places = scaled.quotient_places,
        remainder_places = scaled.remainder_places,
        steps = division.steps.len(),
        ?view,
        "division"
    );

    let remainder = Remainder {
        digits: division.final_remainder().to_string(),
        decimal_places: scaled.remainder_places,
    };
    let steps = division.steps.into_iter().map(Step::from).collect();

    let mut result = CalculationResult::new(
        Operator::Divide,
        &[dividend.clone(), divisor.clone()],
        division.quotient,
        scaled.quotient_places,
        steps,
    );
    result.remainder = Some(remainder);
    result.division_view = Some(view);
    Ok(result)
}

/// Rebuild the long division held in a division result.
///
/// `None` if the result is not a division.
pub fn long_division(result: &CalculationResult) -> Option<LongDivision> {
    let [dividend, divisor] = result.operands.as_slice() else {
        return None;
    };
    if result.operator != Operator::Divide {
        return None;
    }

    let steps: Vec<DivisionStep> = result
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::Division(d) => Some(d.clone()),
            _ => None,
        })
        .collect();

    Some(LongDivision {
        dividend: scale(dividend, divisor).dividend,
        divisor: divisor.digits.trim_start_matches('0').to_string(),
        quotient: result.result_digits.clone(),
        steps,
    })
}

/// The layout for the result's own view.
pub fn presentation(result: &CalculationResult) -> Option<DivisionPresentation> {
    presentation_as(result, result.division_view?)
}

/// The layout for a chosen view. Switching views needs no recomputation.
pub fn presentation_as(result: &CalculationResult, view: DivisionView) -> Option<DivisionPresentation> {
    let division = long_division(result)?;
    Some(match view {
        DivisionView::Simplified => DivisionPresentation::Simplified(division.simplified()),
        DivisionView::Expanded => DivisionPresentation::Expanded(division.expanded()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{format_remainder, format_result};

    fn int(digits: &str) -> Operand {
        Operand::integer(digits)
    }

    #[test]
    fn test_17_by_5_expanded() {
        let result = divide(&int("17"), &int("5"), DivisionView::Expanded).unwrap();
        assert_eq!(result.result_digits, "3");
        assert_eq!(result.steps.len(), 1);
        match &result.steps[0] {
            Step::Division(step) => {
                assert_eq!(step.dividend_chunk, "17");
                assert_eq!(step.product, "15");
                assert_eq!(step.remainder, "2");
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(format_remainder(&result, ','), Some("2".to_string()));
    }

    #[test]
    fn test_zero_cases() {
        let view = DivisionView::Simplified;
        assert_eq!(divide(&int("0"), &int("0"), view), Err(ErrorKind::ZeroDividedByZero));
        assert_eq!(divide(&int("0"), &int("5"), view), Err(ErrorKind::ZeroDividend));
        assert_eq!(divide(&int("5"), &int("0"), view), Err(ErrorKind::DivideByZero));
        assert_eq!(
            divide(&Operand::new("000", 2), &int("5"), view),
            Err(ErrorKind::ZeroDividend)
        );
    }

    #[test]
    fn test_dividend_with_more_decimals() {
        // 7,5 / 2 = 3,7 remainder 0,1
        let result = divide(&Operand::new("75", 1), &int("2"), DivisionView::Simplified).unwrap();
        assert_eq!(format_result(&result, ','), "3,7");
        assert_eq!(format_remainder(&result, ','), Some("0,1".to_string()));
    }

    #[test]
    fn test_divisor_with_more_decimals() {
        // 3 / 0,5 = 6
        let result = divide(&int("3"), &Operand::new("05", 1), DivisionView::Simplified).unwrap();
        assert_eq!(format_result(&result, ','), "6");
        assert_eq!(result.result_decimal_places, 0);
        assert_eq!(format_remainder(&result, ','), Some("0".to_string()));
    }

    #[test]
    fn test_equal_scales() {
        // 1,5 / 0,5 = 3
        let result = divide(&Operand::new("15", 1), &Operand::new("05", 1), DivisionView::Simplified).unwrap();
        assert_eq!(format_result(&result, ','), "3");
    }

    #[test]
    fn test_views_agree() {
        let result = divide(&int("7825"), &int("25"), DivisionView::Simplified).unwrap();
        let Some(DivisionPresentation::Simplified(simple)) = presentation(&result) else {
            panic!("expected simplified layout");
        };
        let Some(DivisionPresentation::Expanded(full)) = presentation_as(&result, DivisionView::Expanded) else {
            panic!("expected expanded layout");
        };
        assert_eq!(simple.quotient, "313");
        assert_eq!(simple.quotient, full.quotient);
        assert_eq!(simple.final_remainder, full.final_remainder);
        assert_eq!(full.rows.len(), 3);
    }

    #[test]
    fn test_long_division_round_trip_from_result() {
        let result = divide(&int("3"), &Operand::new("05", 1), DivisionView::Expanded).unwrap();
        let division = long_division(&result).unwrap();
        assert_eq!(division.dividend, "30");
        assert_eq!(division.divisor, "5");
        assert_eq!(division.quotient, "6");
    }

    #[test]
    fn test_not_a_division() {
        let sum = crate::calculations::add(&[int("1"), int("2")]).unwrap();
        assert!(long_division(&sum).is_none());
        assert!(presentation(&sum).is_none());
    }

    #[test]
    fn test_default_view_is_simplified() {
        assert_eq!(DivisionView::default(), DivisionView::Simplified);
    }
}
