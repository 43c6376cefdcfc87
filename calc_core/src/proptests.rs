//! Property-based tests for the arithmetic laws the step engine must keep.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use proptest::prelude::*;

use crate::calculations::{add, divide, factorize, multiply, sqrt_check, subtract, CalculationResult, DivisionView};
use crate::errors::ErrorKind;
use crate::format::format_digits;
use crate::operand::Operand;

// Operand in normalized form: no leading zeros except the single `0`
// in front of a pure fraction
fn operand() -> impl Strategy<Value = Operand> {
    (0u64..1_000_000u64, 0usize..4usize).prop_map(|(value, places)| {
        Operand::new(format!("{value:0>width$}", width = places + 1), places)
    })
}

fn non_zero_operand() -> impl Strategy<Value = Operand> {
    operand().prop_filter("non-zero", |o| !o.is_zero())
}

// Digits scaled up to `scale` decimal places
fn at_scale(digits: &str, places: usize, scale: usize) -> BigUint {
    let value = BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default();
    value * BigUint::from(10u32).pow((scale - places) as u32)
}

// Exact value as a signed integer at a fixed scale
fn signed_value(result: &CalculationResult, scale: usize) -> BigInt {
    let magnitude = BigInt::from(at_scale(&result.result_digits, result.result_decimal_places, scale));
    if result.is_negative {
        -magnitude
    } else {
        magnitude
    }
}

fn operand_value(operand: &Operand, scale: usize) -> BigUint {
    at_scale(&operand.digits, operand.decimal_places, scale)
}

const SCALE: usize = 12;

proptest! {
    // Alignment

    #[test]
    fn add_keeps_widest_scale(a in operand(), b in operand()) {
        let result = add(&[a.clone(), b.clone()]).unwrap();
        prop_assert_eq!(result.result_decimal_places, a.decimal_places.max(b.decimal_places));
    }

    #[test]
    fn subtract_keeps_widest_scale(a in operand(), b in operand()) {
        let result = subtract(&a, &b).unwrap();
        prop_assert_eq!(result.result_decimal_places, a.decimal_places.max(b.decimal_places));
    }

    #[test]
    fn formatting_preserves_value(a in operand()) {
        let text = format_digits(&a.digits, a.decimal_places, ',');
        let reparsed = Operand::from_text(&text);
        prop_assert_eq!(operand_value(&reparsed, SCALE), operand_value(&a, SCALE));
    }

    // Addition

    #[test]
    fn add_commutative(a in operand(), b in operand()) {
        let ab = add(&[a.clone(), b.clone()]).unwrap();
        let ba = add(&[b, a]).unwrap();
        prop_assert_eq!(signed_value(&ab, SCALE), signed_value(&ba, SCALE));
    }

    #[test]
    fn add_associative(a in operand(), b in operand(), c in operand()) {
        let all = add(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let partial = add(&[a, b]).unwrap().to_operand().unwrap();
        let chained = add(&[partial, c]).unwrap();
        prop_assert_eq!(signed_value(&all, SCALE), signed_value(&chained, SCALE));
    }

    #[test]
    fn add_matches_sum_of_values(a in operand(), b in operand()) {
        let result = add(&[a.clone(), b.clone()]).unwrap();
        let expected = operand_value(&a, SCALE) + operand_value(&b, SCALE);
        prop_assert_eq!(signed_value(&result, SCALE), BigInt::from(expected));
    }

    // Subtraction

    #[test]
    fn subtract_sign_law(a in operand(), b in operand()) {
        let ab = subtract(&a, &b).unwrap();
        let ba = subtract(&b, &a).unwrap();
        prop_assert_eq!(signed_value(&ab, SCALE), -signed_value(&ba, SCALE));
    }

    #[test]
    fn subtract_then_add_restores(a in operand(), b in operand()) {
        let difference = subtract(&a, &b).unwrap();
        let expected = BigInt::from(operand_value(&a, SCALE)) - BigInt::from(operand_value(&b, SCALE));
        prop_assert_eq!(signed_value(&difference, SCALE), expected);
    }

    // Multiplication

    #[test]
    fn multiply_by_zero_is_rejected(a in operand()) {
        let zero = Operand::integer("0");
        prop_assert_eq!(multiply(&a, &zero), Err(ErrorKind::MultiplyByZero));
        prop_assert_eq!(multiply(&zero, &a), Err(ErrorKind::MultiplyByZero));
    }

    #[test]
    fn multiply_scale_adds_up(a in non_zero_operand(), b in non_zero_operand()) {
        let result = multiply(&a, &b).unwrap();
        prop_assert_eq!(result.result_decimal_places, a.decimal_places + b.decimal_places);
        let expected = a.scaled_value().unwrap() * b.scaled_value().unwrap();
        prop_assert_eq!(result.result_digits, expected.to_string());
    }

    // Division

    #[test]
    fn division_identity(a in non_zero_operand(), b in non_zero_operand()) {
        let result = divide(&a, &b, DivisionView::Simplified).unwrap();
        let remainder = result.remainder.clone().unwrap();

        let divisor = b.scaled_value().unwrap();
        let quotient = BigUint::parse_bytes(result.result_digits.as_bytes(), 10).unwrap();
        let remainder = BigUint::parse_bytes(remainder.digits.as_bytes(), 10).unwrap();
        let dividend = BigUint::parse_bytes(a.digits_at_scale(b.decimal_places).as_bytes(), 10).unwrap();

        prop_assert!(remainder < divisor);
        prop_assert_eq!(&divisor * &quotient + remainder, dividend);
    }

    #[test]
    fn division_views_share_steps(a in non_zero_operand(), b in non_zero_operand()) {
        let simplified = divide(&a, &b, DivisionView::Simplified).unwrap();
        let expanded = divide(&a, &b, DivisionView::Expanded).unwrap();
        prop_assert_eq!(simplified.steps, expanded.steps);
        prop_assert_eq!(simplified.result_digits, expanded.result_digits);
    }

    // Factorization

    #[test]
    fn factorization_product_law(n in 1u64..5_000_000u64) {
        let steps = factorize(n).unwrap();
        let last = steps.last().unwrap();
        prop_assert_eq!((last.remaining_value, last.factor), (1, 1));

        let product: u64 = steps[..steps.len() - 1].iter().map(|s| s.factor).product();
        prop_assert_eq!(product, n);
    }

    #[test]
    fn factors_are_non_decreasing(n in 2u64..5_000_000u64) {
        let steps = factorize(n).unwrap();
        let factors: Vec<u64> = steps[..steps.len() - 1].iter().map(|s| s.factor).collect();
        prop_assert!(factors.windows(2).all(|w| w[0] <= w[1]));
    }

    // Square root

    #[test]
    fn sqrt_of_perfect_square(k in 0u64..10_000_000u64) {
        let square = BigInt::from(k) * BigInt::from(k);
        prop_assert_eq!(sqrt_check(&square), Ok(BigUint::from(k)));
    }

    #[test]
    fn sqrt_of_non_square(k in 1u64..10_000_000u64, offset in any::<u64>()) {
        // k² < n < (k + 1)²
        let n = BigInt::from(k) * BigInt::from(k) + BigInt::from(offset % (2 * k) + 1);
        prop_assert_eq!(sqrt_check(&n), Err(ErrorKind::NonExactRoot));
    }

    #[test]
    fn sqrt_of_negative(n in 1u64..1_000_000u64) {
        prop_assert_eq!(sqrt_check(&-BigInt::from(n)), Err(ErrorKind::NegativeRadicand));
    }
}

#[test]
fn test_helpers_scale_values() {
    assert_eq!(at_scale("15", 1, 3), BigUint::from(1500u32));
    assert!(at_scale("0", 0, 2).is_zero());
    assert!(operand_value(&Operand::integer("1"), 0).is_one());
}
