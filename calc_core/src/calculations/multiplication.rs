//! # Multiplication
//!
//! Works on the digits as typed (no decimal alignment needed): the
//! product's scale is the sum of both operand scales. When the multiplier
//! has more than one digit, one partial-product row per digit is emitted.

use crate::errors::ErrorKind;
use crate::kernel;
use crate::operand::{Operand, Operator};
use crate::steps::{decompose_partial_products, Step};

use super::CalculationResult;

/// Longest product, in digits, the layout can hold
pub const MAX_PRODUCT_DIGITS: usize = 20;

/// Multiply `a` (multiplicand) by `b` (multiplier).
///
/// # Errors
///
/// - [`ErrorKind::MultiplyByZero`] when either factor is zero
/// - [`ErrorKind::ResultTooLarge`] when the product has more than
///   [`MAX_PRODUCT_DIGITS`] digits
pub fn multiply(a: &Operand, b: &Operand) -> Result<CalculationResult, ErrorKind> {
    a.validate()?;
    b.validate()?;

    if a.is_zero() || b.is_zero() {
        return Err(ErrorKind::MultiplyByZero);
    }

    let product = kernel::product(&a.scaled_value()?, &b.scaled_value()?).to_string();
    if product.len() > MAX_PRODUCT_DIGITS {
        tracing::debug!(digits = product.len(), "product exceeds ceiling");
        return Err(ErrorKind::ResultTooLarge);
    }

    let steps: Vec<Step> = decompose_partial_products(&a.digits, &b.digits)?
        .into_iter()
        .map(Step::from)
        .collect();
    let decimal_places = a.decimal_places + b.decimal_places;

    tracing::debug!(decimal_places, rows = steps.len(), "multiplication");

    Ok(CalculationResult::new(
        Operator::Multiply,
        &[a.clone(), b.clone()],
        product,
        decimal_places,
        steps,
    ))
}
