//! # Integer Square Root
//!
//! Only exact roots are answered. Anything else is classified rather than
//! approximated.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::operand::{Operator, INPUT_SEPARATORS, MAX_DISPLAY_CHARS};

/// An exact square root, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareRoot {
    pub radicand: String,
    pub root: String,
}

impl SquareRoot {
    /// `√0 = 0` is answered but not worth remembering.
    pub fn is_trivial(&self) -> bool {
        self.root == "0"
    }
}

/// Exact integer square root of `n`.
///
/// `0` is a valid radicand with root `0`.
///
/// # Errors
///
/// - [`ErrorKind::NegativeRadicand`] for `n < 0`
/// - [`ErrorKind::NonExactRoot`] when `n` is not a perfect square
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::square_root::sqrt_check;
/// use calc_core::errors::ErrorKind;
/// use num_bigint::{BigInt, BigUint};
///
/// assert_eq!(sqrt_check(&BigInt::from(49)), Ok(BigUint::from(7u32)));
/// assert_eq!(sqrt_check(&BigInt::from(50)), Err(ErrorKind::NonExactRoot));
/// ```
pub fn sqrt_check(n: &BigInt) -> Result<BigUint, ErrorKind> {
    if n.sign() == Sign::Minus {
        return Err(ErrorKind::NegativeRadicand);
    }
    let magnitude = n.magnitude();
    if magnitude.is_zero() {
        return Ok(BigUint::zero());
    }

    let root = magnitude.sqrt();
    if &root * &root != *magnitude {
        return Err(ErrorKind::NonExactRoot);
    }
    Ok(root)
}

/// Square root of the number shown on the display.
///
/// A single leading `-` is read as a sign. Any other operator symbol
/// means the display holds an expression, which is rejected with
/// [`ErrorKind::InvalidOperation`]; a separator gives
/// [`ErrorKind::NonIntegerRadicand`]. Text longer than the display
/// ([`MAX_DISPLAY_CHARS`]) is [`ErrorKind::InvalidOperation`].
pub fn sqrt_check_text(text: &str) -> Result<SquareRoot, ErrorKind> {
    let text = text.trim();
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, text),
    };

    if body.is_empty()
        || text.chars().count() > MAX_DISPLAY_CHARS
        || body.chars().any(|c| Operator::from_char(c).is_some())
    {
        return Err(ErrorKind::InvalidOperation);
    }
    if body.contains(INPUT_SEPARATORS) {
        return Err(ErrorKind::NonIntegerRadicand);
    }
    let magnitude = BigUint::parse_bytes(body.as_bytes(), 10).ok_or(ErrorKind::InvalidOperation)?;
    let radicand = BigInt::from_biguint(sign, magnitude);

    let root = sqrt_check(&radicand)?;
    tracing::debug!(%radicand, %root, "square root");

    Ok(SquareRoot {
        radicand: radicand.to_string(),
        root: root.to_string(),
    })
}
