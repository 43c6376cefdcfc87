//! # Prime Factorization
//!
//! Trial division, smallest factor first, written as the two-column
//! ladder students draw:
//!
//! ```text
//! 12 | 2
//!  6 | 2
//!  3 | 3
//!  1 |
//! ```
//!
//! Each row pairs the value still to be decomposed with the factor taken
//! out of it. The ladder always ends on `1`, stored as a `{1, 1}` row.

use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::operand::{Operator, INPUT_SEPARATORS, MAX_OPERAND_DIGITS};

/// One rung of the factorization ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorizationStep {
    pub remaining_value: u64,
    pub factor: u64,
}

impl FactorizationStep {
    fn terminal() -> Self {
        FactorizationStep {
            remaining_value: 1,
            factor: 1,
        }
    }

    /// The closing `{1, 1}` row
    pub fn is_terminal(&self) -> bool {
        self.remaining_value == 1
    }
}

/// A completed factorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization {
    pub n: u64,
    pub steps: Vec<FactorizationStep>,
}

impl Factorization {
    /// Prime factors in ascending order, with repetition. Empty for 1.
    pub fn factors(&self) -> Vec<u64> {
        self.steps
            .iter()
            .filter(|s| !s.is_terminal())
            .map(|s| s.factor)
            .collect()
    }

    /// True if `n` is itself prime
    pub fn is_prime(&self) -> bool {
        self.factors().len() == 1
    }

    /// `2 × 2 × 3` style summary; `1` for n = 1.
    pub fn product_expression(&self) -> String {
        let factors = self.factors();
        if factors.is_empty() {
            return "1".to_string();
        }
        factors
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(" × ")
    }
}

/// Decompose `n` into prime factors.
///
/// # Errors
///
/// [`ErrorKind::CannotFactorizeZero`] for `n == 0`.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::factorization::factorize;
///
/// let steps = factorize(12).unwrap();
/// let pairs: Vec<_> = steps.iter().map(|s| (s.remaining_value, s.factor)).collect();
/// assert_eq!(pairs, vec![(12, 2), (6, 2), (3, 3), (1, 1)]);
/// ```
pub fn factorize(n: u64) -> Result<Vec<FactorizationStep>, ErrorKind> {
    if n == 0 {
        return Err(ErrorKind::CannotFactorizeZero);
    }
    if n == 1 {
        return Ok(vec![FactorizationStep::terminal()]);
    }

    let mut steps = Vec::new();
    let mut remaining = n;
    let mut i: u64 = 2;

    // i <= remaining / i is i * i <= remaining without overflow
    while i <= remaining / i {
        if remaining % i == 0 {
            steps.push(FactorizationStep {
                remaining_value: remaining,
                factor: i,
            });
            remaining /= i;
        } else {
            i += 1;
        }
    }
    if remaining > 1 || steps.is_empty() {
        steps.push(FactorizationStep {
            remaining_value: remaining,
            factor: remaining,
        });
    }
    steps.push(FactorizationStep::terminal());

    tracing::debug!(n, factors = steps.len() - 1, "factorization");
    Ok(steps)
}

/// Factorize the number shown on the display.
///
/// The text must be a plain whole number: separators and operators are
/// rejected with [`ErrorKind::InvalidOperation`], as are numbers longer
/// than [`MAX_OPERAND_DIGITS`].
pub fn factorize_text(text: &str) -> Result<Factorization, ErrorKind> {
    let text = text.trim();
    if text.is_empty()
        || text.contains(INPUT_SEPARATORS)
        || text.chars().any(|c| Operator::from_char(c).is_some())
        || !text.chars().all(|c| c.is_ascii_digit())
        || text.len() > MAX_OPERAND_DIGITS
    {
        return Err(ErrorKind::InvalidOperation);
    }

    let n: u64 = text.parse().map_err(|_| ErrorKind::InvalidOperation)?;
    Ok(Factorization {
        n,
        steps: factorize(n)?,
    })
}
