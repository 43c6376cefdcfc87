//! Subtraction borrows.
//!
//! Scanning right to left, a minuend digit smaller than the subtrahend
//! digit borrows from the nearest non-zero digit to its left. Every zero
//! passed on the way becomes 9, the lender drops by one and the borrower
//! gains ten. The working digits are updated in place, so a later column
//! sees the 9s and decremented lenders left behind by earlier borrows.
//!
//! ```text
//!     4 9 10
//!     5 0 0
//!   - 1 2 3
//!   -------
//!     3 7 7
//! ```

use serde::{Deserialize, Serialize};

use super::digit_value;

/// One borrow event. Columns count from the right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowStep {
    /// Column that lends
    pub from_column: usize,
    /// Lender digit after lending
    pub from_new_value: u8,
    /// Column that borrows
    pub to_column: usize,
    /// Borrower value after borrowing (10..=19)
    pub to_new_value: u8,
}

impl BorrowStep {
    /// Columns strictly between lender and borrower; all of them turned
    /// from 0 into 9.
    pub fn passed_columns(&self) -> std::ops::Range<usize> {
        self.to_column + 1..self.from_column
    }
}

/// All borrows of a subtraction plus the minuend as it looks afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowTrace {
    /// Borrow events, rightmost first
    pub steps: Vec<BorrowStep>,
    /// Minuend digits after every borrow, most significant first
    pub working_digits: Vec<u8>,
}

/// Borrows for `minuend - subtrahend` on equal-width aligned digits.
///
/// The minuend must not be smaller than the subtrahend; callers order the
/// operands by magnitude first.
pub fn decompose_borrows(minuend: &str, subtrahend: &str) -> BorrowTrace {
    let mut top: Vec<u8> = minuend.bytes().map(digit_value).collect();
    let bottom: Vec<u8> = subtrahend.bytes().map(digit_value).collect();
    let width = top.len();
    let offset = width.saturating_sub(bottom.len());
    let mut steps = Vec::new();

    for i in (0..width).rev() {
        let lower = if i >= offset { bottom[i - offset] } else { 0 };
        if top[i] >= lower {
            continue;
        }

        let Some(j) = (0..i).rev().find(|&j| top[j] != 0) else {
            // Nothing left to borrow from: minuend was smaller
            continue;
        };

        top[j] -= 1;
        for digit in &mut top[j + 1..i] {
            *digit = 9;
        }
        top[i] += 10;

        let step = BorrowStep {
            from_column: width - 1 - j,
            from_new_value: top[j],
            to_column: width - 1 - i,
            to_new_value: top[i],
        };
        tracing::trace!(?step, "borrow");
        steps.push(step);
    }

    BorrowTrace {
        steps,
        working_digits: top,
    }
}
