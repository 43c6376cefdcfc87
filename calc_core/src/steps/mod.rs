//! # Step Decomposition
//!
//! Each operation is broken into the discrete marks a student writes on
//! paper: carries above the columns of a sum, borrows crossed out in a
//! subtraction, one row per multiplier digit, and the chunk / product /
//! remainder cycle of long division.
//!
//! ## Column convention
//!
//! Carry and borrow columns count from the right of the aligned digit
//! strings: column 0 is the least-significant aligned digit (the last
//! decimal digit when the operands have decimals).
//!
//! ## Ordering
//!
//! Steps come out in the order the paper algorithm produces them:
//!
//! - carries and borrows right to left
//! - partial products from the least-significant multiplier digit down
//! - division steps left to right across the dividend
//!
//! ## Modules
//!
//! - [`carry`] - addition carries (multi-digit carries for long columns)
//! - [`borrow`] - subtraction borrows with zero-to-nine cascades
//! - [`partial_product`] - multiplication rows
//! - [`long_division`] - the single long-division decomposition and the
//!   simplified / expanded presentations derived from it

pub mod borrow;
pub mod carry;
pub mod long_division;
pub mod partial_product;

use serde::{Deserialize, Serialize};

pub use borrow::{decompose_borrows, BorrowStep, BorrowTrace};
pub use carry::{decompose_carries, CarryStep};
pub use long_division::{decompose_division, DivisionStep, ExpandedDivision, LongDivision, SimplifiedDivision};
pub use partial_product::{decompose_partial_products, PartialProductRow};

/// One pedagogical step, tagged by the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    Carry(CarryStep),
    Borrow(BorrowStep),
    PartialProduct(PartialProductRow),
    Division(DivisionStep),
}

impl From<CarryStep> for Step {
    fn from(step: CarryStep) -> Self {
        Step::Carry(step)
    }
}

impl From<BorrowStep> for Step {
    fn from(step: BorrowStep) -> Self {
        Step::Borrow(step)
    }
}

impl From<PartialProductRow> for Step {
    fn from(row: PartialProductRow) -> Self {
        Step::PartialProduct(row)
    }
}

impl From<DivisionStep> for Step {
    fn from(step: DivisionStep) -> Self {
        Step::Division(step)
    }
}

/// Numeric value of an ASCII digit byte.
pub(crate) fn digit_value(b: u8) -> u8 {
    b.wrapping_sub(b'0')
}
