//! # Operands and Parsing
//!
//! Turns raw display text such as `"123,45+67"` into normalized operands.
//! An [`Operand`] is an unsigned digit string with the decimal separator
//! removed, plus the number of digits that sat after the separator.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::operand::{parse, Operand};
//!
//! let operands = parse("123,45+67", '+');
//! assert_eq!(operands[0], Operand::new("12345", 2));
//! assert_eq!(operands[1], Operand::integer("67"));
//! ```

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;

/// Separators accepted in input text. `,` is what the keypad writes; `.`
/// comes from physical keyboards.
pub const INPUT_SEPARATORS: [char; 2] = [',', '.'];

/// An unsigned decimal number stored as digits plus a scale.
///
/// The integer part carries no leading zeros. When the integer part is
/// zero the digits start with a single `0` (`0,05` is `"005"` with two
/// decimal places), so `decimal_places <= digits.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    /// Digits without separator
    pub digits: String,
    /// Number of digits after the separator
    pub decimal_places: usize,
}

impl Operand {
    /// Create an operand from already-normalized digits.
    pub fn new(digits: impl Into<String>, decimal_places: usize) -> Self {
        Operand {
            digits: digits.into(),
            decimal_places,
        }
    }

    /// Create an operand with no decimal part.
    pub fn integer(digits: impl Into<String>) -> Self {
        Operand::new(digits, 0)
    }

    /// Parse a single number such as `"007,50"` or `",5"`.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        let (int_part, frac_part) = match trimmed.find(INPUT_SEPARATORS) {
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => (trimmed, ""),
        };

        let int_part = int_part.trim_start_matches('0');
        let int_part = if int_part.is_empty() { "0" } else { int_part };

        Operand {
            digits: format!("{int_part}{frac_part}"),
            decimal_places: frac_part.len(),
        }
    }

    /// The digits as an arbitrary-precision integer (scale ignored).
    pub fn scaled_value(&self) -> Result<BigUint, ErrorKind> {
        BigUint::parse_bytes(self.digits.as_bytes(), 10).ok_or(ErrorKind::InvalidOperation)
    }

    /// True when every digit is zero (`0`, `0,00`, ...).
    pub fn is_zero(&self) -> bool {
        self.digits.bytes().all(|b| b == b'0')
    }

    /// The digits right-padded with zeros to `decimal_places` places.
    ///
    /// Asking for fewer places than the operand has returns the digits
    /// unchanged.
    pub fn digits_at_scale(&self, decimal_places: usize) -> String {
        let pad = decimal_places.saturating_sub(self.decimal_places);
        let mut digits = self.digits.clone();
        digits.extend(std::iter::repeat('0').take(pad));
        digits
    }

    /// Check the representation invariants.
    pub fn validate(&self) -> Result<(), ErrorKind> {
        if self.digits.is_empty()
            || !self.digits.bytes().all(|b| b.is_ascii_digit())
            || self.decimal_places > self.digits.len()
        {
            return Err(ErrorKind::InvalidOperation);
        }
        Ok(())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_digits(&self.digits, self.decimal_places, ','))
    }
}

/// The four binary operators on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Recognize an operator character, including keyboard aliases.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            'x' | 'X' | '×' | '*' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Canonical display symbol
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Operator name for logs and JSON
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "addition",
            Operator::Subtract => "subtraction",
            Operator::Multiply => "multiplication",
            Operator::Divide => "division",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Most digits a single typed number may have.
pub const MAX_OPERAND_DIGITS: usize = 14;

/// Longest expression the display accepts, operators included.
pub const MAX_DISPLAY_CHARS: usize = 20;

/// Split `input` on `operator` and normalize every piece.
///
/// Assumes syntactically valid input; see [`ParsedExpression::from_display`]
/// for the checked path.
pub fn parse(input: &str, operator: char) -> Vec<Operand> {
    input.split(operator).map(Operand::from_text).collect()
}

/// A validated expression: one operator and its operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExpression {
    pub operator: Operator,
    pub operands: Vec<Operand>,
}

impl ParsedExpression {
    /// Parse display text such as `"12,5x3"`.
    ///
    /// Rejects with [`ErrorKind::InvalidOperation`]:
    /// - no operator, or two different operators
    /// - an empty operand (leading or trailing operator, `"5++3"`)
    /// - a trailing separator or more than one separator in an operand
    /// - any character that is not a digit, separator or operator
    /// - more than two operands for anything but addition
    /// - more than [`MAX_DISPLAY_CHARS`] characters, or an operand with
    ///   more than [`MAX_OPERAND_DIGITS`] digits
    pub fn from_display(text: &str) -> Result<Self, ErrorKind> {
        let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if text.chars().count() > MAX_DISPLAY_CHARS {
            return Err(ErrorKind::InvalidOperation);
        }

        let mut operator: Option<(Operator, char)> = None;
        for c in text.chars() {
            if let Some(op) = Operator::from_char(c) {
                match operator {
                    None => operator = Some((op, c)),
                    Some((_, seen)) if seen == c => {}
                    Some(_) => return Err(ErrorKind::InvalidOperation),
                }
            } else if !c.is_ascii_digit() && !INPUT_SEPARATORS.contains(&c) {
                return Err(ErrorKind::InvalidOperation);
            }
        }
        let (operator, symbol) = operator.ok_or(ErrorKind::InvalidOperation)?;

        let pieces: Vec<&str> = text.split(symbol).collect();
        for piece in &pieces {
            let separators = piece.matches(INPUT_SEPARATORS).count();
            if piece.is_empty()
                || separators > 1
                || piece.ends_with(INPUT_SEPARATORS)
                || !piece.chars().any(|c| c.is_ascii_digit())
                || piece.chars().filter(|c| c.is_ascii_digit()).count() > MAX_OPERAND_DIGITS
            {
                return Err(ErrorKind::InvalidOperation);
            }
        }
        if operator != Operator::Add && pieces.len() != 2 {
            return Err(ErrorKind::InvalidOperation);
        }

        Ok(ParsedExpression {
            operator,
            operands: parse(&text, symbol),
        })
    }
}
