//! # Calculations
//!
//! Every operation the keypad offers. Each module follows the same
//! pattern:
//!
//! - a pure entry point (`add`, `subtract`, `multiply`, `divide`,
//!   `factorize`, `sqrt_check`) returning `Result<_, ErrorKind>`
//! - a JSON-serializable result carrying the steps a renderer needs
//!
//! [`evaluate`] is the controller-facing shortcut: display text in,
//! finished [`CalculationResult`] out.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::evaluate;
//! use calc_core::format::format_result;
//! use calc_core::settings::CalculatorSettings;
//!
//! let settings = CalculatorSettings::default();
//! let result = evaluate("999+1", &settings).unwrap();
//! assert_eq!(format_result(&result, ','), "1000");
//! assert_eq!(result.steps.len(), 3);
//! ```

pub mod addition;
pub mod division;
pub mod factorization;
pub mod multiplication;
pub mod square_root;
pub mod subtraction;

use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::format::{format_digits, format_result};
use crate::operand::{Operand, Operator, ParsedExpression};
use crate::settings::CalculatorSettings;
use crate::steps::Step;

pub use addition::add;
pub use division::{divide, DivisionPresentation, DivisionView};
pub use factorization::{factorize, factorize_text, Factorization, FactorizationStep};
pub use multiplication::{multiply, MAX_PRODUCT_DIGITS};
pub use square_root::{sqrt_check, sqrt_check_text, SquareRoot};
pub use subtraction::subtract;

/// Division remainder on its own scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remainder {
    pub digits: String,
    pub decimal_places: usize,
}

/// Outcome of one arithmetic operation.
///
/// Built fresh per request and handed to the formatter and renderer
/// as-is; nothing in here is mutated afterwards.
///
/// ## JSON Example
///
/// ```json
/// {
///   "operator": "Add",
///   "operands": [{"digits": "999", "decimal_places": 0}, {"digits": "1", "decimal_places": 0}],
///   "result_digits": "1000",
///   "result_decimal_places": 0,
///   "is_negative": false,
///   "steps": [{"type": "Carry", "column": 0, "value": "1"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub operator: Operator,

    /// Operands as given
    pub operands: Vec<Operand>,

    /// Unsigned result digits, no separator
    pub result_digits: String,

    /// Digits of `result_digits` after the separator (before any
    /// trailing-zero stripping)
    pub result_decimal_places: usize,

    pub is_negative: bool,

    /// Paper-algorithm steps, in the order they are performed
    pub steps: Vec<Step>,

    /// Division only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<Remainder>,

    /// Division only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub division_view: Option<DivisionView>,
}

impl CalculationResult {
    pub(crate) fn new(
        operator: Operator,
        operands: &[Operand],
        result_digits: String,
        result_decimal_places: usize,
        steps: Vec<Step>,
    ) -> Self {
        CalculationResult {
            operator,
            operands: operands.to_vec(),
            result_digits,
            result_decimal_places,
            is_negative: false,
            steps,
            remainder: None,
            division_view: None,
        }
    }

    /// The result as an operand, for chaining calculations.
    ///
    /// `None` for negative results, which operands cannot represent.
    pub fn to_operand(&self) -> Option<Operand> {
        if self.is_negative {
            return None;
        }
        let text = format_digits(&self.result_digits, self.result_decimal_places, ',');
        Some(Operand::from_text(&text))
    }

    /// Display text of the whole expression, e.g. `12,5×3`.
    pub fn expression(&self, separator: char) -> String {
        self.operands
            .iter()
            .map(|o| format_digits(&o.digits, o.decimal_places, separator))
            .collect::<Vec<_>>()
            .join(&self.operator.symbol().to_string())
    }

    /// Formatted answer with sign.
    pub fn formatted(&self, separator: char) -> String {
        format_result(self, separator)
    }
}

/// Any finished calculation, for front ends that treat them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Calculation {
    Arithmetic(CalculationResult),
    Factorization(Factorization),
    SquareRoot(SquareRoot),
}

impl Calculation {
    /// The calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            Calculation::Arithmetic(r) => r.operator.name(),
            Calculation::Factorization(_) => "factorization",
            Calculation::SquareRoot(_) => "square_root",
        }
    }

    /// Text that identifies this calculation in the history
    pub fn input_label(&self, separator: char) -> String {
        match self {
            Calculation::Arithmetic(r) => r.expression(separator),
            Calculation::Factorization(f) => format!("Prime factors({})", f.n),
            Calculation::SquareRoot(s) => format!("√({})", s.radicand),
        }
    }

    /// One-line answer
    pub fn summary(&self, separator: char) -> String {
        match self {
            Calculation::Arithmetic(r) => r.formatted(separator),
            Calculation::Factorization(f) => f.product_expression(),
            Calculation::SquareRoot(s) => s.root.clone(),
        }
    }

    /// Whether a front end should remember this calculation.
    pub fn worth_recording(&self) -> bool {
        match self {
            Calculation::SquareRoot(s) => !s.is_trivial(),
            _ => true,
        }
    }
}

/// Parse display text and run the matching operation.
pub fn evaluate(text: &str, settings: &CalculatorSettings) -> Result<CalculationResult, ErrorKind> {
    let expr = ParsedExpression::from_display(text)?;
    tracing::debug!(
        operator = expr.operator.name(),
        operands = expr.operands.len(),
        "evaluating expression"
    );

    match (expr.operator, expr.operands.as_slice()) {
        (Operator::Add, operands) => add(operands),
        (Operator::Subtract, [a, b]) => subtract(a, b),
        (Operator::Multiply, [a, b]) => multiply(a, b),
        (Operator::Divide, [a, b]) => divide(a, b, settings.division_view),
        _ => Err(ErrorKind::InvalidOperation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CalculatorSettings {
        CalculatorSettings::default()
    }

    #[test]
    fn test_evaluate_dispatches_each_operator() {
        assert_eq!(evaluate("2+3", &settings()).unwrap().formatted(','), "5");
        assert_eq!(evaluate("2-3", &settings()).unwrap().formatted(','), "-1");
        assert_eq!(evaluate("2x3", &settings()).unwrap().formatted(','), "6");
        assert_eq!(evaluate("7/2", &settings()).unwrap().formatted(','), "3");
    }

    #[test]
    fn test_evaluate_uses_settings_view() {
        let expanded = settings().with_division_view(DivisionView::Expanded);
        let result = evaluate("17/5", &expanded).unwrap();
        assert_eq!(result.division_view, Some(DivisionView::Expanded));
    }

    #[test]
    fn test_evaluate_rejects_malformed_text() {
        assert_eq!(evaluate("2+", &settings()), Err(ErrorKind::InvalidOperation));
        assert_eq!(evaluate("abc", &settings()), Err(ErrorKind::InvalidOperation));
    }

    #[test]
    fn test_evaluate_propagates_domain_errors() {
        assert_eq!(evaluate("5/0", &settings()), Err(ErrorKind::DivideByZero));
        assert_eq!(evaluate("5x0", &settings()), Err(ErrorKind::MultiplyByZero));
    }

    #[test]
    fn test_to_operand_chains_results() {
        let result = evaluate("0,25+0,25", &settings()).unwrap();
        assert_eq!(result.to_operand(), Some(Operand::new("05", 1)));

        let negative = evaluate("1-2", &settings()).unwrap();
        assert_eq!(negative.to_operand(), None);
    }

    #[test]
    fn test_expression_text() {
        let result = evaluate("12,5x3", &settings()).unwrap();
        assert_eq!(result.expression(','), "12,5×3");
    }

    #[test]
    fn test_result_json_shape() {
        let result = evaluate("999+1", &settings()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["result_digits"], "1000");
        assert_eq!(json["steps"][0]["type"], "Carry");
        assert!(json.get("remainder").is_none());

        let roundtrip: CalculationResult = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, result);
    }

    #[test]
    fn test_calculation_labels() {
        let sqrt = Calculation::SquareRoot(sqrt_check_text("49").unwrap());
        assert_eq!(sqrt.input_label(','), "√(49)");
        assert_eq!(sqrt.summary(','), "7");
        assert!(sqrt.worth_recording());

        let zero = Calculation::SquareRoot(sqrt_check_text("0").unwrap());
        assert!(!zero.worth_recording());

        let factors = Calculation::Factorization(factorize_text("12").unwrap());
        assert_eq!(factors.input_label(','), "Prime factors(12)");
        assert_eq!(factors.calc_type(), "factorization");
    }
}
