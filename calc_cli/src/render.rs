//! Plain-text paper layouts.
//!
//! Every layout is a right-aligned digit grid: operands stacked on their
//! decimal separator, marks (carries, borrows) on a row above, and a rule
//! before the result.

use std::iter::once;

use calc_core::calculations::division::presentation;
use calc_core::format::{format_remainder, format_result};
use calc_core::kernel;
use calc_core::steps::long_division::{ExpandedDivision, SimplifiedDivision};
use calc_core::steps::{BorrowStep, CarryStep, PartialProductRow};
use calc_core::{Calculation, CalculationResult, DivisionPresentation, Factorization, Operator, SquareRoot, Step};

/// Fixed-width row addressed by offset from the right edge.
struct Row {
    cells: Vec<char>,
}

impl Row {
    fn new(width: usize) -> Self {
        Row {
            cells: vec![' '; width],
        }
    }

    /// Write `text` so its last character lands `offset` cells from the right.
    fn put(&mut self, offset: usize, text: &str) {
        let width = self.cells.len();
        for (i, c) in text.chars().rev().enumerate() {
            let from_right = offset + i;
            if from_right < width {
                self.cells[width - 1 - from_right] = c;
            }
        }
    }

    fn render(&self) -> String {
        self.cells.iter().collect::<String>().trim_end().to_string()
    }
}

/// Digits with the separator `decimal_places` from the right, trailing
/// zeros kept so columns stay aligned.
fn with_separator(digits: &str, decimal_places: usize, separator: char) -> String {
    if decimal_places == 0 {
        return digits.to_string();
    }
    let padded = kernel::left_pad(digits, decimal_places + 1);
    let split = padded.len() - decimal_places;
    format!("{}{separator}{}", &padded[..split], &padded[split..])
}

/// Character offset from the right of a digit column, skipping the separator.
fn char_offset(column: usize, decimal_places: usize) -> usize {
    column + usize::from(decimal_places > 0 && column >= decimal_places)
}

fn width_of<'a>(texts: impl IntoIterator<Item = &'a String>) -> usize {
    texts.into_iter().map(|t| t.chars().count()).max().unwrap_or(1) + 2
}

fn right_aligned(width: usize, text: &str) -> String {
    let mut row = Row::new(width);
    row.put(0, text);
    row.render()
}

fn signed_operand_row(width: usize, sign: char, text: &str) -> String {
    let mut row = Row::new(width);
    row.put(0, text);
    row.cells[0] = sign;
    row.render()
}

/// Render any calculation.
pub fn render(calculation: &Calculation, separator: char) -> String {
    match calculation {
        Calculation::Arithmetic(result) => render_arithmetic(result, separator),
        Calculation::Factorization(f) => render_factorization(f),
        Calculation::SquareRoot(s) => render_square_root(s),
    }
}

pub fn render_arithmetic(result: &CalculationResult, separator: char) -> String {
    match result.operator {
        Operator::Add => render_addition(result, separator),
        Operator::Subtract => render_subtraction(result, separator),
        Operator::Multiply => render_multiplication(result, separator),
        Operator::Divide => render_division(result, separator),
    }
}

fn render_addition(result: &CalculationResult, separator: char) -> String {
    let places = result.result_decimal_places;
    let operands: Vec<String> = result
        .operands
        .iter()
        .map(|o| with_separator(&o.digits_at_scale(places), places, separator))
        .collect();
    let total = with_separator(&result.result_digits, places, separator);
    let width = width_of(operands.iter().chain(once(&total)));

    let mut lines = Vec::new();
    let carries: Vec<&CarryStep> = result
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::Carry(c) => Some(c),
            _ => None,
        })
        .collect();
    if !carries.is_empty() {
        let mut row = Row::new(width);
        for carry in carries {
            row.put(char_offset(carry.column + 1, places), &carry.value);
        }
        lines.push(row.render());
    }

    for (i, text) in operands.iter().enumerate() {
        if i == 0 {
            lines.push(right_aligned(width, text));
        } else {
            lines.push(signed_operand_row(width, '+', text));
        }
    }
    lines.push("-".repeat(width));
    lines.push(right_aligned(width, &total));
    lines.join("\n")
}

fn render_subtraction(result: &CalculationResult, separator: char) -> String {
    let places = result.result_decimal_places;
    let (top, bottom) = match result.operands.as_slice() {
        [a, b] if result.is_negative => (b, a),
        [a, b] => (a, b),
        _ => return String::new(),
    };
    let top_text = with_separator(&top.digits_at_scale(places), places, separator);
    let bottom_text = with_separator(&bottom.digits_at_scale(places), places, separator);
    let mut difference = with_separator(&result.result_digits, places, separator);
    if result.is_negative {
        difference.insert(0, '-');
    }
    let width = width_of([&top_text, &bottom_text, &difference]);

    let borrows: Vec<&BorrowStep> = result
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::Borrow(b) => Some(b),
            _ => None,
        })
        .collect();

    let mut lines = Vec::new();
    if !borrows.is_empty() {
        let mut row = Row::new(width);
        for borrow in &borrows {
            for column in borrow.passed_columns() {
                row.put(char_offset(column, places), "9");
            }
            row.put(char_offset(borrow.from_column, places), &borrow.from_new_value.to_string());
        }
        lines.push(row.render());
    }
    lines.push(right_aligned(width, &top_text));
    lines.push(signed_operand_row(width, '-', &bottom_text));
    lines.push("-".repeat(width));
    lines.push(right_aligned(width, &difference));

    for borrow in borrows {
        lines.push(format!(
            "borrow: column {} lends to column {} ({} left, {} to subtract from)",
            borrow.from_column, borrow.to_column, borrow.from_new_value, borrow.to_new_value
        ));
    }
    lines.join("\n")
}

fn render_multiplication(result: &CalculationResult, separator: char) -> String {
    let [multiplicand, multiplier] = result.operands.as_slice() else {
        return String::new();
    };
    let top = with_separator(&multiplicand.digits, multiplicand.decimal_places, separator);
    let bottom = with_separator(&multiplier.digits, multiplier.decimal_places, separator);
    let product = with_separator(&result.result_digits, result.result_decimal_places, separator);

    let rows: Vec<&PartialProductRow> = result
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::PartialProduct(p) => Some(p),
            _ => None,
        })
        .collect();
    let row_widths = rows.iter().map(|r| r.value.len() + r.column_offset).max().unwrap_or(0);
    let width = width_of([&top, &bottom, &product]).max(row_widths + 2);

    let mut lines = vec![
        right_aligned(width, &top),
        signed_operand_row(width, '×', &bottom),
        "-".repeat(width),
    ];
    if !rows.is_empty() {
        for partial in rows {
            let mut row = Row::new(width);
            row.put(partial.column_offset, &partial.value);
            lines.push(row.render());
        }
        lines.push("-".repeat(width));
    }
    lines.push(right_aligned(width, &product));
    lines.join("\n")
}

fn render_division(result: &CalculationResult, separator: char) -> String {
    let [_, divisor] = result.operands.as_slice() else {
        return String::new();
    };
    let scales = DivisionScales {
        dividend: result.remainder.as_ref().map_or(0, |r| r.decimal_places),
        divisor: divisor.decimal_places,
        quotient: result.result_decimal_places,
        separator,
    };

    let mut lines = match presentation(result) {
        Some(DivisionPresentation::Simplified(s)) => render_simplified(&s, &scales),
        Some(DivisionPresentation::Expanded(e)) => render_expanded(&e, &scales),
        None => Vec::new(),
    };

    lines.push(format!("= {}", format_result(result, separator)));
    if let Some(remainder) = format_remainder(result, separator).filter(|r| r != "0") {
        lines.push(format!("remainder {remainder}"));
    }
    lines.join("\n")
}

/// Decimal places of each number in the division layout. The dividend and
/// the remainder share a scale.
struct DivisionScales {
    dividend: usize,
    divisor: usize,
    quotient: usize,
    separator: char,
}

/// The four numbers of the layout, separators inserted.
struct DivisionText {
    dividend: String,
    divisor: String,
    quotient: String,
    remainder: String,
}

impl DivisionText {
    fn new(dividend: &str, divisor: &str, quotient: &str, remainder: &str, scales: &DivisionScales) -> Self {
        DivisionText {
            dividend: with_separator(dividend, scales.dividend, scales.separator),
            divisor: with_separator(divisor, scales.divisor, scales.separator),
            quotient: with_separator(quotient, scales.quotient, scales.separator),
            remainder: with_separator(remainder, scales.dividend, scales.separator),
        }
    }

    fn dividend_width(&self) -> usize {
        self.dividend.chars().count()
    }
}

/// Dividend and divisor, then the bracket under the divisor. `gutter`
/// leaves room on the left for the minus signs of the expanded rows.
fn division_header(text: &DivisionText, gutter: usize) -> Vec<String> {
    let pad = " ".repeat(gutter + text.dividend_width());
    let bracket = text.divisor.chars().count().max(text.quotient.chars().count()) + 2;
    vec![
        format!("{}{} | {}", " ".repeat(gutter), text.dividend, text.divisor),
        format!("{pad} +{}", "-".repeat(bracket)),
    ]
}

fn render_simplified(division: &SimplifiedDivision, scales: &DivisionScales) -> Vec<String> {
    let text = DivisionText::new(
        &division.dividend,
        &division.divisor,
        &division.quotient,
        &division.final_remainder,
        scales,
    );
    let mut lines = division_header(&text, 0);
    lines.push(format!(
        "{:>width$}   {}",
        text.remainder,
        text.quotient,
        width = text.dividend_width()
    ));
    lines
}

/// Write `digits` so the last one sits on dividend column `offset` (from
/// the right). Returns the cell offset of the first digit.
fn put_digits(row: &mut Row, offset: usize, digits: &str, decimal_places: usize) -> usize {
    let mut leftmost = char_offset(offset, decimal_places);
    for (i, c) in digits.chars().rev().enumerate() {
        leftmost = char_offset(offset + i, decimal_places);
        row.put(leftmost, &c.to_string());
    }
    leftmost
}

fn render_expanded(division: &ExpandedDivision, scales: &DivisionScales) -> Vec<String> {
    let text = DivisionText::new(
        &division.dividend,
        &division.divisor,
        &division.quotient,
        &division.final_remainder,
        scales,
    );
    let digits = division.dividend.len();
    let width = text.dividend_width() + 1;
    let mut lines = division_header(&text, 1);
    lines.push(format!("{}   {}", " ".repeat(width), text.quotient));

    for step in &division.rows {
        let offset = digits.saturating_sub(step.end_column + 1);

        let mut product = Row::new(width);
        let leftmost = put_digits(&mut product, offset, &step.product, scales.dividend);
        product.put(leftmost + 1, "-");
        lines.push(product.render());

        let mut rule = Row::new(width);
        let right = char_offset(offset, scales.dividend);
        let left = char_offset(offset + step.product.len().saturating_sub(1), scales.dividend);
        rule.put(right, &"-".repeat(left - right + 1));
        lines.push(rule.render());

        let mut remainder = Row::new(width);
        match step.brought_down {
            Some(digit) if step.remainder == "0" => {
                put_digits(&mut remainder, offset.saturating_sub(1), &digit.to_string(), scales.dividend)
            }
            Some(digit) => put_digits(
                &mut remainder,
                offset.saturating_sub(1),
                &format!("{}{digit}", step.remainder),
                scales.dividend,
            ),
            None => put_digits(&mut remainder, offset, &step.remainder, scales.dividend),
        };
        lines.push(remainder.render());
    }
    lines
}

fn render_factorization(factorization: &Factorization) -> String {
    let width = factorization.n.to_string().len();
    let mut lines: Vec<String> = factorization
        .steps
        .iter()
        .map(|step| {
            if step.is_terminal() {
                format!("{:>width$} |", 1)
            } else {
                format!("{:>width$} | {}", step.remaining_value, step.factor)
            }
        })
        .collect();

    let mut summary = format!("{} = {}", factorization.n, factorization.product_expression());
    if factorization.is_prime() {
        summary.push_str(" (prime)");
    }
    lines.push(summary);
    lines.join("\n")
}

fn render_square_root(root: &SquareRoot) -> String {
    format!("√{} = {}", root.radicand, root.root)
}
