//! Expression validation.
//!
//! Decides whether user input is well-formed enough to forward to the
//! remote computation service or a graphing surface. Checks run from
//! cheapest to most expensive and stop at the first failure.

use super::evaluation::evaluate_with_x;
use lazy_static::lazy_static;
use regex::Regex;

/// Value substituted for `x` when checking evaluability.
const PLACEHOLDER_X: f64 = 1.0;

lazy_static! {
    /// Two or more arithmetic operators in a row, e.g. `+*`, `--` or `*/`.
    static ref OPERATOR_RUN: Regex = Regex::new(r"[+\-*/]{2,}").unwrap();

    /// Allowed characters: digits, the variable `x`, operators, grouping,
    /// decimal points, commas, whitespace and the formatter's `π` and `∞`.
    static ref ALLOWED_CHARS: Regex = Regex::new(r"^[0-9x+\-*/^().,\sπ∞]+$").unwrap();
}

/// Check if input is a valid expression.
///
/// Returns `true` only if the input:
/// 1. Is non-empty after trimming
/// 2. Has balanced parentheses
/// 3. Has no adjacent arithmetic operators
/// 4. Contains only allowed characters
/// 5. Evaluates without error with `x` set to a placeholder
///
/// Never panics; every failure is reported as `false`.
pub fn validate_expression(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }

    if !has_balanced_parens(input) {
        tracing::debug!(input, "rejected: unbalanced parentheses");
        return false;
    }

    // Also rejects unary minus after an operator, e.g. `3*-2`.
    if OPERATOR_RUN.is_match(input) {
        tracing::debug!(input, "rejected: adjacent operators");
        return false;
    }

    if !ALLOWED_CHARS.is_match(input) {
        tracing::debug!(input, "rejected: disallowed characters");
        return false;
    }

    match evaluate_with_x(input, PLACEHOLDER_X) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(input, error = %e, "rejected: evaluation failed");
            false
        }
    }
}

/// Scan left to right; the depth must never go negative and must end at zero.
fn has_balanced_parens(input: &str) -> bool {
    let mut depth: i64 = 0;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::format_expression;

    #[test]
    fn test_blank_input_rejected() {
        assert!(!validate_expression(""));
        assert!(!validate_expression("   "));
        assert!(!validate_expression("\t\n"));
    }

    #[test]
    fn test_unbalanced_parens_rejected() {
        assert!(!validate_expression(")("));
        assert!(!validate_expression("(x+1"));
        assert!(!validate_expression("x+1)"));
        assert!(!validate_expression("((x)"));
    }

    #[test]
    fn test_disallowed_characters_rejected() {
        assert!(!validate_expression("x^2!"));
        assert!(!validate_expression("y + 1"));
        assert!(!validate_expression("sin(x)"));
        assert!(!validate_expression("2 % 3"));
    }

    #[test]
    fn test_adjacent_operators_rejected() {
        assert!(!validate_expression("1+*2"));
        assert!(!validate_expression("x--1"));
        assert!(!validate_expression("4*/2"));
        // Known limitation: unary minus after another operator.
        assert!(!validate_expression("3*-2"));
    }

    #[test]
    fn test_unevaluable_rejected() {
        assert!(!validate_expression("1/0"));
        assert!(!validate_expression("1/(x-1)"));
        assert!(!validate_expression("1 2"));
        assert!(!validate_expression("x^"));
        assert!(!validate_expression("()"));
        assert!(!validate_expression("1..2"));
    }

    #[test]
    fn test_deeply_nested_input_rejected() {
        let parens = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(!validate_expression(&parens));

        let signs = format!("{}1", "- ".repeat(100_000));
        assert!(!validate_expression(&signs));

        let moderate = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert!(validate_expression(&moderate));
    }

    #[test]
    fn test_valid_expressions_accepted() {
        assert!(validate_expression("x^2 + 2x + 1"));
        assert!(validate_expression("1/x"));
        assert!(validate_expression("(x + 1) * (x - 1)"));
        assert!(validate_expression("-x + 3"));
        assert!(validate_expression("0.5x, 2"));
        assert!(validate_expression("  42  "));
    }

    #[test]
    fn test_formatter_glyphs_accepted() {
        assert!(validate_expression("2π*x"));
        assert!(validate_expression("x + ∞"));
    }

    #[test]
    fn test_formatting_keeps_valid_expressions_valid() {
        for expr in ["x^2 + 2x + 1", "1/x", " (x+1)^2 ", "2π*x"] {
            assert!(validate_expression(expr));
            assert!(validate_expression(&format_expression(expr)), "{expr}");
        }
    }
}
