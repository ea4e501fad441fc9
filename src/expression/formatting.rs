//! Cosmetic rewriting of expressions.
//!
//! Turns recognisable words into their symbols and normalizes the `**`
//! power operator to `^`. This never validates anything.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PI_WORD: Regex = Regex::new(r"\b(pi|π)\b").unwrap();
    static ref INFINITY_WORD: Regex = Regex::new(r"\b(infinity|inf)\b").unwrap();
}

/// Rewrite `pi` to `π`, `infinity`/`inf` to `∞` and `**` to `^`, then trim.
///
/// Word substitutions run before the caret normalization. Applying this
/// twice gives the same result as applying it once.
pub fn format_expression(input: &str) -> String {
    let text = PI_WORD.replace_all(input, "π");
    let text = INFINITY_WORD.replace_all(&text, "∞");
    text.replace("**", "^").trim().to_string()
}
