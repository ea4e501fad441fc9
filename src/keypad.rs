//! Virtual math keypad contents.
//!
//! The keypad shows typographic glyphs for some operators; they are
//! translated to their ASCII forms before reaching the expression.

/// An insertable value with a display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub label: &'static str,
    pub value: &'static str,
}

/// A named mathematical constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constant {
    pub symbol: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

/// A ready-made expression for the examples list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Example {
    pub expression: &'static str,
    pub description: &'static str,
}

pub const CONSTANTS: &[Constant] = &[
    Constant {
        symbol: "π",
        value: "pi",
        description: "Pi (3.14159...)",
    },
    Constant {
        symbol: "e",
        value: "e",
        description: "Euler's number (2.71828...)",
    },
    Constant {
        symbol: "φ",
        value: "(1 + sqrt(5))/2",
        description: "Golden ratio (1.61803...)",
    },
    Constant {
        symbol: "∞",
        value: "infinity",
        description: "Infinity",
    },
];

pub const EXAMPLES: &[Example] = &[
    Example {
        expression: "x^2 + 2x + 1",
        description: "Quadratic equation",
    },
    Example {
        expression: "sin(x)",
        description: "Sine wave",
    },
    Example {
        expression: "e^x",
        description: "Exponential growth",
    },
    Example {
        expression: "log(x)",
        description: "Natural logarithm",
    },
    Example {
        expression: "1/x",
        description: "Reciprocal function",
    },
];

/// Number pad, row by row.
pub const NUMBER_KEYS: [&str; 16] = [
    "7", "8", "9", "÷", "4", "5", "6", "×", "1", "2", "3", "−", "0", ".", "=", "+",
];

pub const BASIC_KEYS: &[Key] = &[
    Key { label: "x", value: "x" },
    Key { label: "y", value: "y" },
    Key { label: "a²", value: "^2" },
    Key { label: "aᵇ", value: "^" },
    Key { label: "(", value: "(" },
    Key { label: ")", value: ")" },
    Key { label: "<", value: "<" },
    Key { label: ">", value: ">" },
    Key { label: "|a|", value: "abs(" },
    Key { label: "√", value: "sqrt(" },
];

/// Function keys grouped by category.
pub const FUNCTION_GROUPS: &[(&str, &[Key])] = &[
    (
        "TRIG FUNCTIONS",
        &[
            Key { label: "sin", value: "sin(" },
            Key { label: "cos", value: "cos(" },
            Key { label: "tan", value: "tan(" },
            Key { label: "csc", value: "csc(" },
            Key { label: "sec", value: "sec(" },
            Key { label: "cot", value: "cot(" },
        ],
    ),
    (
        "INVERSE TRIG",
        &[
            Key { label: "sin⁻¹", value: "arcsin(" },
            Key { label: "cos⁻¹", value: "arccos(" },
            Key { label: "tan⁻¹", value: "arctan(" },
            Key { label: "csc⁻¹", value: "arccsc(" },
            Key { label: "sec⁻¹", value: "arcsec(" },
            Key { label: "cot⁻¹", value: "arccot(" },
        ],
    ),
    (
        "CALCULUS",
        &[
            Key { label: "∫", value: "integrate(" },
            Key { label: "d/dx", value: "derive(" },
            Key { label: "lim", value: "limit(" },
            Key { label: "∑", value: "sum(" },
            Key { label: "∏", value: "product(" },
        ],
    ),
    (
        "STATISTICS",
        &[
            Key { label: "μ", value: "mean(" },
            Key { label: "σ", value: "std(" },
            Key { label: "var", value: "var(" },
            Key { label: "med", value: "median(" },
            Key { label: "mode", value: "mode(" },
        ],
    ),
];

pub const TEMPLATES: &[Key] = &[
    Key { label: "x²", value: "x^2" },
    Key { label: "ax² + bx + c", value: "a*x^2 + b*x + c" },
    Key { label: "sin(x)", value: "sin(x)" },
    Key { label: "e^x", value: "e^x" },
    Key { label: "log(x)", value: "log(x)" },
    Key { label: "√x", value: "sqrt(x)" },
];

/// Map a keypad glyph to the text it inserts.
pub fn translate_key(key: &str) -> &str {
    match key {
        "×" => "*",
        "÷" => "/",
        "−" => "-",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::validate_expression;

    #[test]
    fn test_translate_operator_glyphs() {
        assert_eq!(translate_key("×"), "*");
        assert_eq!(translate_key("÷"), "/");
        assert_eq!(translate_key("−"), "-");
        assert_eq!(translate_key("7"), "7");
        assert_eq!(translate_key("sin("), "sin(");
    }

    #[test]
    fn test_number_pad_translates_to_ascii() {
        for key in NUMBER_KEYS {
            assert!(translate_key(key).is_ascii(), "{key}");
        }
    }

    #[test]
    fn test_every_constant_is_described() {
        for constant in CONSTANTS {
            assert!(!constant.description.is_empty(), "{}", constant.symbol);
        }
    }

    #[test]
    fn test_examples_validity() {
        // Only the polynomial examples use the restricted grammar.
        assert!(validate_expression(EXAMPLES[0].expression));
        assert!(validate_expression(EXAMPLES[4].expression));
        assert!(!validate_expression(EXAMPLES[1].expression));
    }
}
