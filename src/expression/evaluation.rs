//! Sandboxed arithmetic evaluation.
//!
//! A small recursive-descent evaluator over a fixed grammar: numbers, the
//! variables `x` and `z`, the constants `π` and `∞`, `+ - * / ^`,
//! parentheses and `,` sequencing. Nothing outside that grammar is ever
//! interpreted, so user text can be checked for evaluability safely.

use std::f64::consts::PI;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Deepest nesting of groups and exponents the parser descends into.
pub const MAX_DEPTH: usize = 256;

/// Reasons an expression fails to evaluate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("malformed number '{0}'")]
    MalformedNumber(String),
    #[error("unexpected token {0}")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    #[error("variable '{0}' has no value")]
    UnboundVariable(char),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression nests deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Values for the free variables of an expression.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bindings {
    pub x: Option<f64>,
    pub z: Option<f64>,
}

impl Bindings {
    /// Bind only `x`.
    pub fn with_x(x: f64) -> Self {
        Self {
            x: Some(x),
            z: None,
        }
    }

    /// Bind both `x` and `z`, as used for surface sampling.
    pub fn with_xz(x: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            z: Some(z),
        }
    }

    fn lookup(&self, name: char) -> Result<f64, EvalError> {
        let value = match name {
            'x' => self.x,
            'z' => self.z,
            _ => None,
        };
        value.ok_or(EvalError::UnboundVariable(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Var(char),
    Const(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Comma,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Self::Num(n) => format!("number {n}"),
            Self::Var(v) => format!("variable '{v}'"),
            Self::Const(c) if c.is_infinite() => "'∞'".to_string(),
            Self::Const(_) => "'π'".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::Comma => "','".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
        }
    }

    /// Tokens that may directly follow a complete operand to form an
    /// implicit product, as in `2x` or `3(x+1)`.
    fn starts_implicit_factor(&self) -> bool {
        matches!(self, Self::Var(_) | Self::Const(_) | Self::LParen)
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices<'_>> = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let start = pos;
                let mut end = pos;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                tokens.push(parse_number(literal)?);
                continue;
            }
            'x' | 'z' => Token::Var(ch),
            'π' => Token::Const(PI),
            '∞' => Token::Const(f64::INFINITY),
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            ',' => Token::Comma,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return Err(EvalError::UnexpectedChar { ch, pos }),
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Token, EvalError> {
    // Rust's float parser accepts "5." and ".5", but a lone "." or a second
    // decimal point must be rejected.
    if literal == "." || literal.matches('.').count() > 1 {
        return Err(EvalError::MalformedNumber(literal.to_string()));
    }
    literal
        .parse::<f64>()
        .map(Token::Num)
        .map_err(|_| EvalError::MalformedNumber(literal.to_string()))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    bindings: &'a Bindings,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn sequence(&mut self) -> Result<f64, EvalError> {
        let mut value = self.expr()?;
        while self.peek() == Some(Token::Comma) {
            self.advance();
            value = self.expr()?;
        }
        Ok(value)
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                Some(token) if token.starts_implicit_factor() => {
                    value *= self.power()?;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Every nested group and exponent passes through here, so the depth
    /// check bounds the recursion.
    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        let mut signs = 0;
        loop {
            match self.peek() {
                Some(Token::Minus) => negate = !negate,
                Some(Token::Plus) => {}
                _ => break,
            }
            signs += 1;
            if self.depth + signs > MAX_DEPTH {
                return Err(EvalError::TooDeep);
            }
            self.advance();
        }
        let value = self.power()?;
        Ok(if negate { -value } else { value })
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Caret) {
            self.advance();
            // Right-associative: the exponent may itself carry a power.
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Num(n)) | Some(Token::Const(n)) => Ok(n),
            Some(Token::Var(name)) => self.bindings.lookup(name),
            Some(Token::LParen) => {
                let value = self.sequence()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
                    None => Err(EvalError::UnbalancedParen),
                }
            }
            Some(Token::RParen) => Err(EvalError::UnbalancedParen),
            Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluate an expression with the given variable bindings.
pub fn evaluate(expression: &str, bindings: &Bindings) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::UnexpectedEnd);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        bindings,
    };
    let value = parser.sequence()?;

    match parser.peek() {
        None => Ok(value),
        Some(Token::RParen) => Err(EvalError::UnbalancedParen),
        Some(token) => Err(EvalError::UnexpectedToken(token.describe())),
    }
}

/// Evaluate an expression with only `x` bound.
pub fn evaluate_with_x(expression: &str, x: f64) -> Result<f64, EvalError> {
    evaluate(expression, &Bindings::with_x(x))
}

/// Format a value for display, trimming trailing zeros.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "∞" } else { "-∞" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> f64 {
        evaluate(expr, &Bindings::default()).unwrap()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("2 + 2"), 4.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("2 + 3 * 4"), 14.0);
        assert_eq!(eval("(2 + 3) * 4"), 20.0);
        assert_eq!(eval("7 / 2"), 3.5);
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(eval("2^3^2"), 512.0);
        assert_eq!(eval("-2^2"), -4.0);
        assert_eq!(eval("2^-1"), 0.5);
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(eval(".5 + 5."), 5.5);
        assert!(matches!(
            evaluate("1.2.3", &Bindings::default()),
            Err(EvalError::MalformedNumber(_))
        ));
        assert!(matches!(
            evaluate(".", &Bindings::default()),
            Err(EvalError::MalformedNumber(_))
        ));
    }

    #[test]
    fn test_variables_and_implicit_multiplication() {
        assert_eq!(evaluate_with_x("2x", 3.0).unwrap(), 6.0);
        assert_eq!(evaluate_with_x("x^2 + 2x + 1", 1.0).unwrap(), 4.0);
        assert_eq!(evaluate_with_x("3(x + 1)", 2.0).unwrap(), 9.0);
        assert_eq!(evaluate_with_x("x(x + 1)", 2.0).unwrap(), 6.0);
        assert_eq!(
            evaluate("x * z", &Bindings::with_xz(2.0, 5.0)).unwrap(),
            10.0
        );
    }

    #[test]
    fn test_unbound_variable() {
        assert_eq!(
            evaluate_with_x("x + z", 1.0),
            Err(EvalError::UnboundVariable('z'))
        );
    }

    #[test]
    fn test_constants() {
        assert!((eval("2π") - 2.0 * PI).abs() < 1e-12);
        assert!(eval("∞").is_infinite());
    }

    #[test]
    fn test_comma_sequence_yields_last_value() {
        assert_eq!(eval("1, 2"), 2.0);
        assert_eq!(eval("(1, 2) * 3"), 6.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate("1 / 0", &Bindings::default()),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            evaluate_with_x("1 / (x - 1)", 1.0),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_malformed_syntax() {
        let empty = Bindings::default();
        assert_eq!(evaluate("", &empty), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("2 +", &empty), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(2", &empty), Err(EvalError::UnbalancedParen));
        assert_eq!(evaluate("2)", &empty), Err(EvalError::UnbalancedParen));
        assert_eq!(evaluate("()", &empty), Err(EvalError::UnbalancedParen));
        assert!(matches!(
            evaluate("1 2", &empty),
            Err(EvalError::UnexpectedToken(_))
        ));
        assert!(matches!(
            evaluate("2 * ^ 3", &empty),
            Err(EvalError::UnexpectedToken(_))
        ));
        assert_eq!(
            evaluate("2!", &empty),
            Err(EvalError::UnexpectedChar { ch: '!', pos: 1 })
        );
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let empty = Bindings::default();
        let parens = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(evaluate(&parens, &empty), Err(EvalError::TooDeep));

        let powers = format!("2{}", "^2".repeat(100_000));
        assert_eq!(evaluate(&powers, &empty), Err(EvalError::TooDeep));

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&shallow, &empty), Ok(1.0));
    }

    #[test]
    fn test_long_sign_runs() {
        let empty = Bindings::default();
        let many = format!("{}1", "- ".repeat(100_000));
        assert_eq!(evaluate(&many, &empty), Err(EvalError::TooDeep));
        let even = format!("{}1", "- ".repeat(100));
        assert_eq!(evaluate(&even, &empty), Ok(1.0));
        assert_eq!(evaluate(&format!("{}1", "- ".repeat(3)), &empty), Ok(-1.0));
        assert_eq!(evaluate("+ - + 2", &empty), Ok(-2.0));
    }

    #[test]
    fn test_rejects_code_like_input() {
        let empty = Bindings::default();
        assert!(evaluate("alert(1)", &empty).is_err());
        assert!(evaluate("process.exit()", &empty).is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-12.0), "-12");
        assert_eq!(format_value(0.5), "0.5");
        assert!(format_value(1.0 / 3.0).starts_with("0.333"));
        assert_eq!(format_value(f64::INFINITY), "∞");
        assert_eq!(format_value(f64::NAN), "NaN");
    }
}
