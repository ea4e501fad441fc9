//! Symbolic operations offered by the remote computation service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named symbolic transform applied to an expression remotely.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Simplify,
    Factor,
    Derive,
    Integrate,
    Zeroes,
    Tangent,
    Area,
    Cos,
    Sin,
    Tan,
    Arccos,
    Arcsin,
    Arctan,
    Abs,
    Log,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl Operation {
    /// Every operation, in menu order.
    pub const ALL: [Operation; 15] = [
        Self::Simplify,
        Self::Factor,
        Self::Derive,
        Self::Integrate,
        Self::Zeroes,
        Self::Tangent,
        Self::Area,
        Self::Cos,
        Self::Sin,
        Self::Tan,
        Self::Arccos,
        Self::Arcsin,
        Self::Arctan,
        Self::Abs,
        Self::Log,
    ];

    /// Path keyword used by the remote API.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Simplify => "simplify",
            Self::Factor => "factor",
            Self::Derive => "derive",
            Self::Integrate => "integrate",
            Self::Zeroes => "zeroes",
            Self::Tangent => "tangent",
            Self::Area => "area",
            Self::Cos => "cos",
            Self::Sin => "sin",
            Self::Tan => "tan",
            Self::Arccos => "arccos",
            Self::Arcsin => "arcsin",
            Self::Arctan => "arctan",
            Self::Abs => "abs",
            Self::Log => "log",
        }
    }

    /// Short human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Simplify => "Simplify",
            Self::Factor => "Factor",
            Self::Derive => "Derive",
            Self::Integrate => "Integrate",
            Self::Zeroes => "Find Zeroes",
            Self::Tangent => "Find Tangent",
            Self::Area => "Area Under Curve",
            Self::Cos => "Cosine",
            Self::Sin => "Sine",
            Self::Tan => "Tangent",
            Self::Arccos => "Inverse Cosine",
            Self::Arcsin => "Inverse Sine",
            Self::Arctan => "Inverse Tangent",
            Self::Abs => "Absolute Value",
            Self::Log => "Logarithm",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Simplify => "Simplify the expression",
            Self::Factor => "Factor the expression",
            Self::Derive => "Calculate the derivative of the expression",
            Self::Integrate => "Calculate the integral of the expression",
            Self::Zeroes => "Find the zeroes of the expression",
            Self::Tangent => "Find the tangent line to the expression at a point",
            Self::Area => "Calculate the area under the curve for the expression",
            Self::Cos => "Calculate the cosine of the expression",
            Self::Sin => "Calculate the sine of the expression",
            Self::Tan => "Calculate the tangent of the expression",
            Self::Arccos => "Calculate the inverse cosine of the expression",
            Self::Arcsin => "Calculate the inverse sine of the expression",
            Self::Arctan => "Calculate the inverse tangent of the expression",
            Self::Abs => "Calculate the absolute value of the expression",
            Self::Log => "Calculate the logarithm of the expression",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.keyword() == wanted)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_parse_back() {
        for op in Operation::ALL {
            assert_eq!(op.keyword().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Derive".parse::<Operation>(), Ok(Operation::Derive));
        assert_eq!(" zeroes ".parse::<Operation>(), Ok(Operation::Zeroes));
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(
            "differentiate".parse::<Operation>(),
            Err(UnknownOperation("differentiate".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_keyword() {
        let json = serde_json::to_string(&Operation::Arctan).unwrap();
        assert_eq!(json, "\"arctan\"");
        let op: Operation = serde_json::from_str("\"area\"").unwrap();
        assert_eq!(op, Operation::Area);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = Operation::ALL.iter().map(|op| op.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Operation::ALL.len());
    }
}
