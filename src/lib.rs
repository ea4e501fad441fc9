//! Math Wizard: validate, format, analyze and visualize expressions.
//!
//! The core is a validator and sandboxed evaluator over a small arithmetic
//! grammar. Symbolic operations are delegated to a remote API; history and
//! theme are persisted locally.

pub mod config;
pub mod export;
pub mod expression;
pub mod keypad;
pub mod operation;
pub mod remote;
pub mod state;

/// Directory name used under the platform config and data dirs.
pub const APP_NAME: &str = "mathwizard";

pub use expression::{format_expression, validate_expression};
pub use operation::Operation;
