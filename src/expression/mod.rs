//! Expression handling.
//!
//! This module provides functionality to:
//! - Validate user input before it is sent anywhere
//! - Format words and operators into their symbolic forms
//! - Evaluate expressions with a sandboxed arithmetic evaluator
//! - Sample expressions as height fields for surface plots

mod evaluation;
mod formatting;
mod surface;
mod validation;

pub use evaluation::{Bindings, EvalError, evaluate, evaluate_with_x, format_value};
pub use formatting::format_expression;
pub use surface::{
    DEFAULT_RESOLUTION, MAX_RESOLUTION, SurfaceDomain, SurfaceGrid, SurfacePoint, sample_surface,
};
pub use validation::validate_expression;
