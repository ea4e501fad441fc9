//! Remote symbolic computation.
//!
//! The heavy lifting (simplify, derive, integrate, ...) is done by a
//! third-party HTTP API. Callers validate first; this module only moves
//! the expression over the wire and pulls the result back out.

mod newton;

pub use newton::{DEFAULT_API_URL, NewtonClient, parse_response};

use crate::operation::Operation;
use std::future::Future;
use thiserror::Error;

/// Failures talking to the computation service.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Unable to perform the operation. Please check your input.")]
    NoResult,
}

/// Something that can apply an [`Operation`] to an expression.
pub trait ComputeService {
    /// Apply `operation` to `expression` and return the result text.
    fn compute(
        &self,
        operation: Operation,
        expression: &str,
    ) -> impl Future<Output = Result<String, ComputeError>> + Send;
}
