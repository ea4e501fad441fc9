//! Client for the Newton symbolic math API.

use super::{ComputeError, ComputeService};
use crate::operation::Operation;
use serde::Deserialize;
use std::time::Duration;

/// Base URL of the public API; requests go to `{base}/{operation}/{expression}`.
pub const DEFAULT_API_URL: &str = "https://newton.now.sh/api/v2";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    result: Option<String>,
}

/// HTTP client for the computation API.
#[derive(Clone, Debug)]
pub struct NewtonClient {
    client: reqwest::Client,
    base_url: String,
}

impl NewtonClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ComputeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mathwizard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the request URL, percent-encoding the expression as one path segment.
    pub fn request_url(&self, operation: Operation, expression: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            operation.keyword(),
            urlencoding::encode(expression)
        )
    }
}

impl ComputeService for NewtonClient {
    async fn compute(
        &self,
        operation: Operation,
        expression: &str,
    ) -> Result<String, ComputeError> {
        let url = self.request_url(operation, expression);
        tracing::debug!(%url, "requesting remote operation");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), %operation, "remote operation failed");
            return Err(ComputeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Extract the `result` field from a response body.
///
/// A missing, null or empty result is reported as [`ComputeError::NoResult`].
pub fn parse_response(body: &str) -> Result<String, ComputeError> {
    let response: ApiResponse = serde_json::from_str(body)?;
    match response.result {
        Some(result) if !result.is_empty() => Ok(result),
        _ => Err(ComputeError::NoResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> NewtonClient {
        NewtonClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_request_url_encodes_expression() {
        let c = client(DEFAULT_API_URL);
        assert_eq!(
            c.request_url(Operation::Derive, "x^2 + 1"),
            "https://newton.now.sh/api/v2/derive/x%5E2%20%2B%201"
        );
        assert_eq!(
            c.request_url(Operation::Simplify, "1/x"),
            "https://newton.now.sh/api/v2/simplify/1%2Fx"
        );
    }

    #[test]
    fn test_request_url_trailing_slash() {
        let c = client("http://localhost:8080/api/");
        assert_eq!(
            c.request_url(Operation::Zeroes, "x"),
            "http://localhost:8080/api/zeroes/x"
        );
    }

    #[test]
    fn test_parse_response_result() {
        let body = r#"{"operation":"derive","expression":"x^2","result":"2 x"}"#;
        assert_eq!(parse_response(body).unwrap(), "2 x");
    }

    #[test]
    fn test_parse_response_missing_result() {
        assert!(matches!(
            parse_response(r#"{"operation":"derive"}"#),
            Err(ComputeError::NoResult)
        ));
        assert!(matches!(
            parse_response(r#"{"result":""}"#),
            Err(ComputeError::NoResult)
        ));
        assert!(matches!(
            parse_response(r#"{"result":null}"#),
            Err(ComputeError::NoResult)
        ));
    }

    #[test]
    fn test_parse_response_malformed() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(ComputeError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ComputeError::Status(404).to_string(), "HTTP error! status: 404");
        assert_eq!(
            ComputeError::NoResult.to_string(),
            "Unable to perform the operation. Please check your input."
        );
    }
}
