//! Generic HTTP request plumbing.
//!
//! Unified request execution and response parsing shared by every API call:
//! send the request, log it, read the whole body, map transport failures.
//!
//! There is intentionally no retry layer here. Every failure is terminal for
//! the current present/cleanup invocation; the challenge host owns the retry
//! and backoff policy across invocations.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::SolverError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set.
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns `(status_code, response_text)`.
    ///
    /// The entire response body is read before returning; callers parse it
    /// afterwards. Timeouts map to [`SolverError::Timeout`], every other
    /// transport failure to [`SolverError::NetworkError`].
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), SolverError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SolverError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                SolverError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| SolverError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body into `T`.
    pub fn parse_json<T>(response_text: &str) -> Result<T, SolverError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            SolverError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, SolverError> = HttpUtils::parse_json(r#"{"x":42}"#);
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, SolverError> = HttpUtils::parse_json("not json");
        assert!(
            matches!(&result, Err(SolverError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_tolerates_unknown_fields() {
        #[derive(serde::Deserialize, Debug)]
        struct Ack {
            success: bool,
        }
        let result: Result<Ack, SolverError> =
            HttpUtils::parse_json(r#"{"success":true,"info":"extra"}"#);
        assert!(matches!(&result, Ok(Ack { success: true })));
    }
}
