//! dns.services API client.
//!
//! Thin typed wrapper over the provider's HTTP/JSON endpoints. Mutating
//! endpoints echo a `success` flag in the response body; absence of
//! `success == true` is a failure even when the HTTP exchange succeeded.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SolverError};
use crate::http::HttpUtils;
use crate::types::{Credentials, NewRecord, Zone, ZoneDetails, ZoneList};

/// Production API endpoint.
pub(crate) const API_BASE: &str = "https://dns.services/api";

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create an HTTP client with the standard timeout configuration.
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Unauthenticated client for the dns.services API.
///
/// Stateless and cheap to construct; [`login`](Self::login) yields a
/// [`Session`] carrying the bearer token for the rest of one orchestration
/// run. Nothing is cached between runs.
pub struct DnsServicesClient {
    client: Client,
    base_url: String,
}

impl DnsServicesClient {
    /// Client against the production endpoint.
    pub fn new() -> Self {
        Self::with_base_url(API_BASE)
    }

    /// Client against a custom endpoint (test servers, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: create_http_client(),
            base_url,
        }
    }

    /// Authenticate and obtain a [`Session`].
    ///
    /// The provider returns either `{"token": ...}` or `{"error": ...}`.
    /// Any response without a token is treated as an authentication failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        #[derive(Serialize)]
        struct LoginBody<'a> {
            username: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            #[serde(default)]
            token: Option<String>,
            #[serde(default)]
            error: Option<Value>,
        }

        let url = format!("{}/login", self.base_url);
        let request = self.client.post(&url).json(&LoginBody {
            username: &credentials.username,
            password: &credentials.password,
        });

        let (_, text) = HttpUtils::execute_request(request, "POST", &url).await?;
        let response: LoginResponse = HttpUtils::parse_json(&text)?;

        if let Some(error) = response.error {
            return Err(SolverError::AuthFailed {
                raw_message: Some(value_to_message(&error)),
            });
        }

        match response.token {
            Some(token) => Ok(Session {
                client: self.client.clone(),
                base_url: self.base_url.clone(),
                token,
            }),
            None => Err(SolverError::AuthFailed { raw_message: None }),
        }
    }
}

impl Default for DnsServicesClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated view of the client, valid for one orchestration run.
///
/// Holds the opaque bearer token from login and attaches it to every call.
/// Sessions are never persisted; each present/cleanup performs its own login.
pub struct Session {
    client: Client,
    base_url: String,
    token: String,
}

impl Session {
    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Fetch all zones visible to the account.
    pub async fn list_zones(&self) -> Result<ZoneList> {
        let url = format!("{}/dns", self.base_url);
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.bearer());

        let (_, text) = HttpUtils::execute_request(request, "GET", &url).await?;
        HttpUtils::parse_json(&text)
    }

    /// Fetch a zone's details, including its name-keyed record map.
    pub async fn zone_details(&self, zone: &Zone) -> Result<ZoneDetails> {
        let url = format!(
            "{}/service/{}/dns/{}",
            self.base_url, zone.service_id, zone.domain_id
        );
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.bearer());

        let (_, text) = HttpUtils::execute_request(request, "GET", &url).await?;
        HttpUtils::parse_json(&text)
    }

    /// Create a record in the zone.
    pub async fn add_record(&self, zone: &Zone, record: &NewRecord) -> Result<()> {
        let url = format!(
            "{}/service/{}/dns/{}/records",
            self.base_url, zone.service_id, zone.domain_id
        );
        let request = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(record);

        let (_, text) = HttpUtils::execute_request(request, "POST", &url).await?;
        check_ack("add record", &text)
    }

    /// Delete a record from the zone by its provider-assigned id.
    pub async fn remove_record(&self, zone: &Zone, record_id: &str) -> Result<()> {
        let url = format!(
            "{}/service/{}/dns/{}/records/{}",
            self.base_url, zone.service_id, zone.domain_id, record_id
        );
        let request = self
            .client
            .delete(&url)
            .header("Authorization", self.bearer());

        let (_, text) = HttpUtils::execute_request(request, "DELETE", &url).await?;
        check_ack("remove record", &text)
    }
}

/// Success-flag body echoed by mutating endpoints.
#[derive(Debug, Deserialize)]
struct ApiAck {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

impl ApiAck {
    fn raw_message(self) -> Option<String> {
        self.message
            .or_else(|| self.error.as_ref().map(value_to_message))
    }
}

/// Enforce the success-flag contract on a mutating response body.
fn check_ack(operation: &str, response_text: &str) -> Result<()> {
    let ack: ApiAck = HttpUtils::parse_json(response_text)?;
    if ack.success {
        Ok(())
    } else {
        log::warn!("API rejected '{operation}'");
        Err(SolverError::ApiRejected {
            operation: operation.to_string(),
            raw_message: ack.raw_message(),
        })
    }
}

/// Render a provider error value for messages: plain strings unquoted,
/// anything structured as JSON.
fn value_to_message(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_stripped() {
        let client = DnsServicesClient::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn ack_success_true_is_ok() {
        assert!(check_ack("add record", r#"{"success": true, "record": {}}"#).is_ok());
    }

    #[test]
    fn ack_success_false_is_rejected() {
        let result = check_ack("add record", r#"{"success": false, "message": "bad ttl"}"#);
        assert!(matches!(
            result,
            Err(SolverError::ApiRejected { ref operation, ref raw_message })
                if operation == "add record" && raw_message.as_deref() == Some("bad ttl")
        ));
    }

    #[test]
    fn ack_missing_success_flag_is_rejected() {
        let result = check_ack("remove record", r#"{"info": "ok"}"#);
        assert!(matches!(result, Err(SolverError::ApiRejected { .. })));
    }

    #[test]
    fn ack_malformed_body_is_parse_error() {
        let result = check_ack("remove record", "<html>oops</html>");
        assert!(matches!(result, Err(SolverError::ParseError { .. })));
    }

    #[test]
    fn structured_error_value_rendered_as_json() {
        let value = serde_json::json!({"reason": "denied"});
        assert_eq!(value_to_message(&value), r#"{"reason":"denied"}"#);
        assert_eq!(value_to_message(&serde_json::json!("denied")), "denied");
    }
}
