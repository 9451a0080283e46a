use serde::{Deserialize, Serialize};

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Unified error type for all solver and provider-client operations.
///
/// All variants are serializable for structured error reporting towards the
/// challenge host. Retry policy is deliberately not modelled here: every
/// failure is terminal for the current present/cleanup invocation, and the
/// external host decides whether to try again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum SolverError {
    /// Login was rejected, or the login response carried no token.
    ///
    /// Any token-less response body counts as an authentication failure,
    /// even when the HTTP exchange itself succeeded.
    AuthFailed {
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, broken body stream, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The provider answered with a well-formed body that did not carry
    /// `success == true`.
    ApiRejected {
        /// Which operation was rejected (e.g. `"add record"`).
        operation: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// No zone in the account matched the requested domain.
    ///
    /// This is a configuration/caller error and is terminal for the
    /// invocation. An absent *record* during cleanup is not an error.
    ZoneNotFound {
        /// Domain name that failed to resolve to a zone.
        domain: String,
    },
}

impl SolverError {
    /// Whether this error represents expected behavior (bad input, missing
    /// resource) rather than an operational fault, for log-level selection.
    ///
    /// Returns `true` when `warn` is the right level, `false` for `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed { .. } | Self::ZoneNotFound { .. } | Self::ApiRejected { .. }
        )
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthFailed { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Authentication failed: {msg}")
                } else {
                    write!(f, "Authentication failed")
                }
            }
            Self::NetworkError { detail } => {
                write!(f, "Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "Request timeout: {detail}")
            }
            Self::ApiRejected {
                operation,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "API call '{operation}' was unsuccessful: {msg}")
                } else {
                    write!(f, "API call '{operation}' was unsuccessful")
                }
            }
            Self::ParseError { detail } => {
                write!(f, "Failed to parse API response: {detail}")
            }
            Self::ZoneNotFound { domain } => {
                write!(f, "No zone found for domain '{domain}'")
            }
        }
    }
}

impl std::error::Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_auth_failed_with_message() {
        let e = SolverError::AuthFailed {
            raw_message: Some("invalid credentials".into()),
        };
        assert_eq!(e.to_string(), "Authentication failed: invalid credentials");
    }

    #[test]
    fn display_auth_failed_without_message() {
        let e = SolverError::AuthFailed { raw_message: None };
        assert_eq!(e.to_string(), "Authentication failed");
    }

    #[test]
    fn display_zone_not_found() {
        let e = SolverError::ZoneNotFound {
            domain: "example.com".into(),
        };
        assert_eq!(e.to_string(), "No zone found for domain 'example.com'");
    }

    #[test]
    fn display_api_rejected() {
        let e = SolverError::ApiRejected {
            operation: "add record".into(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "API call 'add record' was unsuccessful");
    }

    #[test]
    fn expected_errors_log_as_warn() {
        assert!(SolverError::AuthFailed { raw_message: None }.is_expected());
        assert!(SolverError::ZoneNotFound {
            domain: "x".into()
        }
        .is_expected());
        assert!(!SolverError::NetworkError {
            detail: "x".into()
        }
        .is_expected());
        assert!(!SolverError::ParseError {
            detail: "x".into()
        }
        .is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = SolverError::Timeout {
            detail: "deadline".into(),
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "Timeout");
        assert_eq!(json["detail"], "deadline");
    }
}
