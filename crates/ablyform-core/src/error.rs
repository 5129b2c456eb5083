// ── Core error types ──
//
// Domain errors from ablyform-core. Consumers never see reqwest errors or
// JSON parse failures directly: the `From<ablyform_api::Error>` impl
// translates transport-layer errors into domain variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the Control API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Control API request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Ably error code (e.g. `40400`).
        code: Option<u32>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
        /// Documentation link for the error code.
        href: Option<String>,
    },

    #[error("Entity not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Rule mapping errors (recoverable) ────────────────────────────
    #[error("Rule {rule_id} has unrecognized rule type '{rule_type}'")]
    UnknownRuleType { rule_id: String, rule_type: String },

    #[error("Rule {rule_id} ({rule_type}) has an unusable target: {reason}")]
    InvalidRuleTarget {
        rule_id: String,
        rule_type: String,
        reason: String,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output file {file} is reserved for the provider header")]
    ReservedFileName { file: String },

    #[error("Output file {file} was overwritten by application '{by}'")]
    Overwritten { file: String, by: String },

    #[error("Export of application '{app}' failed: {source}")]
    AppExport {
        app: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Failed to render HCL: {0}")]
    Render(#[from] hcl::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for errors that only affect a single rule.
    pub fn is_rule_scoped(&self) -> bool {
        matches!(
            self,
            Self::UnknownRuleType { .. } | Self::InvalidRuleTarget { .. }
        )
    }

    /// Returns `true` if the error stems from a rejected or missing token.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. } => true,
            Self::AppExport { source, .. } => source.is_auth(),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ablyform_api::Error> for CoreError {
    fn from(err: ablyform_api::Error) -> Self {
        match err {
            ablyform_api::Error::Unauthorized { message } => {
                CoreError::AuthenticationFailed { message }
            }
            ablyform_api::Error::InvalidToken(reason) => CoreError::AuthenticationFailed {
                message: format!("token cannot be used as a header value: {reason}"),
            },
            ablyform_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                        href: None,
                    }
                }
            }
            ablyform_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ablyform_api::Error::Api {
                status: status @ (401 | 403),
                message,
                ..
            } => CoreError::AuthenticationFailed {
                message: format!("{message} (HTTP {status})"),
            },
            ablyform_api::Error::Api {
                status,
                message,
                code,
                href,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
                href,
            },
            ablyform_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_maps_to_authentication() {
        let err: CoreError = ablyform_api::Error::Api {
            status: 403,
            message: "token lacks read:app".into(),
            code: Some(40160),
            href: None,
        }
        .into();
        assert!(err.is_auth());
    }

    #[test]
    fn structured_payload_survives_mapping() {
        let err: CoreError = ablyform_api::Error::Api {
            status: 404,
            message: "App not found".into(),
            code: Some(40400),
            href: Some("https://help.ably.io/error/40400".into()),
        }
        .into();
        match err {
            CoreError::Api {
                code, status, href, ..
            } => {
                assert_eq!(code, Some(40400));
                assert_eq!(status, Some(404));
                assert!(href.is_some());
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn wrapped_auth_error_is_still_auth() {
        let err = CoreError::AppExport {
            app: "My App".into(),
            source: Box::new(CoreError::AuthenticationFailed {
                message: "expired".into(),
            }),
        };
        assert!(err.is_auth());
        assert!(!err.is_rule_scoped());
    }
}
