use thiserror::Error;

/// Top-level error type for the `ablyform-api` crate.
///
/// Covers every failure mode of a Control API call: authentication,
/// transport, structured API errors, and response decoding.
/// `ablyform-core` maps these into domain diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The access token was rejected (HTTP 401).
    #[error("Access token rejected: {message}")]
    Unauthorized { message: String },

    /// The access token cannot be sent as an HTTP header value.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Control API ─────────────────────────────────────────────────
    /// Structured error payload returned by the Control API.
    #[error("Control API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Ably error code, e.g. `40400`.
        code: Option<u32>,
        /// Link to the error documentation, when the API provides one.
        href: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the token is missing, invalid, or lacks access.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Unauthorized { .. } | Self::InvalidToken(_) => true,
            Self::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the Ably error code, if available.
    pub fn api_error_code(&self) -> Option<u32> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_api_error_counts_as_auth() {
        let err = Error::Api {
            status: 403,
            message: "forbidden".into(),
            code: Some(40300),
            href: None,
        };
        assert!(err.is_auth_error());
        assert!(!err.is_not_found());
        assert_eq!(err.api_error_code(), Some(40300));
    }

    #[test]
    fn not_found_api_error() {
        let err = Error::Api {
            status: 404,
            message: "app not found".into(),
            code: None,
            href: None,
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_error());
    }
}
