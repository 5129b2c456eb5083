// ── Runtime connection configuration ──
//
// Describes *how* to reach the Control API. Built once by the CLI and
// owned by the orchestrator; core never reads config files or the
// environment itself.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub use ablyform_api::DEFAULT_API_URL;

/// Connection settings for one Control API account.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// API base URL (e.g., `https://control.ably.net/v1`).
    pub api_url: Url,
    /// Account access token.
    pub token: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ControlConfig {
    /// Config with the default 30s timeout.
    pub fn new(api_url: Url, token: SecretString) -> Self {
        Self {
            api_url,
            token,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
