//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use ablyform_config::ConfigError;
use ablyform_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const PARTIAL: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the Control API at {url}: {reason}")]
    #[diagnostic(
        code(ablyform::connection_failed),
        help(
            "Check network access and the API URL.\n\
             Override it with --api-url or `ablyform config set api_url <url>`."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(ablyform::timeout),
        help("Increase the timeout with --timeout or check Control API availability.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ablyform::auth_failed),
        help(
            "Check that the account token is valid and has the read:app,\n\
             read:key, read:namespace, read:queue and read:rule capabilities."
        )
    )]
    AuthFailed { message: String },

    #[error("No account token configured for profile '{profile}'")]
    #[diagnostic(
        code(ablyform::no_credentials),
        help(
            "Set ABLY_ACCOUNT_TOKEN, pass --token, or run: ablyform config init"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ablyform::not_found),
        help("Run: ablyform {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    #[diagnostic(code(ablyform::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
        code: Option<u32>,
        #[help]
        href: Option<String>,
    },

    // ── Export ───────────────────────────────────────────────────────

    #[error("Export of application '{app}' failed")]
    #[diagnostic(
        code(ablyform::app_failed),
        help("Drop --fail-fast to skip failing applications and export the rest.")
    )]
    AppFailed {
        app: String,
        #[source]
        source: Box<CliError>,
    },

    #[error("{failed} of {total} applications failed to export")]
    #[diagnostic(
        code(ablyform::partial_export),
        help("The remaining files were written. Re-run with -v for details.")
    )]
    PartialExport { failed: usize, total: usize },

    #[error("Failed to write {path}")]
    #[diagnostic(code(ablyform::write_failed))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ablyform::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ablyform::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ablyform config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ablyform::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(ablyform::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Internal ────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(ablyform::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::PartialExport { .. } => exit_code::PARTIAL,
            Self::AppFailed { source, .. } => source.exit_code(),
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Api {
                message,
                code,
                status,
                href,
            } => CliError::ApiError {
                message,
                status,
                code,
                href: href.map(|h| format!("See: {h}")),
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::AppExport { app, source } => CliError::AppFailed {
                app,
                source: Box::new(CliError::from(*source)),
            },

            CoreError::Write { path, source } => CliError::Write {
                path: path.display().to_string(),
                source,
            },

            CoreError::Config { message } => CliError::Config { message },

            err @ (CoreError::UnknownRuleType { .. }
            | CoreError::InvalidRuleTarget { .. }
            | CoreError::ReservedFileName { .. }
            | CoreError::Overwritten { .. }
            | CoreError::Render(_)) => {
                CliError::Internal(err.to_string())
            }

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
