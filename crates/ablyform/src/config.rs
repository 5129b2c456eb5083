//! CLI configuration: thin wrapper around `ablyform_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --timeout). Core only ever sees the resulting
//! `ControlConfig`.

use std::time::Duration;

use secrecy::SecretString;

use ablyform_core::ControlConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ablyform_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Build the `ControlConfig` for this invocation.
///
/// Flag overrides beat the profile, which beats `[defaults]`. An
/// explicitly requested profile must exist; the implicit default profile
/// may be absent, in which case flags and env vars must carry the token.
pub fn resolve_control_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ControlConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    // 1. API URL (flag > env > profile)
    let api_url = ablyform_config::parse_api_url(
        global.api_url.as_deref().unwrap_or(&profile.api_url),
    )?;

    // 2. Token (flag/env > profile chain)
    let token = match global.token {
        Some(ref token) if !token.is_empty() => SecretString::from(token.clone()),
        _ => ablyform_config::resolve_token(&profile, &profile_name)?,
    };

    // 3. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);

    Ok(ControlConfig::new(api_url, token).with_timeout(Duration::from_secs(timeout)))
}
