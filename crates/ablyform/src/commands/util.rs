//! Shared helpers for command handlers.

use std::io::IsTerminal;

use ablyform_core::{ControlConfig, ControlSource};

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Refuse to block on a prompt nobody can answer.
pub fn require_interactive(action: &str, yes_flag: bool) -> Result<(), CliError> {
    if yes_flag || std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
    }
}

/// Load config and resolve the connection settings for this invocation.
pub fn connection_settings(global: &GlobalOpts) -> Result<(Config, ControlConfig), CliError> {
    let cfg = config::load_config_or_default();
    let control = config::resolve_control_config(global, &cfg)?;
    Ok((cfg, control))
}

/// Open the live source, resolving the token's account.
pub async fn connect(control: &ControlConfig) -> Result<ControlSource, CliError> {
    let source = ControlSource::connect(control).await?;
    tracing::debug!(
        account = source.account_id(),
        name = source.account_name().unwrap_or("-"),
        "connected"
    );
    Ok(source)
}
