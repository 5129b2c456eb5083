//! Command dispatch: bridges CLI args to the export pipeline and output formatting.

pub mod apps;
pub mod config_cmd;
pub mod export;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an account-bound command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Export(args) => export::handle(args, global).await,
        Command::Apps => apps::handle(global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command routed to account dispatch".into(),
        )),
    }
}
