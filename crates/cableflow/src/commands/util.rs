//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde_json::Value;

use cableflow_core::Harness;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused rather than
/// assumed.
pub fn confirm(message: &str, yes_flag: bool, action: &str) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Resolve a record argument: an existing file is read as JSON; anything
/// else is looked up as a fixture name, then a built-in record.
pub fn load_record(harness: &Harness, arg: &str) -> Result<Value, CliError> {
    let path = Path::new(arg);
    if path.is_file() {
        return read_json_file(path);
    }
    Ok(harness.record(arg)?)
}

/// Read and parse a JSON record file.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "record".into(),
        reason: format!("{}: invalid JSON: {e}", path.display()),
    })
}
