//! Command dispatch: bridges CLI args -> harness operations -> output formatting.

pub mod cmts;
pub mod config_cmd;
pub mod fixtures;
pub mod flows;
pub mod stats;
pub mod topology;
pub mod util;

use cableflow_core::Harness;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;
use crate::menu;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    harness: &mut Harness,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Menu => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            menu::run(harness, settings, stdin, stdout).await
        }
        Command::Topology => topology::handle(harness, settings).await,
        Command::Flows(args) => flows::handle(harness, args, settings).await,
        Command::Stats => stats::handle(harness, settings).await,
        Command::Cmts(args) => cmts::handle(harness, args, settings).await,
        // Fixtures, Config and Completions are handled before dispatch
        Command::Fixtures(_) | Command::Config(_) | Command::Completions(_) => Err(
            CliError::Internal("command dispatched without a controller handler".into()),
        ),
    }
}
