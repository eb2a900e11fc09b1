//! Topology command handler.

use cableflow_core::{Harness, show};

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn handle(harness: &mut Harness, settings: &Settings) -> Result<(), CliError> {
    let nodes = harness.topology().await?;
    let out = match settings.format {
        OutputFormat::JsonCompact => serde_json::to_string(&nodes)?,
        OutputFormat::Table | OutputFormat::Json => show(&nodes),
    };
    output::print_output(&out, settings.quiet);
    Ok(())
}
