//! Flow statistics command handler.

use cableflow_core::Harness;

use crate::cli::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub async fn handle(harness: &mut Harness, settings: &Settings) -> Result<(), CliError> {
    let stats = harness.statistics().await?;
    if stats.is_empty() && settings.format == OutputFormat::Table && !settings.quiet {
        eprintln!("No switches reported flow statistics");
        return Ok(());
    }
    let out = output::render_stats(settings.format, &stats)?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
