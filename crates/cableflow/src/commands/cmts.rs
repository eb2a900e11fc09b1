//! CMTS command handlers.

use cableflow_core::Harness;

use crate::cli::{CmtsArgs, CmtsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    harness: &mut Harness,
    args: CmtsArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let outcome = match args.command {
        CmtsCommand::Add(arg) => {
            let cmts = util::load_record(harness, &arg.record)?;
            harness.cmts_add(&cmts).await?
        }
        CmtsCommand::Remove(arg) => {
            let cmts = util::load_record(harness, &arg.record)?;
            harness.cmts_remove(&cmts).await?
        }
    };

    let out = output::render_outcome(settings.format, &outcome, settings.color)?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
