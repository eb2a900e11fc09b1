//! Flow command handlers.

use cableflow_core::Harness;

use crate::cli::{FlowsArgs, FlowsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    harness: &mut Harness,
    args: FlowsArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let fmt = settings.format;
    let out = match args.command {
        FlowsCommand::List => {
            let listing = harness.flow_list().await?;
            output::render_flows(fmt, &listing)?
        }

        FlowsCommand::Add(arg) => {
            let flow = util::load_record(harness, &arg.record)?;
            let outcome = harness.flow_add(&flow).await?;
            output::render_outcome(fmt, &outcome, settings.color)?
        }

        FlowsCommand::AddSeveral => {
            let outcomes = harness.flow_add_several().await?;
            output::render_outcomes(fmt, &outcomes, settings.color)?
        }

        FlowsCommand::Update(arg) => {
            let flow = util::load_record(harness, &arg.record)?;
            let outcome = harness.flow_update(&flow).await?;
            output::render_outcome(fmt, &outcome, settings.color)?
        }

        FlowsCommand::Remove(arg) => {
            let flow = util::load_record(harness, &arg.record)?;
            let outcome = harness.flow_remove(&flow).await?;
            output::render_outcome(fmt, &outcome, settings.color)?
        }

        FlowsCommand::RemoveAll => {
            let (node, table) = harness.target();
            let prompt = format!("Remove every flow on openflow:{node} table {table}?");
            if !util::confirm(&prompt, settings.yes, "flows remove-all")? {
                return Ok(());
            }
            let removed = harness.flow_remove_all().await?;
            output::render_removals(fmt, &removed, settings.color)?
        }
    };

    output::print_output(&out, settings.quiet);
    Ok(())
}
