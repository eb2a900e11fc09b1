//! Fixture inspection handlers. These never contact the controller.

use crate::cli::{FixturesArgs, FixturesCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

pub fn handle(args: FixturesArgs, settings: &Settings) -> Result<(), CliError> {
    let store = settings.load_fixtures()?;

    let out = match args.command {
        FixturesCommand::List => output::render_catalogue(settings.format, &store.catalogue())?,

        FixturesCommand::Show { fixture } => {
            let text = store
                .get(&fixture)
                .or_else(|| store.select(&fixture).map(|(_, text)| text))
                .ok_or_else(|| CliError::RecordNotFound {
                    identifier: fixture.clone(),
                })?;
            output::render_fixture_text(settings.format, text)?
        }
    };

    output::print_output(&out, settings.quiet);
    Ok(())
}
