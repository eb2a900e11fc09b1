mod cli;
mod commands;
mod config;
mod error;
mod menu;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cableflow_core::Harness;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;

    match command.unwrap_or(Command::Menu) {
        // Config commands don't need a controller or fixtures
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "cableflow", &mut std::io::stdout());
            Ok(())
        }

        Command::Fixtures(args) => {
            let settings = Settings::resolve(&global)?;
            commands::fixtures::handle(args, &settings)
        }

        cmd => {
            let settings = Settings::resolve(&global)?;
            let fixtures = if needs_fixtures(&cmd) {
                settings.load_fixtures_or_empty()
            } else {
                cableflow_core::FixtureStore::new()
            };
            let mut harness = Harness::connect(&settings.controller, fixtures)?;

            tracing::debug!(command = ?cmd, profile = %settings.profile_name, "dispatching command");
            commands::dispatch(cmd, &mut harness, &settings)
                .await
                .map_err(|err| err.for_profile(&settings.profile_name))
        }
    }
}

/// Commands that name records or offer the fixture menu.
fn needs_fixtures(cmd: &Command) -> bool {
    use crate::cli::FlowsCommand;

    match cmd {
        Command::Menu | Command::Cmts(_) => true,
        Command::Flows(args) => matches!(
            args.command,
            FlowsCommand::Add(_) | FlowsCommand::Update(_) | FlowsCommand::Remove(_)
        ),
        _ => false,
    }
}
