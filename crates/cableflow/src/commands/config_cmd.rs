//! Config subcommand handlers.

use serde::Serialize;

use cableflow_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

/// Resolved settings as shown by `config show`. Never carries the password.
#[derive(Serialize)]
struct ResolvedView {
    profile: String,
    host: String,
    port: u16,
    username: Option<String>,
    timeout_secs: Option<u64>,
    node: u64,
    table: u64,
    fixtures_dir: String,
    extension: String,
}

impl From<&Settings> for ResolvedView {
    fn from(s: &Settings) -> Self {
        let c = &s.controller;
        Self {
            profile: s.profile_name.clone(),
            host: c.host.clone(),
            port: c.port,
            username: c.auth.as_ref().map(|a| a.username.clone()),
            timeout_secs: c.timeout.map(|t| t.as_secs()),
            node: c.node,
            table: c.table,
            fixtures_dir: s.fixtures_dir.display().to_string(),
            extension: s.extension.clone(),
        }
    }
}

fn detail(v: &ResolvedView) -> String {
    [
        format!("Profile:   {}", v.profile),
        format!("Host:      {}:{}", v.host, v.port),
        format!("Username:  {}", v.username.as_deref().unwrap_or("(no auth)")),
        format!(
            "Timeout:   {}",
            v.timeout_secs.map_or_else(|| "none".into(), |t| format!("{t}s"))
        ),
        format!("Target:    openflow:{} table {}", v.node, v.table),
        format!("Fixtures:  {} (*.{})", v.fixtures_dir, v.extension),
    ]
    .join("\n")
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists (use --force to overwrite)", path.display()),
                });
            }
            let path = config::save_config(&Config::starter())?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  Test it: cableflow topology");
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let settings = Settings::resolve(global)?;
            let view = ResolvedView::from(&settings);
            let out = output::render_single(settings.format, &view, detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: cableflow config init");
                return Ok(());
            }
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if name == default { " (default)" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }
    }
}
