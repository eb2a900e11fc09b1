//! CLI-side configuration: layers global flags over the loaded profile
//! and produces the `ControllerConfig` core runs with.
//!
//! Core never sees these types -- it receives a pre-built `ControllerConfig`.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use cableflow_config::{Config, Defaults, Profile};
use cableflow_core::{AuthCredentials, ControllerConfig, FixtureStore};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a command handler needs besides the harness itself.
#[derive(Debug)]
pub struct Settings {
    pub profile_name: String,
    pub controller: ControllerConfig,
    pub fixtures_dir: PathBuf,
    pub extension: String,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Settings {
    /// Load the config file and resolve the active profile with CLI
    /// overrides.
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = cableflow_config::load_config()?;
        Self::from_config(&cfg, global)
    }

    pub fn from_config(cfg: &Config, global: &GlobalOpts) -> Result<Self, CliError> {
        let (profile_name, profile) = cfg.profile(global.profile.as_deref())?;
        let controller = resolve_controller(&profile, &cfg.defaults, global)?;

        Ok(Self {
            profile_name,
            controller,
            fixtures_dir: global
                .fixtures_dir
                .clone()
                .unwrap_or_else(|| cfg.defaults.fixtures_dir.clone()),
            extension: global
                .extension
                .clone()
                .unwrap_or_else(|| cfg.defaults.extension.clone()),
            format: resolve_format(global.output, &cfg.defaults.output)?,
            color: output::should_color(global.color),
            quiet: global.quiet,
            yes: global.yes,
        })
    }

    /// Scan the fixture directory.
    pub fn load_fixtures(&self) -> Result<FixtureStore, CliError> {
        Ok(FixtureStore::load(&self.fixtures_dir, &self.extension)?)
    }

    /// Scan the fixture directory, treating a missing one as empty.
    pub fn load_fixtures_or_empty(&self) -> FixtureStore {
        self.load_fixtures().unwrap_or_else(|err| {
            tracing::warn!(dir = %self.fixtures_dir.display(), "no fixtures loaded: {err}");
            FixtureStore::new()
        })
    }
}

/// Profile values, then CLI flags on top.
fn resolve_controller(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    let mut controller = cableflow_config::profile_to_controller_config(profile, defaults)?;

    if let Some(ref host) = global.host {
        cableflow_config::validate_host(host, global.port.unwrap_or(controller.port))?;
        controller.host.clone_from(host);
    }
    if let Some(port) = global.port {
        controller.port = port;
    }
    if let Some(secs) = global.timeout {
        controller.timeout = Some(Duration::from_secs(secs));
    }
    if let Some(node) = global.node {
        controller.node = node;
    }
    if let Some(table) = global.table {
        controller.table = table;
    }

    controller.auth = if global.no_auth {
        None
    } else {
        override_auth(controller.auth, global)
    };

    Ok(controller)
}

fn override_auth(
    auth: Option<AuthCredentials>,
    global: &GlobalOpts,
) -> Option<AuthCredentials> {
    if global.username.is_none() && global.password.is_none() {
        return auth;
    }
    let (username, password) = match auth {
        Some(a) => (a.username, a.password),
        None => (String::new(), SecretString::from(String::new())),
    };
    let username = global.username.clone().unwrap_or(username);
    if username.is_empty() {
        return None;
    }
    Some(AuthCredentials {
        username,
        password: global
            .password
            .clone()
            .map_or(password, SecretString::from),
    })
}

fn resolve_format(flag: Option<OutputFormat>, configured: &str) -> Result<OutputFormat, CliError> {
    if let Some(format) = flag {
        return Ok(format);
    }
    OutputFormat::from_str(configured, true).map_err(|_| CliError::Validation {
        field: "defaults.output".into(),
        reason: format!("expected table, json or json-compact, got '{configured}'"),
    })
}
