//! Shared configuration for the cableflow CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `cableflow_core::ControllerConfig`. The CLI layers its global flags on
//! top of what is resolved here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cableflow_core::{AuthCredentials, ControllerConfig, DEFAULT_EXTENSION};

/// Prefix of environment variables merged over the config file.
pub const ENV_PREFIX: &str = "CABLEFLOW_";

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Config written by `config init`: one local profile with the
    /// controller's stock credentials.
    pub fn starter() -> Self {
        let mut cfg = Self::default();
        cfg.profiles.insert("default".into(), Profile::default());
        cfg
    }

    /// Look up a profile by name, or the default profile when `name` is
    /// `None`. A missing default profile falls back to built-in values.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
        let explicit = name.is_some();
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");

        match self.profiles.get(name) {
            Some(profile) => Ok((name.to_owned(), profile.clone())),
            None if explicit => Err(ConfigError::UnknownProfile {
                name: name.to_owned(),
            }),
            None => Ok((name.to_owned(), Profile::default())),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds. Unset waits indefinitely.
    pub timeout: Option<u64>,

    /// Directory scanned for fixture files.
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,

    /// Fixture file extension, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: None,
            fixtures_dir: default_fixtures_dir(),
            extension: default_extension(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_extension() -> String {
    DEFAULT_EXTENSION.into()
}

/// A named controller profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Send HTTP Basic auth. Off means no Authorization header at all.
    #[serde(default = "default_true")]
    pub auth: bool,

    pub username: Option<String>,

    /// Password (plaintext; prefer `password_env`).
    pub password: Option<String>,

    /// Environment variable holding the password.
    pub password_env: Option<String>,

    /// Override the default timeout, in seconds.
    pub timeout: Option<u64>,

    /// OpenFlow node whose table list/remove-all act on.
    #[serde(default = "default_node")]
    pub node: u64,

    #[serde(default)]
    pub table: u64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: true,
            username: Some(DEFAULT_USERNAME.into()),
            password: Some(DEFAULT_PASSWORD.into()),
            password_env: None,
            timeout: None,
            node: default_node(),
            table: 0,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    ControllerConfig::default().port
}
fn default_true() -> bool {
    true
}
fn default_node() -> u64 {
    1
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cableflow", "cableflow").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cableflow");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment. A missing file is not
/// an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the profile's password.
///
/// 1. the variable named by `password_env`, if set and present
/// 2. plaintext `password`
/// 3. the controller's stock password
pub fn resolve_password(profile: &Profile) -> SecretString {
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }

    if let Some(ref pw) = profile.password {
        return SecretString::from(pw.clone());
    }

    SecretString::from(DEFAULT_PASSWORD)
}

/// Resolve Basic-auth credentials, or `None` when the profile disables
/// auth or names an empty user.
pub fn resolve_auth(profile: &Profile) -> Option<AuthCredentials> {
    if !profile.auth {
        return None;
    }
    let username = profile
        .username
        .clone()
        .unwrap_or_else(|| DEFAULT_USERNAME.into());
    if username.is_empty() {
        return None;
    }
    Some(AuthCredentials {
        username,
        password: resolve_password(profile),
    })
}

/// Build a `ControllerConfig` from a profile with no CLI flag overrides.
pub fn profile_to_controller_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ControllerConfig, ConfigError> {
    validate_host(&profile.host, profile.port)?;

    Ok(ControllerConfig {
        host: profile.host.clone(),
        port: profile.port,
        auth: resolve_auth(profile),
        timeout: profile
            .timeout
            .or(defaults.timeout)
            .map(Duration::from_secs),
        node: profile.node,
        table: profile.table,
    })
}

/// Reject hosts that cannot form an `http://host:port/` URL.
pub fn validate_host(host: &str, port: u16) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Validation {
        field: "host".into(),
        reason,
    };
    if host.is_empty() {
        return Err(invalid("host is empty".into()));
    }
    let url: url::Url = format!("http://{host}:{port}/")
        .parse()
        .map_err(|e| invalid(format!("'{host}': {e}")))?;
    if url.host_str().is_none() || url.path() != "/" {
        return Err(invalid(format!("'{host}' is not a bare host name")));
    }
    Ok(())
}
