//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use cableflow_config::ConfigError;
use cableflow_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

/// Characters of an unreadable body kept for the diagnostic.
const BODY_PREVIEW: usize = 500;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(cableflow::connection_failed),
        help(
            "Check that the controller is running and its RESTCONF port is reachable.\n\
             URL: {url}\n\
             Try: cableflow --host <addr> --port 8181 topology"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(cableflow::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Controller rejected the credentials (HTTP 401)")]
    #[diagnostic(
        code(cableflow::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Override with --username / --password or CABLEFLOW_PASSWORD."
        )
    )]
    AuthFailed { profile: String },

    // ── Controller answers ───────────────────────────────────────────
    #[error("Controller returned an unreadable response: {message}")]
    #[diagnostic(
        code(cableflow::malformed_response),
        help("Start of the raw body:\n{body}")
    )]
    MalformedResponse { message: String, body: String },

    // ── Records & fixtures ───────────────────────────────────────────
    #[error("'{identifier}' is neither a fixture, a built-in record, nor a JSON file")]
    #[diagnostic(
        code(cableflow::not_found),
        help(
            "Run: cableflow fixtures list\n\
             Built-in records: cmts1, cmts2, flow1, flow2, flow3, flow4, flow5"
        )
    )]
    RecordNotFound { identifier: String },

    #[error("Invalid record: {message}")]
    #[diagnostic(
        code(cableflow::invalid_record),
        help("Flows need numeric `id` and `node.id` (e.g. \"openflow:1\"); CMTS nodes need `cmts-node.id`.")
    )]
    InvalidRecord { message: String },

    #[error("Cannot read fixtures under {path}")]
    #[diagnostic(
        code(cableflow::fixtures),
        help("Point --fixtures-dir at an existing directory.")
    )]
    Fixtures {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(cableflow::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(cableflow::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: cableflow config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(cableflow::config), help("Config file: {path}"))]
    Config { message: String, path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(cableflow::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(cableflow::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(cableflow::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Name the profile whose credentials the controller rejected.
    #[must_use]
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { .. } => Self::AuthFailed {
                profile: name.to_owned(),
            },
            other => other,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::RecordNotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::AuthenticationFailed { message } => {
                tracing::debug!(%message, "authentication failed");
                CliError::AuthFailed {
                    profile: String::new(),
                }
            }
            CoreError::MalformedResponse { message, body } => CliError::MalformedResponse {
                message,
                body: body.chars().take(BODY_PREVIEW).collect(),
            },
            CoreError::InvalidRecord { message } => CliError::InvalidRecord { message },
            CoreError::UnknownRecord { name } => CliError::RecordNotFound { identifier: name },
            CoreError::FixtureIo { path, source } => CliError::Fixtures {
                path: path.display().to_string(),
                source,
            },
            CoreError::FixtureJson { name, source } => CliError::InvalidRecord {
                message: format!("fixture '{name}': {source}"),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "controller".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => {
                let cfg = cableflow_config::load_config_or_default();
                let mut available: Vec<String> = cfg.profiles.into_keys().collect();
                available.sort();
                CliError::ProfileNotFound {
                    name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                }
            }
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
                path: cableflow_config::config_path().display().to_string(),
            },
        }
    }
}
