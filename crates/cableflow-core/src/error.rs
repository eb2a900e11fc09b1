// ── Core error types ──
//
// User-facing errors from cableflow-core. Consumers never see reqwest or
// serde errors directly: the `From<cableflow_api::Error>` impl translates
// transport-layer failures into domain-appropriate variants.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Controller answers ───────────────────────────────────────────
    #[error("Controller returned a body that is not valid JSON: {message}")]
    MalformedResponse { message: String, body: String },

    // ── Records & fixtures ───────────────────────────────────────────
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Unknown fixture or record: {name}")]
    UnknownRecord { name: String },

    #[error("Cannot read fixtures under {path}: {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture '{name}' is not valid JSON: {source}")]
    FixtureJson {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<cableflow_api::Error> for CoreError {
    fn from(err: cableflow_api::Error) -> Self {
        match err {
            cableflow_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            cableflow_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            cableflow_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            cableflow_api::Error::PathNotSet => {
                CoreError::Internal("request issued without a resource path".into())
            }
            e @ cableflow_api::Error::Unauthorized { .. } => CoreError::AuthenticationFailed {
                message: e.to_string(),
            },
            cableflow_api::Error::InvalidRecord { message } => CoreError::InvalidRecord { message },
            cableflow_api::Error::Serialization(e) => CoreError::InvalidRecord {
                message: e.to_string(),
            },
            cableflow_api::Error::Deserialization { message, body } => {
                CoreError::MalformedResponse { message, body }
            }
        }
    }
}
