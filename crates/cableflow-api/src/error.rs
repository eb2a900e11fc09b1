use thiserror::Error;

/// Top-level error type for the `cableflow-api` crate.
///
/// HTTP error statuses are *not* represented here: the controller's answer
/// is returned to the caller as a [`RestResponse`](crate::RestResponse) and
/// explained through the response-code tables. Only failures that prevent
/// a round trip from completing, or a body from being understood, surface
/// as errors. `cableflow-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// A call was issued before any resource path was set.
    #[error("No resource path set on the REST client")]
    PathNotSet,

    /// The controller refused the credentials on a read.
    #[error("Controller rejected the credentials for {path}")]
    Unauthorized { path: String },

    // ── Records ─────────────────────────────────────────────────────
    /// A flow or CMTS record lacks the identifiers needed to build its path.
    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the controller could not be reached at all.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    pub(crate) fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}
