// Transport configuration for building the reqwest::Client behind RestClient.
//
// Every call opens its own connection: idle pooling is disabled so one
// round trip maps to one TCP connection, the way the harness is meant to
// exercise the controller.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("cableflow/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Per-request timeout. `None` blocks until the controller answers
    /// or the socket faults.
    pub timeout: Option<Duration>,
}

impl TransportConfig {
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(Error::Transport)
    }

    /// Timeout in whole seconds, for error reporting.
    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout.map_or(0, |t| t.as_secs())
    }
}
