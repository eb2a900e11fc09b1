// ── Runtime connection configuration ──
//
// These types describe *how* to reach the controller and which flow table
// the harness works on. They carry credential data but never touch disk.
// The CLI constructs a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use cableflow_api::RESTCONF_PORT;

/// Username/password pair for HTTP Basic auth.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Complete connection and target configuration for one harness session.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub host: String,
    pub port: u16,
    /// `None` sends no Authorization header.
    pub auth: Option<AuthCredentials>,
    /// `None` waits on the controller indefinitely.
    pub timeout: Option<Duration>,
    /// Node whose flow table "list flows" and "remove all flows" act on.
    pub node: u64,
    /// Flow table on that node.
    pub table: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: RESTCONF_PORT,
            auth: Some(AuthCredentials {
                username: "admin".into(),
                password: SecretString::from("admin"),
            }),
            timeout: None,
            node: 1,
            table: 0,
        }
    }
}
