// REST call wrapper
//
// Wraps `reqwest::Client` with the harness's connection profile: a target
// host and port, the resource path of the next call, and optional Basic
// credentials. One call is one blocking-style round trip; the caller gets
// the status code, reason phrase and raw body back as plain values and
// decides what a non-2xx status means.

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::Url;

use crate::auth::BasicCredentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Default controller port for a freshly created client.
pub const DEFAULT_PORT: u16 = 8080;

/// Default content type subtype (`application/json`).
pub const JSON: &str = "json";

// ── Connection profile ───────────────────────────────────────────────

/// Where and as whom the next call is made.
///
/// The facade overwrites `path` before each call. A call issued while `path` is unset fails with
/// [`Error::PathNotSet`].
#[derive(Debug, Clone)]
pub struct ConnectionProfile {
    pub host: String,
    pub port: u16,
    pub path: Option<String>,
    pub credentials: Option<BasicCredentials>,
}

impl ConnectionProfile {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            path: None,
            credentials: None,
        }
    }

    /// Full URL of the current path: `http://{host}:{port}{path}`.
    pub fn url(&self) -> Result<Url, Error> {
        let path = self.path.as_deref().ok_or(Error::PathNotSet)?;
        let sep = if path.starts_with('/') { "" } else { "/" };
        let full = format!("http://{}:{}{sep}{path}", self.host, self.port);
        Ok(Url::parse(&full)?)
    }
}

// ── Response tuple ───────────────────────────────────────────────────

/// Status, reason phrase and raw body of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    /// Canonical reason phrase for `status` (`"Not Found"` for 404), not
    /// the phrase the server wrote on the status line. Empty for codes
    /// without one.
    pub reason: String,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, Error> {
        serde_json::from_str(&self.body).map_err(|e| {
            let preview: String = self.body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: self.body.clone(),
            }
        })
    }

    /// Parse the body as JSON, treating an empty body as `null`.
    pub fn json_or_null(&self) -> Result<Value, Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        self.json()
    }
}

// ── RestClient ───────────────────────────────────────────────────────

/// Minimal REST client for the controller's northbound API.
pub struct RestClient {
    http: reqwest::Client,
    transport: TransportConfig,
    profile: ConnectionProfile,
}

impl RestClient {
    /// Create a client for `host` with the default transport (no timeout).
    pub fn new(host: impl Into<String>) -> Result<Self, Error> {
        Self::with_transport(host, &TransportConfig::default())
    }

    /// Create a client for `host` from a `TransportConfig`.
    pub fn with_transport(
        host: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            transport: transport.clone(),
            profile: ConnectionProfile::new(host),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, profile: ConnectionProfile) -> Self {
        Self {
            http,
            transport: TransportConfig::default(),
            profile,
        }
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }

    pub fn server(&self) -> &str {
        &self.profile.host
    }

    pub fn set_server(&mut self, host: impl Into<String>) {
        self.profile.host = host.into();
    }

    pub fn port(&self) -> u16 {
        self.profile.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.profile.port = port;
    }

    pub fn path(&self) -> Option<&str> {
        self.profile.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.profile.path = Some(path.into());
    }

    /// Use HTTP Basic auth on every subsequent call.
    pub fn credentials(&mut self, username: impl Into<String>, password: SecretString) {
        self.profile.credentials = Some(BasicCredentials::new(username, password));
    }

    pub fn clear_credentials(&mut self) {
        self.profile.credentials = None;
    }

    /// True when a usable username/password pair was supplied.
    pub fn uses_credentials(&self) -> bool {
        self.profile
            .credentials
            .as_ref()
            .is_some_and(BasicCredentials::is_usable)
    }

    // ── Verbs ────────────────────────────────────────────────────────

    pub async fn get(&self) -> Result<RestResponse, Error> {
        self.rest_call(Method::GET, None, JSON).await
    }

    pub async fn put(&self, data: &Value) -> Result<RestResponse, Error> {
        self.rest_call(Method::PUT, Some(data), JSON).await
    }

    pub async fn post(&self, data: &Value) -> Result<RestResponse, Error> {
        self.rest_call(Method::POST, Some(data), JSON).await
    }

    pub async fn remove(&self) -> Result<RestResponse, Error> {
        self.rest_call(Method::DELETE, None, JSON).await
    }

    /// Issue exactly one request against the current path.
    ///
    /// `Content-Type` and `Accept` are `application/{content_type}`. The
    /// `Authorization` header is sent only when credentials are set. Any
    /// status code is returned as-is; only transport failures are errors.
    pub async fn rest_call(
        &self,
        method: Method,
        payload: Option<&Value>,
        content_type: &str,
    ) -> Result<RestResponse, Error> {
        let url = self.profile.url()?;
        debug!(%method, %url, "rest call");

        let mime = format!("application/{content_type}");
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, &mime)
            .header(ACCEPT, &mime);

        if let Some(creds) = self.profile.credentials.as_ref().filter(|c| c.is_usable()) {
            builder = builder.basic_auth(creds.username(), Some(creds.password()));
        }

        if let Some(data) = payload {
            let body = serde_json::to_vec(data)?;
            trace!(bytes = body.len(), "request body");
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or_default().to_owned();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = status.as_u16(), %reason, "rest reply");

        Ok(RestResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.transport.timeout_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────────

/// Pretty-print a JSON value with keys sorted at every level.
pub fn show(data: &Value) -> String {
    serde_json::to_string_pretty(&sorted(data)).unwrap_or_else(|_| data.to_string())
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn url_requires_a_path() {
        let profile = ConnectionProfile::new("127.0.0.1");
        assert!(matches!(profile.url(), Err(Error::PathNotSet)));
    }

    #[test]
    fn url_joins_host_port_and_path() {
        let mut profile = ConnectionProfile::new("10.0.0.5");
        profile.port = 8181;
        profile.path = Some("/restconf/operational/opendaylight-inventory:nodes".into());
        let url = profile.url().unwrap();
        assert_eq!(
            url.as_str(),
            "http://10.0.0.5:8181/restconf/operational/opendaylight-inventory:nodes"
        );

        profile.path = Some("restconf".into());
        assert_eq!(profile.url().unwrap().path(), "/restconf");
    }

    #[test]
    fn show_sorts_keys() {
        let out = show(&json!({ "b": 1, "a": { "z": true, "c": null } }));
        let a = out.find("\"a\"").unwrap();
        let b = out.find("\"b\"").unwrap();
        let c = out.find("\"c\"").unwrap();
        let z = out.find("\"z\"").unwrap();
        assert!(a < b);
        assert!(c < z);
    }

    #[test]
    fn empty_body_is_null() {
        let resp = RestResponse {
            status: 204,
            reason: "No Content".into(),
            body: String::new(),
        };
        assert_eq!(resp.json_or_null().unwrap(), Value::Null);
        assert!(resp.is_success());
        assert!(matches!(resp.json(), Err(Error::Deserialization { .. })));
    }
}
