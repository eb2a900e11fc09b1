use secrecy::{ExposeSecret, SecretString};

/// HTTP Basic credentials for the controller's northbound API.
///
/// The password is held as a [`SecretString`] so it never lands in
/// `Debug` output or logs. The wire form (`Basic base64(user:password)`)
/// is produced by `reqwest` when the request is built.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    username: String,
    password: SecretString,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Credentials with an empty username are treated as absent.
    pub fn is_usable(&self) -> bool {
        !self.username.is_empty()
    }
}
