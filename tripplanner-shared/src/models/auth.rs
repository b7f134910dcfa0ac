//! Credentials and tokens exchanged with `/token` and `/register`.

use serde::{Deserialize, Serialize};

/// Username/password pair sent form-encoded to `/token` and `/register`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// The account name.
    pub username: String,

    /// The account password, sent as-is.
    pub password: String,
}

impl Credentials {
    /// Pairs a username with its password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Form fields in the order the backend's password form expects them.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}

// Keeps passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response from a successful `/token` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// The bearer token for subsequent authorized requests.
    pub access_token: String,

    /// Token scheme, `bearer` when present.
    #[serde(default)]
    pub token_type: Option<String>,
}
