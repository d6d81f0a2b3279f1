//! Google sign-in configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying Google-issued ID tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client ID; verified tokens must carry this audience.
    #[serde(default)]
    pub client_id: String,
    /// URL of Google's JWKS document.
    #[serde(default = "default_certs_url")]
    pub certs_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            certs_url: default_certs_url(),
        }
    }
}

fn default_certs_url() -> String {
    "https://www.googleapis.com/oauth2/v3/certs".to_string()
}
