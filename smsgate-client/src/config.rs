//! Client configuration and credentials.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{ClientError, ClientResult};

/// Base URL of the hosted gateway API.
pub const DEFAULT_URL: &str = "https://api.sms-gate.app/3rdparty/v1";

/// Credentials for the gateway API.
#[derive(Clone)]
pub enum Credentials {
    /// Account login and password, sent as HTTP Basic auth.
    Basic { login: String, password: String },
    /// Pre-issued access token, sent as a Bearer header.
    Token(String),
}

impl Credentials {
    /// Renders the `Authorization` header value, failing on empty
    /// credentials.
    pub(crate) fn header_value(&self) -> ClientResult<String> {
        match self {
            Self::Basic { login, password } => {
                if login.is_empty() || password.is_empty() {
                    return Err(ClientError::Config("missing credentials".to_string()));
                }
                Ok(format!(
                    "Basic {}",
                    BASE64.encode(format!("{login}:{password}"))
                ))
            }
            Self::Token(token) => {
                if token.is_empty() {
                    return Err(ClientError::Config("missing credentials".to_string()));
                }
                Ok(format!("Bearer {token}"))
            }
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .finish_non_exhaustive(),
            Self::Token(_) => f.write_str("Token(..)"),
        }
    }
}

/// Configuration for [`GatewayClient`](crate::client::GatewayClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL for the gateway API, without a trailing slash.
    pub base_url: String,
    /// API credentials.
    pub credentials: Credentials,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a config pointing at the hosted gateway.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            credentials,
            timeout_secs: 30,
        }
    }

    /// Points the client at a self-hosted or test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
