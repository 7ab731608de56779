//! Client error types.

use thiserror::Error;

/// Result type for gateway API operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the gateway API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be parsed into the expected model.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("encryption error: {0}")]
    Crypto(#[from] smsgate_crypto::CryptoError),
}
