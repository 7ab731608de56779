//! Error types for the field-encryption subsystem.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while encrypting or decrypting field values.
///
/// None of these are transient: a failed operation will fail the same way
/// on retry, so callers should surface them rather than loop.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The encoded value names an algorithm this client does not implement.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The encoded value does not match the expected wire shape.
    #[error("malformed encoded value: {0}")]
    Format(String),

    /// Cipher-level failure. The dominant real-world cause is a wrong
    /// passphrase; corrupted ciphertext looks identical.
    #[error("decryption failed (wrong passphrase or corrupted data)")]
    Decryption,

    /// Missing or empty passphrase at construction time.
    #[error("invalid encryption configuration: {0}")]
    Config(String),
}
