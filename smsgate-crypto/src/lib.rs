//! Field-level encryption for the SMS Gateway client.
//!
//! Implements the gateway's symmetric end-to-end encryption scheme:
//!
//! - PBKDF2-HMAC-SHA1 key derivation from a user passphrase
//! - AES-256-CBC encryption of individual field values
//! - A self-describing wire format carrying the algorithm identifier,
//!   iteration count and salt alongside the ciphertext
//!
//! # Wire format
//!
//! ```text
//! $aes-256-cbc/pbkdf2-sha1$i=75000$<base64(salt)>$<base64(ciphertext)>
//! ```
//!
//! A fresh 16-byte random salt is generated for every encrypted value and
//! doubles as the AES-CBC initialization vector. Because all parameters
//! travel with the ciphertext, decryption needs nothing beyond the
//! passphrase — values encrypted with any iteration count by any compatible
//! client decrypt transparently.
//!
//! # Example
//!
//! ```
//! use smsgate_crypto::Encryptor;
//!
//! let encryptor = Encryptor::new("passphrase")?;
//! let encoded = encryptor.encrypt("+79990001122")?;
//! assert_eq!(encryptor.decrypt(&encoded)?, "+79990001122");
//! # Ok::<(), smsgate_crypto::CryptoError>(())
//! ```

mod cipher;
mod encryptor;
mod error;
mod format;
mod kdf;

pub use cipher::{open, seal};
pub use encryptor::Encryptor;
pub use error::{CryptoError, CryptoResult};
pub use format::{Algorithm, EncodedValue};
pub use kdf::{
    derive_key, derive_key_material, DerivedKey, DEFAULT_ITERATIONS, KEY_SIZE, SALT_SIZE,
};
