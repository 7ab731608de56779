//! Self-describing wire format for encrypted field values.
//!
//! An encoded value is a single string of exactly five `$`-delimited
//! fields:
//!
//! ```text
//! $aes-256-cbc/pbkdf2-sha1$i=<iterations>$<base64(salt)>$<base64(ciphertext)>
//! ```
//!
//! Parsing is deliberately strict. The format carries no checksum or
//! version byte, so rejecting anything that is not exactly this shape is
//! the scheme's only defense against foreign or corrupted inputs.
//! Supporting another scheme means adding an [`Algorithm`] variant with its
//! own literal, never loosening the parser.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{CryptoError, CryptoResult};

/// Cipher + KDF combination identifier.
///
/// A closed set with one member today. The wire literal doubles as the
/// dispatch key for any scheme added later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// AES-256-CBC with a PBKDF2-HMAC-SHA1 derived key.
    Aes256CbcPbkdf2Sha1,
}

impl Algorithm {
    /// Wire identifier for this algorithm.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aes256CbcPbkdf2Sha1 => "aes-256-cbc/pbkdf2-sha1",
        }
    }

    fn from_wire(s: &str) -> CryptoResult<Self> {
        match s {
            "aes-256-cbc/pbkdf2-sha1" => Ok(Self::Aes256CbcPbkdf2Sha1),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A parsed encrypted field value.
///
/// [`encode`](Self::encode) of a parsed value reproduces the parameters
/// and ciphertext byte for byte, so round-tripping never alters a value
/// produced by another client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedValue {
    pub algorithm: Algorithm,
    /// `key=value` parameters in wire order. Always contains `i`.
    pub params: Vec<(String, String)>,
    pub salt: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl EncodedValue {
    /// Builds a value for encryption with the minimal parameter set.
    pub fn new(algorithm: Algorithm, iterations: u32, salt: Vec<u8>, ciphertext: Vec<u8>) -> Self {
        Self {
            algorithm,
            params: vec![("i".to_string(), iterations.to_string())],
            salt,
            ciphertext,
        }
    }

    /// Iteration count embedded in the value.
    ///
    /// Guaranteed present and numeric on anything returned by
    /// [`EncodedValue::parse`].
    pub fn iterations(&self) -> CryptoResult<u32> {
        let raw = self
            .params
            .iter()
            .find(|(key, _)| key == "i")
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| CryptoError::Format("missing iteration count parameter".to_string()))?;
        raw.parse()
            .map_err(|_| CryptoError::Format(format!("non-numeric iteration count: {raw}")))
    }

    /// Renders the five-field wire string.
    pub fn encode(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "${}${}${}${}",
            self.algorithm.as_str(),
            params,
            BASE64.encode(&self.salt),
            BASE64.encode(&self.ciphertext),
        )
    }

    /// Parses a wire string, rejecting everything that is not exactly the
    /// supported shape.
    pub fn parse(input: &str) -> CryptoResult<Self> {
        let fields: Vec<&str> = input.split('$').collect();
        if fields.len() != 5 {
            return Err(CryptoError::Format(format!(
                "expected 5 '$'-delimited fields, got {}",
                fields.len()
            )));
        }
        if !fields[0].is_empty() {
            return Err(CryptoError::Format(
                "encoded value must start with '$'".to_string(),
            ));
        }

        let algorithm = Algorithm::from_wire(fields[1])?;
        let params = parse_params(fields[2])?;

        let salt = BASE64
            .decode(fields[3])
            .map_err(|e| CryptoError::Format(format!("invalid salt encoding: {e}")))?;
        let ciphertext = BASE64
            .decode(fields[4])
            .map_err(|e| CryptoError::Format(format!("invalid ciphertext encoding: {e}")))?;

        let value = Self {
            algorithm,
            params,
            salt,
            ciphertext,
        };
        // Validate the required parameter up front rather than at
        // key-derivation time.
        value.iterations()?;
        Ok(value)
    }
}

fn parse_params(raw: &str) -> CryptoResult<Vec<(String, String)>> {
    raw.split(',')
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| CryptoError::Format(format!("malformed parameter: {pair}")))
        })
        .collect()
}
