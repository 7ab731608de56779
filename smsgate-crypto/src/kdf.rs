//! Key derivation from a user passphrase.
//!
//! PBKDF2 with HMAC-SHA1 as the PRF. SHA-1 here is strictly a KDF
//! primitive required for wire compatibility with existing gateway
//! clients, not an integrity mechanism; swapping it for a newer hash
//! would break interop with every deployed ciphertext.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Salt length in bytes for newly encrypted values. Decryption accepts
/// whatever length the encoded value carries.
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count for newly encrypted values.
pub const DEFAULT_ITERATIONS: u32 = 75_000;

/// A derived symmetric key. Zeroed on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derives the scheme's 32-byte symmetric key from a passphrase and salt.
///
/// Deterministic: the same inputs always produce the same key. The
/// iteration count embedded in a received value is honored exactly,
/// however small or large.
pub fn derive_key(passphrase: &str, salt: &[u8], iterations: u32) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    derive_key_material(passphrase, salt, iterations, &mut key);
    DerivedKey(key)
}

/// Fills `out` with PBKDF2-HMAC-SHA1 key material of arbitrary length.
pub fn derive_key_material(passphrase: &str, salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), salt, iterations, out);
}
