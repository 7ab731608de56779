//! AES-256-CBC encryption of single field values.
//!
//! CBC with PKCS#7 padding and no authentication tag: the wire format
//! predates authenticated modes, so a wrong passphrase surfaces as a
//! padding failure in [`open`] rather than a tag mismatch. Tampering short
//! of breaking the padding is undetectable at this layer.
//!
//! The IV is the same 16-byte random value used as the key-derivation
//! salt. That reuse is part of the deployed wire format and must not be
//! changed unilaterally.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Encrypts one plaintext value. No key material is retained between calls.
pub fn seal(plaintext: &[u8], key: &DerivedKey, iv: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CryptoError::Format("invalid initialization vector length".to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypts one ciphertext value.
///
/// Fails when the input is not a whole number of cipher blocks or the
/// padding does not verify after decryption — the only signal available
/// for detecting a wrong passphrase.
pub fn open(ciphertext: &[u8], key: &DerivedKey, iv: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CryptoError::Format("invalid initialization vector length".to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decryption)
}
