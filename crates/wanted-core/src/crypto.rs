//! Password-based AES-256-GCM payload encryption.
//!
//! The key is the SHA-256 digest of the password. Ciphertexts carry their
//! random 96-bit nonce as a prefix.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Size of the nonce prefix in bytes.
pub const NONCE_SIZE: usize = 12;

fn cipher_for(password: &str) -> Aes256Gcm {
    let digest = Sha256::digest(password.as_bytes());
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&digest))
}

/// Encrypt `plaintext`, returning `nonce || ciphertext`.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = cipher_for(password);
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CryptoError::Encrypt)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypt data produced by [`encrypt`].
pub fn decrypt(password: &str, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < NONCE_SIZE {
        return Err(CryptoError::Truncated(data.len()));
    }
    let (nonce, sealed) = data.split_at(NONCE_SIZE);
    cipher_for(password)
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::Authentication)
}
