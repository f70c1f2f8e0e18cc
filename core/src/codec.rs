//! Reversible, keyed transformation between a token payload and the opaque
//! string embedded in a QR code.
//!
//! Tokens are sealed with AES-256-GCM: confidentiality and integrity both
//! come from the one authenticated construction, so a flipped character or a
//! foreign key is rejected by the cipher itself rather than by accident of
//! a parser downstream. The sealed bytes are laid out as
//! `[nonce (12 bytes)][ciphertext]` and carried as URL-safe unpadded base64,
//! which survives QR encoding and manual copy-paste without escaping.

use crate::config::SecretKey;
use crate::error::{DecodeError, MintError};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// Seals token payloads into opaque strings and opens them again.
///
/// Pure and synchronous; every call pays only CPU. The cipher sits behind an
/// `Arc` so issuer, validator, and any number of display tasks can share one
/// codec; each seal generates a fresh nonce, so concurrent use carries no
/// reuse risk.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: Arc<Aes256Gcm>,
}

impl TokenCodec {
    /// Creates a codec for the given symmetric key
    #[must_use]
    pub fn new(secret: &SecretKey) -> Self {
        let key: Key<Aes256Gcm> = (*secret.as_bytes()).into();
        Self {
            cipher: Arc::new(Aes256Gcm::new(&key)),
        }
    }

    /// Seals a payload into an opaque, QR-safe string.
    ///
    /// The payload is serialized to JSON (struct field order is stable, so
    /// decoding is deterministic) and encrypted under a fresh random nonce.
    /// Two seals of the same payload therefore produce different strings,
    /// and both open to the same payload.
    ///
    /// # Errors
    ///
    /// Returns [`MintError`] if serialization or encryption fails.
    pub fn encode<T: Serialize>(&self, payload: &T) -> Result<String, MintError> {
        let plaintext =
            serde_json::to_vec(payload).map_err(|e| MintError::Serialize(e.to_string()))?;
        self.seal(&plaintext)
    }

    /// Opens an opaque string back into its payload.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the string is not valid base64, too
    /// short to carry a nonce, rejected by authenticated decryption
    /// (corrupted, forged, or sealed under a different key), or decrypts to
    /// bytes that are not a valid payload. Never panics: garbage input from
    /// a scanner is an expected case, not an exceptional one.
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, DecodeError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| DecodeError::Encoding)?;
        if sealed.len() < NONCE_LEN {
            return Err(DecodeError::Truncated);
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::clone_from_slice(nonce_bytes);
        let plaintext = self
            .cipher
            .decrypt(&nonce, ciphertext)
            .map_err(|_| DecodeError::Cipher)?;
        serde_json::from_slice(&plaintext).map_err(|_| DecodeError::Malformed)
    }

    /// Encrypts `input` under the codec key and truncates the encoding to
    /// `len` characters.
    ///
    /// Used for the token's nonce fragment: a short keyed value that keeps
    /// two codes minted for one booking in one epoch distinguishable. The
    /// fragment is not reversible after truncation and is never validated.
    ///
    /// # Errors
    ///
    /// Returns [`MintError::Encrypt`] if encryption fails.
    pub fn fragment(&self, input: &str, len: usize) -> Result<String, MintError> {
        let encoded = self.seal(input.as_bytes())?;
        Ok(encoded.chars().take(len).collect())
    }

    /// Encrypts plaintext under a fresh nonce and base64-encodes the result.
    fn seal(&self, plaintext: &[u8]) -> Result<String, MintError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| MintError::Encrypt)?;

        // Layout: [nonce (12 bytes)][ciphertext]
        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(&sealed))
    }
}
