//! Error types for minting, validating, and configuring rotating ticket codes.

use std::time::Duration;
use thiserror::Error;

/// Failure modes when opening a presented token string.
///
/// Every variant is local and recoverable: the scanner-side validator maps
/// all of them to a plain reject, and nothing here ever crosses the
/// validation boundary as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The string is not valid URL-safe base64.
    #[error("token is not valid base64")]
    Encoding,

    /// The decoded bytes are too short to carry a nonce.
    #[error("token is too short to carry a nonce")]
    Truncated,

    /// Authenticated decryption rejected the ciphertext.
    ///
    /// Covers both a foreign key and a tampered token; the two are
    /// deliberately not distinguished.
    #[error("ciphertext rejected")]
    Cipher,

    /// The decrypted bytes are not a well-formed token payload.
    #[error("payload is not a valid ticket token")]
    Malformed,
}

impl DecodeError {
    /// Returns `true` if the cipher itself rejected the input (wrong key or
    /// tampering), as opposed to a structurally broken string.
    #[must_use]
    pub const fn is_cipher_rejection(&self) -> bool {
        matches!(self, Self::Cipher)
    }
}

/// Failure modes when minting a fresh token.
///
/// Rare, and surfaced to the display surface so it can show a retry/error
/// state instead of silently keeping a stale or blank code on screen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MintError {
    /// Serializing the token payload failed.
    #[error("failed to serialize token payload: {0}")]
    Serialize(String),

    /// Encrypting the serialized payload failed.
    #[error("encryption failed")]
    Encrypt,
}

/// Startup-time configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The secret key environment variable is not set.
    ///
    /// There is no production default; a missing secret is a hard startup
    /// failure.
    #[error("GATEPASS_SECRET is not set")]
    MissingSecret,

    /// The secret key is not valid base64.
    #[error("secret key is not valid base64")]
    SecretEncoding,

    /// The secret key decoded to the wrong number of bytes.
    #[error("secret key must be exactly 32 bytes ({0} provided)")]
    InvalidSecretLength(usize),

    /// An interval environment variable did not parse as milliseconds.
    #[error("{name} is not a valid duration in milliseconds")]
    InvalidInterval {
        /// Environment variable that failed to parse
        name: &'static str,
    },

    /// The epoch interval is zero.
    #[error("epoch interval must be non-zero")]
    ZeroEpochInterval,

    /// The refresh cadence is not shorter than the epoch width.
    ///
    /// The display must always have a fresh code on screen before the
    /// previous epoch's code expires, so `refresh < epoch` is an invariant.
    #[error("refresh interval ({refresh:?}) must be shorter than the epoch interval ({epoch:?})")]
    RefreshNotShorter {
        /// Configured refresh cadence
        refresh: Duration,
        /// Configured epoch width
        epoch: Duration,
    },
}
