//! Process-wide configuration for the rotating ticket code core.
//!
//! The secret key and both intervals are loaded once at startup and handed
//! to [`crate::QrIssuer`]/[`crate::QrValidator`] constructors explicitly;
//! the codec never reads ambient state. Issuer and validator processes must
//! share one configuration source: if they disagree on the epoch interval,
//! every validation fails silently, which is why both intervals live on the
//! same struct and are checked together.

use crate::error::ConfigError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use std::time::Duration;

/// Symmetric key sealing and opening ticket tokens.
///
/// 256 bits, shared by every issuer and validator in the deployment.
/// Immutable for the process lifetime and safe for concurrent reads.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; Self::LEN]);

impl SecretKey {
    /// Key length in bytes (AES-256).
    pub const LEN: usize = 32;

    /// Creates a key from raw bytes
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Parses a key from standard base64, as stored in `GATEPASS_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SecretEncoding`] for invalid base64 and
    /// [`ConfigError::InvalidSecretLength`] when the decoded key is not
    /// exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_| ConfigError::SecretEncoding)?;
        let len = bytes.len();
        let bytes: [u8; Self::LEN] = bytes
            .try_into()
            .map_err(|_| ConfigError::InvalidSecretLength(len))?;
        Ok(Self(bytes))
    }

    /// Derives a key from a passphrase via SHA-256.
    ///
    /// Intended for development and demos; production deployments should
    /// generate 32 random bytes and distribute them via `GATEPASS_SECRET`.
    #[must_use]
    pub fn derive(passphrase: &str) -> Self {
        Self(Sha256::digest(passphrase.as_bytes()).into())
    }

    /// Returns the raw key material
    #[must_use]
    pub(crate) const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material must never reach logs.
        write!(f, "SecretKey(..)")
    }
}

/// Configuration shared by the issuing and validating sides.
#[derive(Clone, Debug)]
pub struct PassConfig {
    /// Symmetric key used to mint and open tokens
    pub secret: SecretKey,
    /// Width of one validity bucket (default 60 seconds)
    pub epoch_interval: Duration,
    /// Cadence at which the display surface re-mints (default 45 seconds);
    /// kept shorter than `epoch_interval` so a fresh code is always on
    /// screen before the previous epoch's code expires
    pub refresh_interval: Duration,
    /// Accept tokens from the immediately preceding epoch as well.
    ///
    /// Off by default, preserving the exact-equality check; turning it on is
    /// a deliberate widening for scanner clock skew and scans in flight
    /// across an epoch boundary.
    pub accept_previous_epoch: bool,
}

impl PassConfig {
    /// Default validity bucket width.
    pub const DEFAULT_EPOCH_INTERVAL: Duration = Duration::from_secs(60);
    /// Default display refresh cadence.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(45);

    /// Creates a configuration with default intervals and strict epoch
    /// matching
    #[must_use]
    pub const fn new(secret: SecretKey) -> Self {
        Self {
            secret,
            epoch_interval: Self::DEFAULT_EPOCH_INTERVAL,
            refresh_interval: Self::DEFAULT_REFRESH_INTERVAL,
            accept_previous_epoch: false,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// - `GATEPASS_SECRET`: required, base64-encoded 32-byte key
    /// - `GATEPASS_EPOCH_INTERVAL_MS`: optional, default 60000
    /// - `GATEPASS_REFRESH_INTERVAL_MS`: optional, default 45000
    /// - `GATEPASS_ACCEPT_PREVIOUS_EPOCH`: optional, default false
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the secret is missing or malformed,
    /// when an interval does not parse, or when the loaded values violate
    /// the interval invariants (see [`PassConfig::validate`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("GATEPASS_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        let config = Self {
            secret: SecretKey::from_base64(&secret)?,
            epoch_interval: interval_from_env(
                "GATEPASS_EPOCH_INTERVAL_MS",
                Self::DEFAULT_EPOCH_INTERVAL,
            )?,
            refresh_interval: interval_from_env(
                "GATEPASS_REFRESH_INTERVAL_MS",
                Self::DEFAULT_REFRESH_INTERVAL,
            )?,
            accept_previous_epoch: env::var("GATEPASS_ACCEPT_PREVIOUS_EPOCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the interval invariants: a non-zero epoch width and a refresh
    /// cadence strictly shorter than it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroEpochInterval`] or
    /// [`ConfigError::RefreshNotShorter`] accordingly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epoch_interval.is_zero() {
            return Err(ConfigError::ZeroEpochInterval);
        }
        if self.refresh_interval >= self.epoch_interval {
            return Err(ConfigError::RefreshNotShorter {
                refresh: self.refresh_interval,
                epoch: self.epoch_interval,
            });
        }
        Ok(())
    }
}

fn interval_from_env(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidInterval { name }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_satisfy_the_interval_invariants() {
        let config = PassConfig::new(SecretKey::from_bytes([7; 32]));
        config.validate().unwrap();
        assert_eq!(config.epoch_interval, Duration::from_secs(60));
        assert_eq!(config.refresh_interval, Duration::from_secs(45));
        assert!(!config.accept_previous_epoch);
    }

    #[test]
    fn refresh_must_be_shorter_than_epoch() {
        let mut config = PassConfig::new(SecretKey::from_bytes([7; 32]));
        config.refresh_interval = config.epoch_interval;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RefreshNotShorter { .. })
        ));
    }

    #[test]
    fn zero_epoch_interval_is_rejected() {
        let mut config = PassConfig::new(SecretKey::from_bytes([7; 32]));
        config.epoch_interval = Duration::ZERO;
        config.refresh_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroEpochInterval));
    }

    #[test]
    fn secret_round_trips_through_base64() {
        let encoded = STANDARD.encode([42u8; 32]);
        let key = SecretKey::from_base64(&encoded).unwrap();
        assert_eq!(key, SecretKey::from_bytes([42; 32]));
    }

    #[test]
    fn short_secret_is_rejected_with_its_length() {
        let encoded = STANDARD.encode([1u8; 16]);
        assert_eq!(
            SecretKey::from_base64(&encoded),
            Err(ConfigError::InvalidSecretLength(16))
        );
    }

    #[test]
    fn garbage_secret_is_an_encoding_error() {
        assert_eq!(
            SecretKey::from_base64("!!not base64!!"),
            Err(ConfigError::SecretEncoding)
        );
    }

    #[test]
    fn derive_is_deterministic_per_passphrase() {
        assert_eq!(SecretKey::derive("a"), SecretKey::derive("a"));
        assert_ne!(SecretKey::derive("a"), SecretKey::derive("b"));
    }

    #[test]
    fn debug_redacts_key_material() {
        let key = SecretKey::from_bytes([42; 32]);
        assert_eq!(format!("{key:?}"), "SecretKey(..)");
    }
}
