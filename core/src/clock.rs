//! Wall-clock abstraction and rotation-epoch derivation.
//!
//! Issuer and validator run in different processes (often different
//! devices) coordinated only by wall-clock time and the shared secret, so
//! both consume time through the same [`Clock`] trait and the same
//! [`RotationClock`] bucketing.

use crate::types::Epoch;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Clock trait - abstracts time operations for testability
///
/// Production code injects [`SystemClock`]; tests inject a manually
/// advanced clock to walk tokens across epoch boundaries deterministically.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Maps wall-clock time onto coarse rotation buckets.
///
/// Pure apart from reading the injected clock; no side effects, no I/O.
#[derive(Clone)]
pub struct RotationClock {
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl RotationClock {
    /// Creates a rotation clock with the given bucket width
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self { clock, interval }
    }

    /// Returns the epoch containing the current instant
    #[must_use]
    pub fn current_epoch(&self) -> Epoch {
        Epoch::at(self.clock.now(), self.interval)
    }

    /// Returns the configured bucket width
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
