//! # Gatepass Testing
//!
//! Test support for the gatepass crates: a manually-driven clock for
//! walking tokens across epoch boundaries, a fixed configuration, a token
//! corruption helper, and a failure-injecting token source for exercising
//! the display surface's error path.
//!
//! Consumed as a dev-dependency; nothing here belongs in production code.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use gatepass_core::clock::Clock;
use gatepass_core::config::{PassConfig, SecretKey};
use gatepass_core::error::MintError;
use gatepass_core::issuer::TokenSource;
use gatepass_core::store::{BookingStore, BookingStoreError};
use gatepass_core::types::{BookingId, TicketType};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Manually-driven clock for deterministic epoch tests.
///
/// Starts at a fixed instant and only moves when told to, so a test can
/// mint a token, step the clock to one millisecond before the epoch
/// boundary, then across it, and observe both outcomes.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a clock frozen at the given Unix-epoch millisecond.
    ///
    /// Out-of-range values clamp to the Unix epoch; tests pass small
    /// positive offsets.
    #[must_use]
    pub fn starting_at_millis(ms: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(ms).unwrap_or_default())
    }

    /// Jumps the clock to an absolute instant
    pub fn set(&self, to: DateTime<Utc>) {
        *self.lock() = to;
    }

    /// Moves the clock forward (or backward, with a negative duration)
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.lock();
        *now = *now + by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

/// A fixed configuration for tests: constant key, default intervals,
/// strict epoch matching
#[must_use]
pub fn test_config() -> PassConfig {
    PassConfig::new(SecretKey::from_bytes([7; 32]))
}

/// Replaces the character at `index` with a different URL-safe base64
/// character, for tamper-rejection tests.
///
/// Indices past the end of the token leave it unchanged.
#[must_use]
pub fn corrupt_char(token: &str, index: usize) -> String {
    token
        .char_indices()
        .map(|(i, c)| {
            if i == index {
                if c == 'A' { 'B' } else { 'A' }
            } else {
                c
            }
        })
        .collect()
}

/// Token source that fails its first `fail_first` mints, then succeeds with
/// synthetic tokens.
///
/// Lets display-surface tests drive the "unable to display ticket" state
/// and the recovery on the next tick without needing encryption to fail.
pub struct FlakySource {
    fail_first: usize,
    calls: AtomicUsize,
}

impl FlakySource {
    /// Creates a source whose first `fail_first` mints fail
    #[must_use]
    pub const fn new(fail_first: usize) -> Self {
        Self {
            fail_first,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of mint calls observed so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenSource for FlakySource {
    fn mint(&self, booking_id: &BookingId, _ticket_type: &TicketType) -> Result<String, MintError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_first {
            Err(MintError::Encrypt)
        } else {
            Ok(format!("{booking_id}-token-{n}"))
        }
    }
}

/// Booking store mock that records consumption calls.
///
/// Stands in for the booking subsystem so gate-flow tests can assert that
/// an accepted scan leads to exactly the `mark_ticket_used` calls the
/// surface intended.
#[derive(Default)]
pub struct RecordingBookingStore {
    used: Mutex<Vec<BookingId>>,
}

impl RecordingBookingStore {
    /// Creates an empty recording store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookings marked used so far, in call order
    #[must_use]
    pub fn used(&self) -> Vec<BookingId> {
        self.used
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl BookingStore for RecordingBookingStore {
    fn mark_ticket_used(
        &self,
        booking_id: &BookingId,
    ) -> impl std::future::Future<Output = Result<(), BookingStoreError>> + Send {
        self.used
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(booking_id.clone());
        std::future::ready(Ok(()))
    }
}
