//! Per-scan state machine for the scanner surface.
//!
//! A venue scanner shows one decision at a time: it reads a code, displays
//! accept/reject feedback for a short lockout, then resumes scanning.
//! [`ScanSession`] models that loop so the camera callback stays a single
//! `submit` call.

use crate::clock::Clock;
use crate::validator::QrValidator;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Binary scan decision shown to gate staff.
///
/// No diagnostic detail crosses this boundary: an attacker probing the
/// scanner learns nothing beyond accept/reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The code decoded and is valid for the current epoch
    Accepted,
    /// Anything else: stale, forged, foreign-key, or garbage input
    Rejected,
}

impl ScanOutcome {
    /// Returns `true` for an accepted scan
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Session state: either waiting for a code or showing a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// Camera feed active, next submitted code will be decided
    Scanning,
    /// A decision is on screen until the lockout elapses
    Decided {
        /// The decision being shown
        outcome: ScanOutcome,
        /// When it was made
        at: DateTime<Utc>,
    },
}

/// One scanner device's scan/feedback loop.
///
/// Decisions are not persisted and do not affect later scans; the lockout
/// only keeps a rapid camera feed from re-deciding the same frame while
/// feedback is on screen.
pub struct ScanSession {
    validator: QrValidator,
    clock: Arc<dyn Clock>,
    lockout: Duration,
    state: ScanState,
}

impl ScanSession {
    /// How long a decision stays on screen before scanning resumes.
    pub const DEFAULT_LOCKOUT: Duration = Duration::from_secs(3);

    /// Creates a session with the default lockout
    #[must_use]
    pub fn new(validator: QrValidator, clock: Arc<dyn Clock>) -> Self {
        Self {
            validator,
            clock,
            lockout: Self::DEFAULT_LOCKOUT,
            state: ScanState::Scanning,
        }
    }

    /// Overrides the feedback lockout
    #[must_use]
    pub fn with_lockout(mut self, lockout: Duration) -> Self {
        self.lockout = lockout;
        self
    }

    /// Submits a decoded QR string.
    ///
    /// Returns the decision, or `None` when a previous decision is still on
    /// screen (input is ignored during the lockout).
    pub fn submit(&mut self, raw: &str) -> Option<ScanOutcome> {
        self.release_if_elapsed();
        if matches!(self.state, ScanState::Decided { .. }) {
            return None;
        }
        let outcome = if self.validator.validate(raw) {
            ScanOutcome::Accepted
        } else {
            ScanOutcome::Rejected
        };
        self.state = ScanState::Decided {
            outcome,
            at: self.clock.now(),
        };
        Some(outcome)
    }

    /// Clears any on-screen decision immediately (the operator reset button)
    pub fn reset(&mut self) {
        self.state = ScanState::Scanning;
    }

    /// Returns the current session state, releasing an elapsed lockout first
    pub fn state(&mut self) -> ScanState {
        self.release_if_elapsed();
        self.state
    }

    fn release_if_elapsed(&mut self) {
        if let ScanState::Decided { at, .. } = self.state {
            let elapsed = self.clock.now().signed_duration_since(at);
            if elapsed.to_std().is_ok_and(|e| e >= self.lockout) {
                self.state = ScanState::Scanning;
            }
        }
    }
}
