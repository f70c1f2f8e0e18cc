//! Scanner-side decision on presented token strings.

use crate::clock::{Clock, RotationClock};
use crate::codec::TokenCodec;
use crate::config::PassConfig;
use crate::types::TicketToken;
use std::sync::Arc;

/// Decides whether a presented token string is a currently-valid ticket code.
///
/// Stateless: every scan is independent, and nothing here marks a ticket
/// consumed; the same still-valid token validates true on any number of
/// scanner devices until its epoch rolls over. Consumption tracking is an
/// external collaborator concern (see [`crate::store::BookingStore`]).
#[derive(Clone)]
pub struct QrValidator {
    codec: TokenCodec,
    clock: RotationClock,
    accept_previous: bool,
}

impl QrValidator {
    /// Creates a validator from shared configuration and an injected clock.
    ///
    /// Issuer and validator must be built from the same configuration
    /// source; epoch-interval disagreement is a silent reject-everything
    /// misconfiguration, not a runtime error.
    #[must_use]
    pub fn new(config: &PassConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec: TokenCodec::new(&config.secret),
            clock: RotationClock::new(clock, config.epoch_interval),
            accept_previous: config.accept_previous_epoch,
        }
    }

    /// Accepts or rejects a presented token string.
    ///
    /// Total: always returns a boolean, never propagates an error. A
    /// malformed or foreign QR code at a venue gate must show "invalid"
    /// feedback, not crash the scanning UI, so every decode failure is
    /// swallowed into `false`. Reject reasons go to operator-side debug
    /// logs only; the caller sees a bare accept/reject.
    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        match self.codec.decode::<TicketToken>(token) {
            Ok(payload) => {
                let current = self.clock.current_epoch();
                let fresh = payload.epoch == current
                    || (self.accept_previous && payload.epoch == current.prev());
                if !fresh {
                    tracing::debug!(
                        booking_id = %payload.booking_id,
                        token_epoch = %payload.epoch,
                        current_epoch = %current,
                        "rejected stale ticket code"
                    );
                }
                fresh
            }
            Err(error) => {
                tracing::debug!(%error, "rejected undecodable ticket code");
                false
            }
        }
    }
}
