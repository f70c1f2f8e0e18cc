//! Minting of fresh rotating ticket codes.

use crate::clock::{Clock, RotationClock};
use crate::codec::TokenCodec;
use crate::config::PassConfig;
use crate::error::MintError;
use crate::types::{BookingId, TicketToken, TicketType};
use std::sync::Arc;

/// Characters of the keyed fragment embedded in each token.
pub const NONCE_FRAGMENT_LEN: usize = 16;

/// Anything that can produce a fresh token string for a ticket.
///
/// The seam between the minting core and the display surface: production
/// code hands the rotation task a [`QrIssuer`], tests hand it a
/// failure-injecting mock to exercise the error path.
pub trait TokenSource: Send + Sync {
    /// Mints a fresh token string for the given ticket.
    ///
    /// # Errors
    ///
    /// Returns [`MintError`] if serialization or encryption fails; the
    /// display surface shows a retry/error state rather than a stale code.
    fn mint(&self, booking_id: &BookingId, ticket_type: &TicketType) -> Result<String, MintError>;
}

/// Produces the string a display surface renders as a QR image.
///
/// Stateless between calls: every mint reads the clock, builds a payload
/// bound to the current epoch, and seals it. The caller owns the refresh
/// cadence (see the display crate); the issuer only knows how to mint once.
#[derive(Clone)]
pub struct QrIssuer {
    codec: TokenCodec,
    clock: RotationClock,
}

impl QrIssuer {
    /// Creates an issuer from shared configuration and an injected clock
    #[must_use]
    pub fn new(config: &PassConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec: TokenCodec::new(&config.secret),
            clock: RotationClock::new(clock, config.epoch_interval),
        }
    }

    /// Mints a fresh token for `(booking_id, ticket_type)`.
    ///
    /// Two mints within one epoch may produce different strings (fresh
    /// nonces); both validate independently for that epoch.
    ///
    /// # Errors
    ///
    /// Returns [`MintError`] if serialization or encryption fails.
    pub fn mint(
        &self,
        booking_id: &BookingId,
        ticket_type: &TicketType,
    ) -> Result<String, MintError> {
        let epoch = self.clock.current_epoch();
        let nonce_fragment = self
            .codec
            .fragment(&format!("{booking_id}-{epoch}"), NONCE_FRAGMENT_LEN)?;
        let payload = TicketToken {
            booking_id: booking_id.clone(),
            ticket_type: ticket_type.clone(),
            epoch,
            nonce_fragment,
        };
        let token = self.codec.encode(&payload)?;
        tracing::debug!(booking_id = %booking_id, epoch = %epoch, "minted rotating ticket code");
        Ok(token)
    }
}

impl TokenSource for QrIssuer {
    fn mint(&self, booking_id: &BookingId, ticket_type: &TicketType) -> Result<String, MintError> {
        Self::mint(self, booking_id, ticket_type)
    }
}
