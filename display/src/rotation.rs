//! Cancellable rotation task keeping a displayed ticket code fresh.
//!
//! The display surface mints once immediately, then re-mints on a fixed
//! cadence (default 45 seconds, against 60-second validity epochs) so a
//! replacement code is always on screen before the previous epoch's code
//! expires. Each tick fully replaces the previous token. The task is owned
//! by a [`RotatingCode`] handle; dropping the handle tears the timer down,
//! so a dismissed ticket view cannot leak a background task.

use gatepass_core::issuer::TokenSource;
use gatepass_core::types::{BookingId, TicketType};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// What the ticket view should currently render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayState {
    /// No mint has completed yet (spawn just happened)
    Pending,
    /// A live code to render as a QR image
    Showing {
        /// The opaque token string to encode
        token: String,
    },
    /// The last mint failed; render a generic "unable to display ticket"
    /// state. The loop keeps ticking, so the next successful mint recovers.
    Failed,
}

impl DisplayState {
    /// Returns the token to render, if any
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Showing { token } => Some(token),
            Self::Pending | Self::Failed => None,
        }
    }
}

/// Handle to the background rotation task for one displayed ticket.
///
/// One handle per ticket on screen. The task stops when the handle is
/// dropped or [`RotatingCode::stop`] is called; the owning view must let
/// that happen on dismissal rather than leaking the handle.
pub struct RotatingCode {
    rx: watch::Receiver<DisplayState>,
    task: JoinHandle<()>,
}

impl RotatingCode {
    /// Spawns the rotation loop for `(booking_id, ticket_type)`.
    ///
    /// Mints immediately, then every `refresh` period, publishing each
    /// result over a watch channel. Mint failures publish
    /// [`DisplayState::Failed`] and are retried on the next tick.
    #[must_use]
    pub fn spawn(
        source: Arc<dyn TokenSource>,
        booking_id: BookingId,
        ticket_type: TicketType,
        refresh: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(DisplayState::Pending);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately: the initial mint.
                ticker.tick().await;
                let next = match source.mint(&booking_id, &ticket_type) {
                    Ok(token) => DisplayState::Showing { token },
                    Err(error) => {
                        tracing::warn!(
                            %error,
                            booking_id = %booking_id,
                            "unable to refresh displayed ticket code"
                        );
                        DisplayState::Failed
                    }
                };
                if tx.send(next).is_err() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Returns the freshest display state
    #[must_use]
    pub fn current(&self) -> DisplayState {
        self.rx.borrow().clone()
    }

    /// Returns a receiver for observing state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.rx.clone()
    }

    /// Stops the rotation task explicitly.
    ///
    /// Equivalent to dropping the handle; provided so teardown reads as
    /// intent at call sites.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for RotatingCode {
    fn drop(&mut self) {
        self.task.abort();
    }
}
