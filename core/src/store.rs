//! Booking store collaborator trait.
//!
//! Validation is deliberately stateless: nothing in this crate marks a
//! ticket or its booking "consumed" after a successful scan, so a valid
//! token keeps validating on any device until its epoch rolls over. Where a
//! deployment wants single-entry semantics, the gate surface calls the
//! booking system through this trait after an accepted scan; the tracking
//! itself belongs to the persistence layer, not the token core.

use crate::types::BookingId;
use thiserror::Error;

/// Failure reported by the booking system when recording consumption.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("booking store error: {0}")]
pub struct BookingStoreError(pub String);

/// Write access to the booking system for post-scan side effects.
///
/// # Implementation Notes
///
/// - `mark_ticket_used()` should be atomic in the backing store (row update
///   in a transaction, or an equivalent compare-and-set) if the deployment
///   intends it to gate re-entry; this crate imposes no such policy.
/// - Implementations live with the booking/order subsystem. Only a test
///   mock ships in this workspace.
pub trait BookingStore: Send + Sync {
    /// Records that a ticket for `booking_id` passed the gate.
    ///
    /// # Errors
    ///
    /// Returns [`BookingStoreError`] if the booking system rejects or fails
    /// the update.
    fn mark_ticket_used(
        &self,
        booking_id: &BookingId,
    ) -> impl std::future::Future<Output = Result<(), BookingStoreError>> + Send;
}
