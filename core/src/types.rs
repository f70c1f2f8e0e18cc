//! Domain types for the rotating ticket code core.
//!
//! A displayed ticket carries a short-lived encrypted payload ([`TicketToken`])
//! that binds the booking to the rotation bucket ([`Epoch`]) it was minted in.
//! The payload is ephemeral: it exists only QR-encoded on a screen and in
//! memory while a scanner checks it, and is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier of a purchased ticket/order.
///
/// Supplied by the booking subsystem; the core never interprets its contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a `BookingId` from the identifier handed over by the booking system
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the identifier as a string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket category label (e.g. "VIP", "General Admission").
///
/// Carried through the token for auditing and display; validation never
/// looks at it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketType(String);

impl TicketType {
    /// Creates a `TicketType` from a category label
    #[must_use]
    pub const fn new(label: String) -> Self {
        Self(label)
    }

    /// Returns the label as a string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Rotation epoch
// ============================================================================

/// Rotation bucket a token was minted in.
///
/// An epoch is wall-clock time floored to the configured rotation interval:
/// `floor(now_millis / interval_millis)`. A token is valid for exactly one
/// epoch; once the bucket advances, the previously displayed code is dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(i64);

impl Epoch {
    /// Creates an `Epoch` from its raw bucket number
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw bucket number
    #[must_use]
    pub const fn raw(&self) -> i64 {
        self.0
    }

    /// Returns the immediately preceding epoch
    #[must_use]
    pub const fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Computes the epoch containing `instant` for the given rotation interval.
    ///
    /// Pure function of its inputs; non-decreasing as `instant` advances.
    #[must_use]
    pub fn at(instant: DateTime<Utc>, interval: Duration) -> Self {
        let interval_ms = i64::try_from(interval.as_millis())
            .unwrap_or(i64::MAX)
            .max(1);
        Self(instant.timestamp_millis().div_euclid(interval_ms))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Token payload
// ============================================================================

/// The structured payload sealed into a displayed QR code.
///
/// Never persisted: minted fresh on every rotation tick, superseded by the
/// next tick whether or not it was ever scanned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketToken {
    /// Booking this code belongs to
    pub booking_id: BookingId,
    /// Category label, carried for auditing/display only
    pub ticket_type: TicketType,
    /// Rotation bucket the code was minted in
    pub epoch: Epoch,
    /// Keyed fragment distinguishing codes minted for the same booking in the
    /// same epoch; not independently validated
    pub nonce_fragment: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at_millis(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn epoch_floors_to_interval() {
        let interval = Duration::from_secs(60);
        assert_eq!(Epoch::at(at_millis(0), interval), Epoch::from_raw(0));
        assert_eq!(Epoch::at(at_millis(59_999), interval), Epoch::from_raw(0));
        assert_eq!(Epoch::at(at_millis(60_000), interval), Epoch::from_raw(1));
        assert_eq!(Epoch::at(at_millis(125_000), interval), Epoch::from_raw(2));
    }

    #[test]
    fn epoch_is_non_decreasing() {
        let interval = Duration::from_secs(60);
        let mut last = Epoch::at(at_millis(0), interval);
        for ms in (0..600_000).step_by(7_001) {
            let next = Epoch::at(at_millis(ms), interval);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn epoch_strictly_advances_after_full_interval() {
        let interval = Duration::from_secs(60);
        let t1 = at_millis(30_000);
        let t2 = at_millis(90_000);
        assert!(Epoch::at(t2, interval) > Epoch::at(t1, interval));
    }

    #[test]
    fn prev_steps_back_one_bucket() {
        assert_eq!(Epoch::from_raw(1000).prev(), Epoch::from_raw(999));
    }

    #[test]
    fn identifiers_display_their_contents() {
        assert_eq!(BookingId::new("abc123".to_string()).to_string(), "abc123");
        assert_eq!(TicketType::new("VIP".to_string()).to_string(), "VIP");
    }
}
