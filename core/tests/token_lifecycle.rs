//! End-to-end lifecycle scenarios: mint on the ticket-holder side, validate
//! on the scanner side, with a manually-driven clock walking across epoch
//! boundaries.

#![allow(clippy::unwrap_used)]

use gatepass_core::{BookingId, QrIssuer, QrValidator, TicketType};
use gatepass_testing::{ManualClock, corrupt_char, test_config};
use std::sync::Arc;

fn ticket() -> (BookingId, TicketType) {
    (
        BookingId::new("abc123".to_string()),
        TicketType::new("VIP".to_string()),
    )
}

/// Happy path: a code minted in an epoch validates anywhere in that epoch.
#[test]
fn minted_code_validates_within_its_epoch() {
    let clock = Arc::new(ManualClock::starting_at_millis(60_000_000));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());
    let validator = QrValidator::new(&test_config(), clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    assert!(validator.validate(&token));

    // Still inside the same 60s bucket.
    clock.advance(chrono::Duration::seconds(59));
    assert!(validator.validate(&token));
}

/// Expiry: the same code is dead one epoch later.
#[test]
fn minted_code_expires_when_the_epoch_advances() {
    let clock = Arc::new(ManualClock::starting_at_millis(60_000_000));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());
    let validator = QrValidator::new(&test_config(), clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    clock.advance(chrono::Duration::seconds(60));
    assert!(!validator.validate(&token));
}

/// Replay across devices: validation is stateless, so two scanners both
/// accept the same still-valid code. Documents the current non-single-use
/// behavior; consumption tracking is an external collaborator.
#[test]
fn two_scanners_accept_the_same_code_in_one_epoch() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());

    let gate_a = QrValidator::new(&test_config(), clock.clone());
    let gate_b = QrValidator::new(&test_config(), clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    assert!(gate_a.validate(&token));
    assert!(gate_b.validate(&token));
}

/// Mint idempotence is not required: two codes minted in one epoch differ,
/// and both validate independently.
#[test]
fn both_of_two_same_epoch_mints_validate() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());
    let validator = QrValidator::new(&test_config(), clock.clone());

    let first = issuer.mint(&booking, &kind).unwrap();
    let second = issuer.mint(&booking, &kind).unwrap();
    assert_ne!(first, second);
    assert!(validator.validate(&first));
    assert!(validator.validate(&second));
}

/// Garbage input reaches the validator as a reject, never a panic.
#[test]
fn garbage_input_is_rejected() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let validator = QrValidator::new(&test_config(), clock);

    assert!(!validator.validate("not-a-real-token"));
    assert!(!validator.validate(""));
    assert!(!validator.validate("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"));
}

/// A single corrupted character kills the code.
#[test]
fn corrupted_code_is_rejected() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());
    let validator = QrValidator::new(&test_config(), clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    assert!(!validator.validate(&corrupt_char(&token, token.len() / 2)));
}

/// A code minted under a different deployment's key never validates.
#[test]
fn foreign_key_code_is_rejected() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let (booking, kind) = ticket();

    let mut foreign = test_config();
    foreign.secret = gatepass_core::SecretKey::from_bytes([99; 32]);
    let foreign_issuer = QrIssuer::new(&foreign, clock.clone());
    let validator = QrValidator::new(&test_config(), clock.clone());

    let token = foreign_issuer.mint(&booking, &kind).unwrap();
    assert!(!validator.validate(&token));
}

/// Opting into previous-epoch acceptance tolerates a scan in flight across
/// the boundary, and nothing older.
#[test]
fn previous_epoch_grace_covers_exactly_one_rollover() {
    let clock = Arc::new(ManualClock::starting_at_millis(0));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());

    let mut config = test_config();
    config.accept_previous_epoch = true;
    let validator = QrValidator::new(&config, clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    clock.advance(chrono::Duration::seconds(60));
    assert!(validator.validate(&token));
    clock.advance(chrono::Duration::seconds(60));
    assert!(!validator.validate(&token));
}

/// Issuer and validator built from configs that disagree on the epoch
/// interval systematically reject: the misconfiguration the shared config
/// source exists to prevent.
#[test]
fn mismatched_epoch_intervals_reject_everything() {
    let clock = Arc::new(ManualClock::starting_at_millis(90_000));
    let (booking, kind) = ticket();
    let issuer = QrIssuer::new(&test_config(), clock.clone());

    let mut skewed = test_config();
    skewed.epoch_interval = std::time::Duration::from_secs(30);
    skewed.refresh_interval = std::time::Duration::from_secs(20);
    let validator = QrValidator::new(&skewed, clock.clone());

    let token = issuer.mint(&booking, &kind).unwrap();
    assert!(!validator.validate(&token));
}
