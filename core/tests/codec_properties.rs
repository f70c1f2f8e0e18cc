//! Property tests for the token codec: round-trip fidelity, tamper
//! rejection, and foreign-key rejection over generated payloads.

#![allow(clippy::unwrap_used)]

use gatepass_core::{BookingId, Epoch, SecretKey, TicketToken, TicketType, TokenCodec};
use proptest::prelude::*;

prop_compose! {
    fn arb_payload()(
        booking in "[A-Za-z0-9_-]{1,32}",
        kind in "[A-Za-z0-9 ]{1,16}",
        epoch in 0i64..100_000_000,
        fragment in "[A-Za-z0-9_-]{16}",
    ) -> TicketToken {
        TicketToken {
            booking_id: BookingId::new(booking),
            ticket_type: TicketType::new(kind),
            epoch: Epoch::from_raw(epoch),
            nonce_fragment: fragment,
        }
    }
}

proptest! {
    /// decode(encode(P, K), K) == P for arbitrary payloads.
    #[test]
    fn round_trip_recovers_any_payload(payload in arb_payload()) {
        let codec = TokenCodec::new(&SecretKey::from_bytes([7; 32]));
        let token = codec.encode(&payload).unwrap();
        let decoded: TicketToken = codec.decode(&token).unwrap();
        prop_assert_eq!(decoded, payload);
    }

    /// Replacing any single character makes decode fail; tamper rejection
    /// is a designed property of the authenticated cipher, not luck.
    #[test]
    fn any_single_character_substitution_is_rejected(
        payload in arb_payload(),
        position in any::<prop::sample::Index>(),
    ) {
        let codec = TokenCodec::new(&SecretKey::from_bytes([7; 32]));
        let token = codec.encode(&payload).unwrap();
        let index = position.index(token.len());
        let tampered = gatepass_testing::corrupt_char(&token, index);
        prop_assert_ne!(&tampered, &token);
        prop_assert!(codec.decode::<TicketToken>(&tampered).is_err());
    }

    /// A payload sealed under one key never opens under another.
    #[test]
    fn foreign_key_never_opens_a_token(
        payload in arb_payload(),
        minting_byte in 0u8..255,
    ) {
        let minting = TokenCodec::new(&SecretKey::from_bytes([minting_byte; 32]));
        let opening = TokenCodec::new(&SecretKey::from_bytes([minting_byte.wrapping_add(1); 32]));
        let token = minting.encode(&payload).unwrap();
        prop_assert!(opening.decode::<TicketToken>(&token).is_err());
    }

    /// Arbitrary junk strings decode to an error, never a panic.
    #[test]
    fn junk_input_errors_cleanly(junk in ".{0,128}") {
        let codec = TokenCodec::new(&SecretKey::from_bytes([7; 32]));
        let _ = codec.decode::<TicketToken>(&junk);
    }
}
