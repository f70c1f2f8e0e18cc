//! # Gatepass Core
//!
//! The dynamic ticket QR code lifecycle for an event-ticketing platform:
//! minting of a time-rotating, encrypted, replay-resistant validation token,
//! and the scanner-side decision on a presented token.
//!
//! # Architecture
//!
//! ```text
//! Ticket-holder device                       Venue scanner
//! ┌──────────────────┐                      ┌──────────────────┐
//! │  display surface │                      │  camera + QR lib │
//! │  (45s refresh)   │                      │  (external)      │
//! └────────┬─────────┘                      └────────┬─────────┘
//!          │ mint()                                  │ decoded string
//!          ▼                                         ▼
//!     ┌─────────┐    opaque base64 string      ┌───────────┐
//!     │ QrIssuer│ ───────────────────────────▶ │QrValidator│──▶ bool
//!     └────┬────┘        (via QR image)        └─────┬─────┘
//!          │                                         │
//!          └──────────┬──────────────────────────────┘
//!                     ▼
//!            TokenCodec (AES-256-GCM)
//!            RotationClock (60s epochs)
//! ```
//!
//! Issuer and validator run in different processes, coordinated only by
//! wall-clock time and the shared secret. A token is valid for exactly one
//! rotation epoch; the display re-mints on a shorter cadence so a live code
//! is always on screen.
//!
//! # Key Properties
//!
//! - **Tamper rejection by design**: tokens are sealed with AES-256-GCM, so
//!   a flipped character or foreign key fails authenticated decryption.
//! - **Total validation**: [`QrValidator::validate`] always returns a
//!   boolean; garbage from a scanner is a reject, never a crash.
//! - **Stateless scans**: decisions are independent and unpersisted;
//!   consumption tracking is surfaced as the [`BookingStore`] collaborator.
//!
//! The rotation loop that keeps a displayed code fresh lives in the
//! `gatepass-display` crate; this crate is pure and synchronous.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod issuer;
pub mod scan;
pub mod store;
pub mod types;
pub mod validator;

pub use clock::{Clock, RotationClock, SystemClock};
pub use codec::TokenCodec;
pub use config::{PassConfig, SecretKey};
pub use error::{ConfigError, DecodeError, MintError};
pub use issuer::{NONCE_FRAGMENT_LEN, QrIssuer, TokenSource};
pub use scan::{ScanOutcome, ScanSession, ScanState};
pub use store::{BookingStore, BookingStoreError};
pub use types::{BookingId, Epoch, TicketToken, TicketType};
pub use validator::QrValidator;
