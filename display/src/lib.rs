//! # Gatepass Display
//!
//! The imperative shell around `gatepass-core` for the ticket-holder
//! surface: a cancellable background task that keeps the displayed QR
//! payload fresh across rotation epochs.
//!
//! The core stays pure and synchronous; everything timer-shaped lives here.
//! Rendering the token string as an actual QR image (format, size, error
//! correction) is the embedding view's concern, not this crate's.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod rotation;

pub use rotation::{DisplayState, RotatingCode};
