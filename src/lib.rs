//! Nostr ID Core Library
//!
//! Identifiers and event identity for Nostr publishers: bech32 (NIP-19)
//! entities, canonical event ids with Schnorr signatures (NIP-01), and
//! extraction of inline `nostr:` references into event tags.
//! Relay delivery is left to a caller-supplied transport.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod config;
pub mod nostr;
pub mod relay;

pub use config::CoreConfig;
