//! Handing signed events to relays.
//!
//! The library does not open sockets. A caller supplies a [`RelayTransport`]
//! that delivers one framed message to one relay; [`publish`] frames the
//! event, validates each relay URL and records the outcome per relay.
//!
//! # Architecture
//!
//! ```text
//! Event
//!   │
//!   ▼
//! relay_message  ──►  ["EVENT", {...}]
//!   │
//!   ▼
//! publish ──► RelayTransport::send (once per relay, best effort)
//!   │
//!   ▼
//! PublishResult { accepted_by, failed }
//! ```
//!
//! # Example
//!
//! ```
//! use nostr_id_core::nostr::{sign, SigningKeys, UnsignedEvent, KIND_TEXT_NOTE};
//! use nostr_id_core::relay::{publish, RelayResult};
//!
//! let keys = SigningKeys::generate();
//! let event = sign(
//!     &keys,
//!     UnsignedEvent::new(keys.pubkey_hex(), KIND_TEXT_NOTE, vec![], "hi"),
//! )
//! .unwrap();
//!
//! let transport = |_url: &str, _message: &str| -> RelayResult<()> { Ok(()) };
//! let result = publish(&transport, &["wss://relay.example.com".to_string()], &event).unwrap();
//! assert!(result.is_success());
//! ```

mod error;
mod publish;
mod types;

pub use error::{RelayError, RelayResult};
pub use publish::{publish, relay_message, RelayTransport};
pub use types::PublishResult;
