//! Nostr identifiers and event identity.
//!
//! This module covers everything needed to name, sign and reference Nostr
//! events without talking to a relay.
//!
//! # Architecture
//!
//! ```text
//! bytes ──convert_bits──► 5-bit groups ──bech32──► "npub1…" / "nevent1…"
//!                                ▲
//!              TLV records ──────┘   (nprofile, nevent, naddr)
//!
//! UnsignedEvent ──SHA-256(canonical JSON)──► id ──Schnorr──► Event
//!
//! content ──"nostr:…" scan──► Nip19Entity ──► p / e tags + relay set
//! ```
//!
//! # Security
//!
//! - Decoding never panics on untrusted input; every failure is a [`NostrError`]
//! - Signing uses no auxiliary randomness, so signatures are reproducible
//! - Secret key bytes are zeroized on drop
//!
//! # Example
//!
//! ```
//! use nostr_id_core::nostr::{sign, verify_event, SigningKeys, TagBuilder, UnsignedEvent, KIND_TEXT_NOTE};
//!
//! let keys = SigningKeys::generate();
//! let unsigned = UnsignedEvent::new(
//!     keys.pubkey_hex(),
//!     KIND_TEXT_NOTE,
//!     vec![TagBuilder::t_tag("test")],
//!     "hello".to_string(),
//! );
//!
//! let event = sign(&keys, unsigned).unwrap();
//! assert!(verify_event(&event));
//! assert_eq!(event.find_tag("t", 0), Some(&["test".to_string()][..]));
//! ```

mod error;
mod event;
mod keys;
mod tags;

pub mod bech32;
pub mod embed;
pub mod nip19;
pub mod tlv;

pub use embed::{embeds_to_tags, EmbedExtractor, Embeds, TagKind};
pub use error::{NostrError, Result};
pub use event::{
    compute_id, event_hash, sign, verify, verify_event, verify_hex, Event, UnsignedEvent,
    KIND_LONG_FORM, KIND_TEXT_NOTE, KIND_TORRENT, KIND_USER_STATUS,
};
pub use keys::{SigningKeys, SECP};
pub use nip19::{AddressPointer, EntityKind, EventPointer, Nip19Entity, ProfilePointer};
pub use tags::{find_tag, TagBuilder, MENTION_MARKER};
