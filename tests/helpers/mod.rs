//! Reusable test helpers for identifier and event integration tests.
//!
//! Fixed vectors come from events and identifiers published in the wild, so
//! they pin the exact byte-level encoding rather than just self-consistency.

#![allow(dead_code)]

use nostr_id_core::nostr::{sign, Event, SigningKeys, UnsignedEvent};

/// Pubkey of the recorded vector event (hex).
pub const VECTOR_PUBKEY: &str = "b7b4ee1454af66f017ef672cce681f37bafaee57ab1b899acc40176b2b537816";

/// Id of the recorded vector event (hex).
pub const VECTOR_ID: &str = "562ba36da0dd47b202e6c95c4aad2ba12997b8f86b2d353b08b4f0d59d179985";

/// Signature of the recorded vector event (hex).
pub const VECTOR_SIG: &str = "1de8a6099df2d60aa7ed3471031a36fb97b7f091ef6c57b11f4346888d209902cb882274c0d448cd12c4f587eac65feae23c80bc27ea1530decae365cef7371c";

/// Creation time of the recorded vector event.
pub const VECTOR_CREATED_AT: i64 = 1_731_409_010;

/// Content of the recorded vector event.
pub const VECTOR_CONTENT: &str = "#test message";

/// An event id referenced by published `nevent`s.
pub const REFERENCED_EVENT_ID: &str =
    "6ae5ed80e301e12fb568140c976351caf9df6bd3e27d14fa22b0261e84f69817";

/// Relay used in published references.
pub const RELAY: &str = "wss://nostr.x0f.org";

/// Returns keys for the secret key `1`, whose pubkey is the curve generator.
pub fn generator_keys() -> SigningKeys {
    let mut secret = [0u8; 32];
    secret[31] = 1;
    SigningKeys::from_bytes(secret).expect("1 is a valid secret key")
}

/// Signs a note with the given tags and content at a fixed timestamp.
pub fn signed_note(keys: &SigningKeys, tags: Vec<Vec<String>>, content: &str) -> Event {
    let body = UnsignedEvent::new(keys.pubkey_hex(), 1, tags, content).with_created_at(1_700_000_000);
    sign(keys, body).expect("signing with matching keys must succeed")
}

/// Converts string slices into an owned tag.
pub fn tag(fields: &[&str]) -> Vec<String> {
    fields.iter().map(ToString::to_string).collect()
}
