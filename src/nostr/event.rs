//! Nostr event types and event identity (NIP-01).
//!
//! - [`UnsignedEvent`]: the event body a caller builds
//! - [`Event`]: a body plus its derived `id` and `sig`
//!
//! The id is the SHA-256 of the compact JSON array
//! `[0, pubkey, created_at, kind, tags, content]`, with `/` and non-ASCII
//! characters written as raw UTF-8. The signature is a BIP-340 Schnorr
//! signature over the id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::nostr::error::{NostrError, Result};
use crate::nostr::keys::{decode_hex, SigningKeys, SECP};
use crate::nostr::nip19::{EventPointer, Nip19Entity};
use crate::nostr::tags;

/// Short text note.
pub const KIND_TEXT_NOTE: u32 = 1;

/// Torrent listing (NIP-35).
pub const KIND_TORRENT: u32 = 2003;

/// Long-form article (NIP-23).
pub const KIND_LONG_FORM: u32 = 30023;

/// User status, e.g. currently playing music (NIP-38).
pub const KIND_USER_STATUS: u32 = 30315;

/// An event body before its id and signature are computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnsignedEvent {
    /// Author public key (32 bytes, hex-encoded)
    pub pubkey: String,

    /// Unix timestamp when the event was created
    pub created_at: i64,

    /// Event kind
    pub kind: u32,

    /// Event tags, each `[name, value, ...]`
    pub tags: Vec<Vec<String>>,

    /// Event content
    pub content: String,
}

impl UnsignedEvent {
    /// Creates an event body stamped with the current time.
    ///
    /// # Example
    ///
    /// ```
    /// use nostr_id_core::nostr::{UnsignedEvent, KIND_TEXT_NOTE};
    ///
    /// let event = UnsignedEvent::new("ab".repeat(32), KIND_TEXT_NOTE, vec![], "hello");
    /// assert_eq!(event.kind, 1);
    /// assert!(event.created_at > 0);
    /// ```
    #[must_use]
    pub fn new(
        pubkey: impl Into<String>,
        kind: u32,
        tags: Vec<Vec<String>>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            pubkey: pubkey.into(),
            created_at: Utc::now().timestamp(),
            kind,
            tags,
            content: content.into(),
        }
    }

    /// Replaces the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Computes the event id of this body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn compute_id(&self) -> Result<[u8; 32]> {
        compute_id(self)
    }
}

/// Hashes the canonical serialization of event fields.
///
/// `tags` may be any serializable value. Well-formed events use an array of
/// string arrays, but ids of events carrying other tag shapes can still be
/// reproduced.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn event_hash<T: Serialize + ?Sized>(
    pubkey: &str,
    created_at: i64,
    kind: u32,
    tags: &T,
    content: &str,
) -> Result<[u8; 32]> {
    let serialized = serde_json::to_vec(&(0, pubkey, created_at, kind, tags, content))?;
    Ok(Sha256::digest(&serialized).into())
}

/// Computes the id of an event body.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn compute_id(event: &UnsignedEvent) -> Result<[u8; 32]> {
    event_hash(
        &event.pubkey,
        event.created_at,
        event.kind,
        &event.tags,
        &event.content,
    )
}

/// Computes the id of `event` and signs it.
///
/// # Errors
///
/// Returns [`NostrError::KeyMismatch`] if `event.pubkey` is not the public
/// key of `keys`, or an error if hashing or signing fails.
pub fn sign(keys: &SigningKeys, event: UnsignedEvent) -> Result<Event> {
    let derived = keys.pubkey_hex();
    if event.pubkey != derived {
        return Err(NostrError::KeyMismatch {
            expected: event.pubkey,
            actual: derived,
        });
    }

    let id = compute_id(&event)?;
    let sig = keys.sign(&id)?;
    let id = hex::encode(id);
    debug!(event_id = %id, kind = event.kind, "signed event");

    Ok(Event {
        id,
        pubkey: event.pubkey,
        created_at: event.created_at,
        kind: event.kind,
        tags: event.tags,
        content: event.content,
        sig: hex::encode(sig),
    })
}

impl SigningKeys {
    /// Signs `event` with these keys. See [`sign`].
    ///
    /// # Errors
    ///
    /// Same as [`sign`].
    pub fn sign_event(&self, event: UnsignedEvent) -> Result<Event> {
        sign(self, event)
    }
}

/// Verifies a Schnorr signature over `id` against an x-only public key.
#[must_use]
pub fn verify(pubkey: &[u8; 32], id: &[u8; 32], sig: &[u8; 64]) -> bool {
    use nostr::secp256k1::{schnorr::Signature, Message, XOnlyPublicKey};

    let Ok(pubkey) = XOnlyPublicKey::from_slice(pubkey) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(sig) else {
        return false;
    };
    SECP.verify_schnorr(&signature, &Message::from_digest(*id), &pubkey)
        .is_ok()
}

/// Hex-string form of [`verify`]. Malformed hex verifies as `false`.
#[must_use]
pub fn verify_hex(pubkey: &str, id: &str, sig: &str) -> bool {
    match (
        decode_hex::<32>("pubkey", pubkey),
        decode_hex::<32>("id", id),
        decode_hex::<64>("sig", sig),
    ) {
        (Ok(pubkey), Ok(id), Ok(sig)) => verify(&pubkey, &id, &sig),
        _ => false,
    }
}

/// Returns true only if the stored id matches the body and the signature is
/// valid for that id and the event's pubkey.
#[must_use]
pub fn verify_event(event: &Event) -> bool {
    event.verify_signature().is_ok()
}

/// A signed Nostr event.
///
/// Fields are read-only: an `Event` is either produced by [`sign`] or
/// deserialized from the wire, where [`verify_event`] decides whether it can
/// be trusted.
///
/// # Structure
///
/// ```json
/// {
///   "id": "...",           // SHA256 of serialized event
///   "pubkey": "...",       // Author public key
///   "created_at": 123456,  // Unix timestamp
///   "kind": 1,
///   "tags": [["t", "..."]],
///   "content": "...",
///   "sig": "..."           // Schnorr signature
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    id: String,
    pubkey: String,
    created_at: i64,
    kind: u32,
    tags: Vec<Vec<String>>,
    content: String,
    sig: String,
}

impl Event {
    /// Event id (32-byte SHA256 hash, hex-encoded).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Author public key (hex-encoded).
    #[must_use]
    pub fn pubkey(&self) -> &str {
        &self.pubkey
    }

    /// Unix timestamp when the event was created.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Event kind.
    #[must_use]
    pub const fn kind(&self) -> u32 {
        self.kind
    }

    /// Event tags.
    #[must_use]
    pub fn tags(&self) -> &[Vec<String>] {
        &self.tags
    }

    /// Event content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Schnorr signature (64 bytes, hex-encoded).
    #[must_use]
    pub fn sig(&self) -> &str {
        &self.sig
    }

    /// The fields after the tag name of the `index`-th tag named `name`.
    #[must_use]
    pub fn find_tag(&self, name: &str, index: usize) -> Option<&[String]> {
        tags::find_tag(&self.tags, name, index)
    }

    /// Serializes this event to JSON for transmission.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(NostrError::from)
    }

    /// Deserializes an event from JSON. The result is not verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(NostrError::from)
    }

    /// Encodes a `nevent` reference to this event with the given relay hints.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored id or pubkey is not valid hex, or a
    /// relay hint is longer than 255 bytes.
    pub fn to_nevent(&self, relays: &[String]) -> Result<String> {
        Nip19Entity::Event(EventPointer {
            id: decode_hex("id", &self.id)?,
            relays: relays.to_vec(),
            author: Some(decode_hex("pubkey", &self.pubkey)?),
            kind: Some(self.kind),
        })
        .encode()
    }

    /// Verifies the event id and signature, reporting why verification failed.
    ///
    /// # Errors
    ///
    /// Returns [`NostrError::InvalidEvent`] if a field is malformed or the id
    /// does not match the body, or [`NostrError::InvalidSignature`] if the
    /// signature does not verify.
    pub fn verify_signature(&self) -> Result<()> {
        let pubkey: [u8; 32] = decode_hex("pubkey", &self.pubkey)
            .map_err(|e| NostrError::InvalidEvent(e.to_string()))?;
        let id: [u8; 32] =
            decode_hex("id", &self.id).map_err(|e| NostrError::InvalidEvent(e.to_string()))?;
        let sig: [u8; 64] =
            decode_hex("sig", &self.sig).map_err(|e| NostrError::InvalidEvent(e.to_string()))?;

        // Constant-time comparison of the recomputed id
        let calculated = event_hash(
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        )?;
        if !bool::from(calculated.as_slice().ct_eq(id.as_slice())) {
            return Err(NostrError::InvalidEvent("Event ID mismatch".to_string()));
        }

        if verify(&pubkey, &id, &sig) {
            Ok(())
        } else {
            Err(NostrError::InvalidSignature)
        }
    }
}
