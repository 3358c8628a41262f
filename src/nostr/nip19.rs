//! NIP-19 bech32-encoded entities.
//!
//! | Prefix     | Payload                                         |
//! |------------|-------------------------------------------------|
//! | `npub`     | raw 32-byte pubkey                              |
//! | `note`     | raw 32-byte event id                            |
//! | `nprofile` | TLV: pubkey, relays                             |
//! | `nevent`   | TLV: event id, relays, author?, kind?           |
//! | `naddr`    | TLV: identifier, relays, author?, kind?         |
//!
//! Decoding fails closed: a missing or wrongly sized fixed-length field
//! rejects the whole entity. Unknown TLV types are ignored.
//!
//! # Example
//!
//! ```
//! use nostr_id_core::nostr::nip19::{Nip19Entity, ProfilePointer};
//!
//! let profile = Nip19Entity::Profile(ProfilePointer {
//!     pubkey: [0x11; 32],
//!     relays: vec!["wss://relay.example.com".to_string()],
//! });
//! let encoded = profile.encode().unwrap();
//! assert!(encoded.starts_with("nprofile1"));
//! assert_eq!(Nip19Entity::decode(&encoded).unwrap(), profile);
//! ```

use std::str::FromStr;

use crate::nostr::bech32::{self, Variant};
use crate::nostr::error::{NostrError, Result};
use crate::nostr::keys::decode_hex;
use crate::nostr::tlv::{self, TlvRecords, TLV_AUTHOR, TLV_KIND, TLV_RELAY, TLV_SPECIAL};

/// Default maximum length of an encoded entity accepted by [`Nip19Entity::decode`].
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// URI scheme for inline references (NIP-21).
pub const NOSTR_URI_SCHEME: &str = "nostr:";

/// The closed set of entity kinds, one per human-readable prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// `npub`
    Npub,
    /// `note`
    Note,
    /// `nprofile`
    Nprofile,
    /// `nevent`
    Nevent,
    /// `naddr`
    Naddr,
}

impl EntityKind {
    /// The human-readable prefix for this kind.
    #[must_use]
    pub const fn hrp(self) -> &'static str {
        match self {
            Self::Npub => "npub",
            Self::Note => "note",
            Self::Nprofile => "nprofile",
            Self::Nevent => "nevent",
            Self::Naddr => "naddr",
        }
    }

    /// Looks up a kind by its prefix.
    #[must_use]
    pub fn from_hrp(hrp: &str) -> Option<Self> {
        match hrp {
            "npub" => Some(Self::Npub),
            "note" => Some(Self::Note),
            "nprofile" => Some(Self::Nprofile),
            "nevent" => Some(Self::Nevent),
            "naddr" => Some(Self::Naddr),
            _ => None,
        }
    }
}

/// A profile reference (`nprofile`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePointer {
    /// Profile pubkey.
    pub pubkey: [u8; 32],
    /// Relays where the profile is likely to be found.
    pub relays: Vec<String>,
}

/// An event reference (`nevent`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPointer {
    /// Event id.
    pub id: [u8; 32],
    /// Relays where the event is likely to be found.
    pub relays: Vec<String>,
    /// Event author, if known.
    pub author: Option<[u8; 32]>,
    /// Event kind, if known.
    pub kind: Option<u32>,
}

/// An addressable event reference (`naddr`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPointer {
    /// The `d` tag value of the referenced event (arbitrary bytes).
    pub identifier: Vec<u8>,
    /// Relays where the event is likely to be found.
    pub relays: Vec<String>,
    /// Event author, if known.
    pub author: Option<[u8; 32]>,
    /// Event kind, if known.
    pub kind: Option<u32>,
}

impl AddressPointer {
    /// The identifier as UTF-8, if it is valid UTF-8.
    #[must_use]
    pub fn identifier_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.identifier).ok()
    }
}

/// One decoded NIP-19 identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nip19Entity {
    /// `npub`: a bare pubkey.
    Pubkey([u8; 32]),
    /// `note`: a bare event id.
    Note([u8; 32]),
    /// `nprofile`: pubkey plus relay hints.
    Profile(ProfilePointer),
    /// `nevent`: event id plus relay hints, author and kind.
    Event(EventPointer),
    /// `naddr`: addressable event coordinates.
    Address(AddressPointer),
}

impl Nip19Entity {
    /// Builds an `npub` entity from a hex pubkey.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed or not 32 bytes.
    pub fn npub_from_hex(pubkey_hex: &str) -> Result<Self> {
        decode_hex("pubkey", pubkey_hex).map(Self::Pubkey)
    }

    /// Builds a `note` entity from a hex event id.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed or not 32 bytes.
    pub fn note_from_hex(event_id_hex: &str) -> Result<Self> {
        decode_hex("event id", event_id_hex).map(Self::Note)
    }

    /// Builds an `nprofile` entity from a hex pubkey and relay hints.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed or not 32 bytes.
    pub fn nprofile_from_hex(pubkey_hex: &str, relays: &[String]) -> Result<Self> {
        Ok(Self::Profile(ProfilePointer {
            pubkey: decode_hex("pubkey", pubkey_hex)?,
            relays: relays.to_vec(),
        }))
    }

    /// Builds an `nevent` entity from hex fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or author hex is malformed or not 32 bytes.
    pub fn nevent_from_hex(
        event_id_hex: &str,
        relays: &[String],
        author_hex: Option<&str>,
        kind: Option<u32>,
    ) -> Result<Self> {
        Ok(Self::Event(EventPointer {
            id: decode_hex("event id", event_id_hex)?,
            relays: relays.to_vec(),
            author: author_hex.map(|a| decode_hex("author", a)).transpose()?,
            kind,
        }))
    }

    /// Builds an `naddr` entity with a hex author.
    ///
    /// # Errors
    ///
    /// Returns an error if the author hex is malformed or not 32 bytes.
    pub fn naddr_from_hex(
        identifier: &str,
        relays: &[String],
        author_hex: Option<&str>,
        kind: Option<u32>,
    ) -> Result<Self> {
        Ok(Self::Address(AddressPointer {
            identifier: identifier.as_bytes().to_vec(),
            relays: relays.to_vec(),
            author: author_hex.map(|a| decode_hex("author", a)).transpose()?,
            kind,
        }))
    }

    /// The kind of this entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Pubkey(_) => EntityKind::Npub,
            Self::Note(_) => EntityKind::Note,
            Self::Profile(_) => EntityKind::Nprofile,
            Self::Event(_) => EntityKind::Nevent,
            Self::Address(_) => EntityKind::Naddr,
        }
    }

    /// The referenced pubkey, for `npub` and `nprofile`.
    #[must_use]
    pub const fn pubkey(&self) -> Option<&[u8; 32]> {
        match self {
            Self::Pubkey(pubkey) | Self::Profile(ProfilePointer { pubkey, .. }) => Some(pubkey),
            _ => None,
        }
    }

    /// The referenced event id, for `note` and `nevent`.
    #[must_use]
    pub const fn event_id(&self) -> Option<&[u8; 32]> {
        match self {
            Self::Note(id) | Self::Event(EventPointer { id, .. }) => Some(id),
            _ => None,
        }
    }

    /// Relay hints carried by the entity (empty for `npub` and `note`).
    #[must_use]
    pub fn relays(&self) -> &[String] {
        match self {
            Self::Pubkey(_) | Self::Note(_) => &[],
            Self::Profile(p) => &p.relays,
            Self::Event(e) => &e.relays,
            Self::Address(a) => &a.relays,
        }
    }

    /// Encodes the entity as a bech32 string.
    ///
    /// # Errors
    ///
    /// Returns [`NostrError::TlvValueTooLong`] if a relay hint or identifier
    /// exceeds 255 bytes.
    pub fn encode(&self) -> Result<String> {
        let hrp = self.kind().hrp();
        match self {
            Self::Pubkey(bytes) | Self::Note(bytes) => encode_payload(hrp, bytes),
            Self::Profile(p) => {
                let records = pointer_records(&p.pubkey, &p.relays, None, None);
                encode_payload(hrp, &tlv::encode(&records)?)
            }
            Self::Event(e) => {
                let records = pointer_records(&e.id, &e.relays, e.author.as_ref(), e.kind);
                encode_payload(hrp, &tlv::encode(&records)?)
            }
            Self::Address(a) => {
                let records = pointer_records(&a.identifier, &a.relays, a.author.as_ref(), a.kind);
                encode_payload(hrp, &tlv::encode(&records)?)
            }
        }
    }

    /// Encodes the entity as a `nostr:` URI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::encode`].
    pub fn to_nostr_uri(&self) -> Result<String> {
        Ok(format!("{NOSTR_URI_SCHEME}{}", self.encode()?))
    }

    /// Decodes a bech32 entity, accepting strings up to [`DEFAULT_MAX_LENGTH`].
    ///
    /// # Errors
    ///
    /// See [`Self::decode_with_limit`].
    pub fn decode(input: &str) -> Result<Self> {
        Self::decode_with_limit(input, DEFAULT_MAX_LENGTH)
    }

    /// Decodes a bech32 entity no longer than `max_length` characters.
    ///
    /// # Errors
    ///
    /// - [`NostrError::MalformedBech32`] for bad bech32 or bit padding
    /// - [`NostrError::UnknownEntityPrefix`] for prefixes other than the five kinds
    /// - [`NostrError::TruncatedTlv`] for a TLV stream cut short
    /// - [`NostrError::MissingField`] if the primary TLV field is absent
    /// - [`NostrError::InvalidFieldLength`] for wrongly sized fixed-length fields
    /// - [`NostrError::InvalidUtf8`] for a relay hint that is not UTF-8
    pub fn decode_with_limit(input: &str, max_length: usize) -> Result<Self> {
        let decoded = bech32::decode(input, max_length)?;
        let kind = EntityKind::from_hrp(&decoded.hrp)
            .ok_or_else(|| NostrError::UnknownEntityPrefix(decoded.hrp.clone()))?;
        let payload = bech32::convert_bits(&decoded.data, 5, 8, false)?;

        match kind {
            EntityKind::Npub => fixed_32("pubkey", &payload).map(Self::Pubkey),
            EntityKind::Note => fixed_32("event id", &payload).map(Self::Note),
            EntityKind::Nprofile => {
                let records = tlv::parse(&payload)?;
                Ok(Self::Profile(ProfilePointer {
                    pubkey: required_32("pubkey", &records)?,
                    relays: relays(&records)?,
                }))
            }
            EntityKind::Nevent => {
                let records = tlv::parse(&payload)?;
                Ok(Self::Event(EventPointer {
                    id: required_32("event id", &records)?,
                    relays: relays(&records)?,
                    author: author(&records)?,
                    kind: event_kind(&records)?,
                }))
            }
            EntityKind::Naddr => {
                let records = tlv::parse(&payload)?;
                let identifier = records
                    .first(TLV_SPECIAL)
                    .ok_or(NostrError::MissingField("identifier"))?
                    .to_vec();
                Ok(Self::Address(AddressPointer {
                    identifier,
                    relays: relays(&records)?,
                    author: author(&records)?,
                    kind: event_kind(&records)?,
                }))
            }
        }
    }

    /// Decodes a `nostr:` URI.
    ///
    /// # Errors
    ///
    /// Returns [`NostrError::MalformedBech32`] if the scheme is missing, or
    /// any error of [`Self::decode`].
    pub fn from_nostr_uri(uri: &str) -> Result<Self> {
        let bech32 = uri.strip_prefix(NOSTR_URI_SCHEME).ok_or_else(|| {
            NostrError::MalformedBech32(format!("missing {NOSTR_URI_SCHEME} scheme"))
        })?;
        Self::decode(bech32)
    }
}

impl FromStr for Nip19Entity {
    type Err = NostrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

fn encode_payload(hrp: &str, payload: &[u8]) -> Result<String> {
    let groups = bech32::convert_bits(payload, 8, 5, true)?;
    bech32::encode(hrp, &groups, Variant::Bech32)
}

/// Lays out pointer fields with the primary identifier first.
fn pointer_records(
    special: &[u8],
    relays: &[String],
    author: Option<&[u8; 32]>,
    kind: Option<u32>,
) -> TlvRecords {
    let mut records = TlvRecords::new();
    records.push(TLV_SPECIAL, special);
    for relay in relays {
        records.push(TLV_RELAY, relay);
    }
    if let Some(author) = author {
        records.push(TLV_AUTHOR, author);
    }
    if let Some(kind) = kind {
        records.push(TLV_KIND, kind.to_be_bytes());
    }
    records
}

fn fixed_32(field: &'static str, bytes: &[u8]) -> Result<[u8; 32]> {
    <[u8; 32]>::try_from(bytes).map_err(|_| NostrError::InvalidFieldLength {
        field,
        expected: 32,
        actual: bytes.len(),
    })
}

fn required_32(field: &'static str, records: &TlvRecords) -> Result<[u8; 32]> {
    let value = records
        .first(TLV_SPECIAL)
        .ok_or(NostrError::MissingField(field))?;
    fixed_32(field, value)
}

fn relays(records: &TlvRecords) -> Result<Vec<String>> {
    records
        .get(TLV_RELAY)
        .iter()
        .map(|relay| String::from_utf8(relay.clone()).map_err(|_| NostrError::InvalidUtf8))
        .collect()
}

fn author(records: &TlvRecords) -> Result<Option<[u8; 32]>> {
    records
        .first(TLV_AUTHOR)
        .map(|value| fixed_32("author", value))
        .transpose()
}

fn event_kind(records: &TlvRecords) -> Result<Option<u32>> {
    records
        .first(TLV_KIND)
        .map(|value| {
            <[u8; 4]>::try_from(value)
                .map(u32::from_be_bytes)
                .map_err(|_| NostrError::InvalidFieldLength {
                    field: "kind",
                    expected: 4,
                    actual: value.len(),
                })
        })
        .transpose()
}
