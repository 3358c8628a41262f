//! Type-length-value records as used inside NIP-19 entities.
//!
//! Each record is `[type: u8, length: u8, value: [u8; length]]`. A type may
//! repeat (multiple relay hints), so records are grouped per type while
//! keeping both the order types first appear in and the order of values.

use indexmap::IndexMap;

use crate::nostr::error::{NostrError, Result};

/// Primary identifier: pubkey, event id, or addressable identifier.
pub const TLV_SPECIAL: u8 = 0x00;

/// Relay hint (UTF-8 URL, repeatable).
pub const TLV_RELAY: u8 = 0x01;

/// Author pubkey (32 bytes).
pub const TLV_AUTHOR: u8 = 0x02;

/// Event kind (4 bytes, big-endian).
pub const TLV_KIND: u8 = 0x03;

/// Largest value a single-byte length field can describe.
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// An ordered set of TLV records, grouped by type.
///
/// # Example
///
/// ```
/// use nostr_id_core::nostr::tlv::{self, TlvRecords, TLV_RELAY, TLV_SPECIAL};
///
/// let mut records = TlvRecords::new();
/// records.push(TLV_SPECIAL, [0xabu8; 32]);
/// records.push(TLV_RELAY, "wss://relay.example.com");
///
/// let bytes = tlv::encode(&records).unwrap();
/// assert_eq!(tlv::parse(&bytes).unwrap(), records);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvRecords {
    records: IndexMap<u8, Vec<Vec<u8>>>,
}

impl TlvRecords {
    /// Creates an empty record set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for `tlv_type`, after any existing values of that type.
    pub fn push(&mut self, tlv_type: u8, value: impl AsRef<[u8]>) {
        self.records
            .entry(tlv_type)
            .or_default()
            .push(value.as_ref().to_vec());
    }

    /// All values of `tlv_type`, in order. Empty if the type is absent.
    #[must_use]
    pub fn get(&self, tlv_type: u8) -> &[Vec<u8>] {
        self.records.get(&tlv_type).map_or(&[], Vec::as_slice)
    }

    /// The first value of `tlv_type`, if any.
    #[must_use]
    pub fn first(&self, tlv_type: u8) -> Option<&[u8]> {
        self.get(tlv_type).first().map(Vec::as_slice)
    }

    /// Returns true if at least one value of `tlv_type` is present.
    #[must_use]
    pub fn contains(&self, tlv_type: u8) -> bool {
        !self.get(tlv_type).is_empty()
    }

    /// Returns true if no values are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over `(type, values)` in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Vec<u8>])> {
        self.records
            .iter()
            .map(|(&tlv_type, values)| (tlv_type, values.as_slice()))
    }
}

/// Parses a byte buffer into TLV records.
///
/// # Errors
///
/// Returns [`NostrError::TruncatedTlv`] if a type byte, length byte or value
/// runs past the end of the buffer.
pub fn parse(bytes: &[u8]) -> Result<TlvRecords> {
    let mut records = TlvRecords::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let (Some(&tlv_type), Some(&len)) = (bytes.get(offset), bytes.get(offset + 1)) else {
            return Err(NostrError::TruncatedTlv { offset });
        };
        let start = offset + 2;
        let end = start + usize::from(len);
        let value = bytes
            .get(start..end)
            .ok_or(NostrError::TruncatedTlv { offset })?;

        records.push(tlv_type, value);
        offset = end;
    }

    Ok(records)
}

/// Serializes records in iteration order: every value of the first type,
/// then every value of the next type, and so on.
///
/// # Errors
///
/// Returns [`NostrError::TlvValueTooLong`] if any value exceeds
/// [`MAX_VALUE_LEN`] bytes.
pub fn encode(records: &TlvRecords) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    for (tlv_type, values) in records.iter() {
        for value in values {
            let len = u8::try_from(value.len()).map_err(|_| NostrError::TlvValueTooLong {
                tlv_type,
                len: value.len(),
            })?;
            out.push(tlv_type);
            out.push(len);
            out.extend_from_slice(value);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_buffer() {
        let records = parse(&[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parse_repeated_types_keep_order() {
        let bytes = [1, 1, b'a', 0, 2, 9, 9, 1, 2, b'b', b'c'];
        let records = parse(&bytes).unwrap();

        assert_eq!(records.get(TLV_RELAY), &[b"a".to_vec(), b"bc".to_vec()]);
        assert_eq!(records.first(TLV_SPECIAL), Some(&[9u8, 9][..]));
        let order: Vec<u8> = records.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec![TLV_RELAY, TLV_SPECIAL]);
    }

    #[test]
    fn parse_zero_length_value() {
        let records = parse(&[3, 0]).unwrap();
        assert_eq!(records.get(TLV_KIND), &[Vec::<u8>::new()]);
    }

    #[test]
    fn parse_rejects_missing_length_byte() {
        let err = parse(&[0, 1, 7, 1]).unwrap_err();
        assert!(matches!(err, NostrError::TruncatedTlv { offset: 3 }));
    }

    #[test]
    fn parse_rejects_value_past_end() {
        let err = parse(&[0, 32, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, NostrError::TruncatedTlv { offset: 0 }));
    }

    #[test]
    fn get_absent_type_is_empty() {
        let records = TlvRecords::new();
        assert!(records.get(TLV_AUTHOR).is_empty());
        assert_eq!(records.first(TLV_AUTHOR), None);
        assert!(!records.contains(TLV_AUTHOR));
    }

    #[test]
    fn encode_emits_in_insertion_order() {
        let mut records = TlvRecords::new();
        records.push(TLV_SPECIAL, [0xaau8]);
        records.push(TLV_RELAY, "r1");
        records.push(TLV_RELAY, "r2");
        records.push(TLV_KIND, 1u32.to_be_bytes());

        let bytes = encode(&records).unwrap();
        assert_eq!(
            bytes,
            vec![0, 1, 0xaa, 1, 2, b'r', b'1', 1, 2, b'r', b'2', 3, 4, 0, 0, 0, 1]
        );
    }

    #[test]
    fn later_values_join_their_type_position() {
        let mut records = TlvRecords::new();
        records.push(TLV_SPECIAL, [1u8]);
        records.push(TLV_AUTHOR, [2u8]);
        records.push(TLV_SPECIAL, [3u8]);

        assert_eq!(encode(&records).unwrap(), vec![0, 1, 1, 0, 1, 3, 2, 1, 2]);
    }

    #[test]
    fn encode_accepts_max_length_value() {
        let mut records = TlvRecords::new();
        records.push(TLV_SPECIAL, vec![b'x'; MAX_VALUE_LEN]);
        let bytes = encode(&records).unwrap();
        assert_eq!(bytes.len(), MAX_VALUE_LEN + 2);
        assert_eq!(bytes[1], 255);
    }

    #[test]
    fn encode_rejects_oversized_value() {
        let mut records = TlvRecords::new();
        records.push(TLV_RELAY, vec![b'x'; MAX_VALUE_LEN + 1]);
        let err = encode(&records).unwrap_err();
        assert!(matches!(
            err,
            NostrError::TlvValueTooLong {
                tlv_type: TLV_RELAY,
                len: 256
            }
        ));
    }
}
