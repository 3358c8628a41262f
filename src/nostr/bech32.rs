//! Bech32 string codec (BIP-173, with the BIP-350 "bech32m" constant).
//!
//! A thin layer over the [`bech32`](::bech32) crate. Payloads are carried as
//! 5-bit groups, one group per `u8`. Use [`convert_bits`] to regroup raw bytes
//! into groups before encoding and back into bytes after decoding.
//!
//! # Example
//!
//! ```
//! use nostr_id_core::nostr::bech32::{self, Variant};
//!
//! let groups = bech32::convert_bits(&[0xde, 0xad], 8, 5, true).unwrap();
//! let encoded = bech32::encode("test", &groups, Variant::Bech32).unwrap();
//! let decoded = bech32::decode(&encoded, 90).unwrap();
//!
//! assert_eq!(decoded.hrp, "test");
//! assert_eq!(decoded.variant, Variant::Bech32);
//! assert_eq!(bech32::convert_bits(&decoded.data, 5, 8, false).unwrap(), vec![0xde, 0xad]);
//! ```

use ::bech32::u5;

use crate::nostr::error::{NostrError, Result};

/// Checksum variant: `Bech32` (BIP-173, used by NIP-19) or `Bech32m` (BIP-350).
pub use ::bech32::Variant;

/// The 32-symbol bech32 alphabet, indexed by group value.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the human-readable prefix and the data part.
pub const SEPARATOR: char = '1';

/// Maximum length accepted by BIP-173 for segwit addresses.
///
/// NIP-19 entities with TLV payloads routinely exceed this, so callers
/// decoding Nostr identifiers pass a larger limit.
pub const BIP173_MAX_LENGTH: usize = 90;

/// A successfully decoded bech32 string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Human-readable prefix, lowercased.
    pub hrp: String,
    /// Data part as 5-bit groups, checksum stripped.
    pub data: Vec<u8>,
    /// Which checksum constant matched.
    pub variant: Variant,
}

fn malformed(err: ::bech32::Error) -> NostrError {
    NostrError::MalformedBech32(err.to_string())
}

/// Encodes 5-bit groups under a human-readable prefix.
///
/// The prefix is lowercased; the output is always lowercase.
///
/// # Errors
///
/// Returns [`NostrError::MalformedBech32`] if the prefix is empty, contains a
/// character outside printable ASCII or the separator, or if any data value
/// does not fit in 5 bits.
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> Result<String> {
    // Decoding splits at the last '1'.
    if hrp.contains(SEPARATOR) {
        return Err(NostrError::MalformedBech32(
            "prefix contains the separator".to_string(),
        ));
    }
    let groups = data
        .iter()
        .map(|&group| u5::try_from_u8(group))
        .collect::<std::result::Result<Vec<u5>, _>>()
        .map_err(malformed)?;

    ::bech32::encode(&hrp.to_ascii_lowercase(), groups, variant).map_err(malformed)
}

/// Decodes a bech32 string, accepting either checksum variant.
///
/// The input may be all-lowercase or all-uppercase, never mixed. The separator
/// is the last `1` in the string, so the prefix itself may contain `1`.
///
/// # Errors
///
/// Returns [`NostrError::MalformedBech32`] if the input is longer than
/// `max_length`, contains non-printable characters or mixed case, has no
/// separator, an empty prefix, a data part shorter than the checksum, a symbol
/// outside the alphabet, or a checksum that matches neither variant.
pub fn decode(input: &str, max_length: usize) -> Result<Decoded> {
    if input.len() > max_length {
        return Err(NostrError::MalformedBech32(format!(
            "length {} exceeds limit {max_length}",
            input.len()
        )));
    }
    let has_lower = input.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = input.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(NostrError::MalformedBech32("mixed case".to_string()));
    }

    let (hrp, groups, variant) = ::bech32::decode(input).map_err(malformed)?;
    Ok(Decoded {
        hrp,
        data: groups.into_iter().map(u5::to_u8).collect(),
        variant,
    })
}

/// Regroups a sequence of `from_bits`-wide values into `to_bits`-wide values.
///
/// With `pad`, a trailing partial group is zero-filled. Without it, leftover
/// bits must be fewer than `from_bits` and all zero.
///
/// # Errors
///
/// Returns [`NostrError::MalformedBech32`] if a bit width is outside `1..=8`,
/// an input value does not fit in `from_bits`, or (without padding) non-zero
/// bits would be dropped.
pub fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> Result<Vec<u8>> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(NostrError::MalformedBech32(format!(
            "unsupported bit widths {from_bits} -> {to_bits}"
        )));
    }
    ::bech32::convert_bits(data, from_bits, to_bits, pad).map_err(malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_bip173_valid_vectors() {
        for valid in [
            "A12UEL5L",
            "a12uel5l",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
            "?1ezyfcl",
        ] {
            let decoded = decode(valid, BIP173_MAX_LENGTH)
                .unwrap_or_else(|e| panic!("{valid} should decode: {e}"));
            assert_eq!(decoded.variant, Variant::Bech32, "{valid}");
        }
    }

    #[test]
    fn decode_bech32m_vectors() {
        for valid in ["a1lqfn3a", "A1LQFN3A"] {
            let decoded = decode(valid, BIP173_MAX_LENGTH).unwrap();
            assert_eq!(decoded.hrp, "a");
            assert!(decoded.data.is_empty());
            assert_eq!(decoded.variant, Variant::Bech32m);
        }
    }

    #[test]
    fn decode_bip173_invalid_vectors() {
        for invalid in [
            "x1b4n0q5v",     // invalid data symbol
            "pzry9x0s0muk",  // no separator
            "1pzry9x0s0muk", // empty prefix
            "li1dgmt3",      // checksum too short
            "A1G7SGD8",      // checksum computed over uppercase prefix
            "10a06t8",       // empty prefix
            "1qzzfhee",      // empty prefix
        ] {
            assert!(
                matches!(
                    decode(invalid, BIP173_MAX_LENGTH),
                    Err(NostrError::MalformedBech32(_))
                ),
                "{invalid} should be rejected"
            );
        }
    }

    #[test]
    fn decode_rejects_mixed_case() {
        let err = decode("A12uEL5L", BIP173_MAX_LENGTH).unwrap_err();
        assert_eq!(err.to_string(), "Malformed bech32: mixed case");
    }

    #[test]
    fn decode_rejects_oversized_input() {
        let valid = "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw";
        assert!(decode(valid, valid.len()).is_ok());
        assert!(decode(valid, valid.len() - 1).is_err());
    }

    #[test]
    fn decode_rejects_non_printable() {
        assert!(decode("a1 2uel5l", BIP173_MAX_LENGTH).is_err());
        assert!(decode("\u{7f}1axkwrx", BIP173_MAX_LENGTH).is_err());
    }

    #[test]
    fn decode_uppercase_lowercases_prefix() {
        let decoded = decode("A12UEL5L", BIP173_MAX_LENGTH).unwrap();
        assert_eq!(decoded.hrp, "a");
    }

    #[test]
    fn decode_accepts_long_input_under_configured_limit() {
        let groups = vec![0u8; 400];
        let encoded = encode("naddr", &groups, Variant::Bech32).unwrap();
        assert!(encoded.len() > BIP173_MAX_LENGTH);
        assert_eq!(decode(&encoded, 1000).unwrap().data, groups);
    }

    #[test]
    fn encode_full_charset() {
        let data: Vec<u8> = (0..32).collect();
        let encoded = encode("abcdef", &data, Variant::Bech32).unwrap();
        assert_eq!(encoded, "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw");
    }

    #[test]
    fn encode_empty_data_matches_vectors() {
        assert_eq!(encode("a", &[], Variant::Bech32).unwrap(), "a12uel5l");
        assert_eq!(encode("a", &[], Variant::Bech32m).unwrap(), "a1lqfn3a");
    }

    #[test]
    fn encode_lowercases_prefix() {
        assert_eq!(encode("A", &[], Variant::Bech32).unwrap(), "a12uel5l");
    }

    #[test]
    fn encode_rejects_invalid_prefix() {
        assert!(encode("", &[], Variant::Bech32).is_err());
        assert!(encode("a1b", &[], Variant::Bech32).is_err());
        assert!(encode("with space", &[], Variant::Bech32).is_err());
    }

    #[test]
    fn encode_rejects_wide_groups() {
        let err = encode("a", &[32], Variant::Bech32).unwrap_err();
        assert!(matches!(err, NostrError::MalformedBech32(_)));
    }

    #[test]
    fn decode_reports_variant_of_encoding() {
        let data = [3u8, 1, 4, 1, 5];
        for variant in [Variant::Bech32, Variant::Bech32m] {
            let encoded = encode("pi", &data, variant).unwrap();
            let decoded = decode(&encoded, BIP173_MAX_LENGTH).unwrap();
            assert_eq!(decoded.variant, variant);
            assert_eq!(decoded.data, data);
        }
    }

    #[test]
    fn convert_bits_pads_final_group() {
        assert_eq!(convert_bits(&[0xff], 8, 5, true).unwrap(), vec![31, 28]);
    }

    #[test]
    fn convert_bits_rejects_nonzero_dropped_bits() {
        assert!(convert_bits(&[0xff], 8, 5, false).is_err());
        assert!(convert_bits(&[31, 31], 5, 8, false).is_err());
    }

    #[test]
    fn convert_bits_accepts_zero_padding_without_pad() {
        let groups = convert_bits(&[0x00, 0x01], 8, 5, true).unwrap();
        assert_eq!(convert_bits(&groups, 5, 8, false).unwrap(), vec![0x00, 0x01]);
    }

    #[test]
    fn convert_bits_rejects_out_of_range_values() {
        assert!(convert_bits(&[32], 5, 8, true).is_err());
    }

    #[test]
    fn convert_bits_rejects_bad_widths() {
        assert!(convert_bits(&[1], 0, 5, true).is_err());
        assert!(convert_bits(&[1], 8, 9, true).is_err());
    }

    #[test]
    fn convert_bits_empty_input() {
        assert!(convert_bits(&[], 8, 5, true).unwrap().is_empty());
        assert!(convert_bits(&[], 5, 8, false).unwrap().is_empty());
    }
}
