//! Library configuration.

use serde::{Deserialize, Serialize};

use crate::nostr::nip19::DEFAULT_MAX_LENGTH;
use crate::nostr::{NostrError, Result};

/// Settings shared by the decoding and embed-scanning paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Longest bech32 string accepted when scanning content for embeds.
    ///
    /// BIP-173's 90-character limit is too small for TLV entities carrying
    /// relay hints, so the default is 1000.
    pub max_bech32_length: usize,

    /// Whether embed tags carry the first relay hint of their entity.
    ///
    /// The relay set is collected either way.
    pub embed_relay_hints: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            max_bech32_length: DEFAULT_MAX_LENGTH,
            embed_relay_hints: true,
        }
    }
}

impl CoreConfig {
    /// Loads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NostrError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(NostrError::from)
    }
}
