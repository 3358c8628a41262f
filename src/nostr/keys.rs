//! Secret-key handling for signing Nostr events.
//!
//! Keys are built from a raw 32-byte secp256k1 secret. The x-only public key
//! is derived once and cached; the secret bytes are zeroized on drop.

use std::sync::LazyLock;

use nostr::secp256k1::{Keypair, Message, Secp256k1, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::nostr::error::{NostrError, Result};

/// Global secp256k1 context for signing and verification.
///
/// Creating a `Secp256k1` context precomputes tables, so one shared context
/// is initialized lazily and reused. The context is `Send + Sync`.
pub static SECP: LazyLock<Secp256k1<nostr::secp256k1::All>> = LazyLock::new(Secp256k1::new);

/// Decodes a hex string into a fixed-size byte array.
pub(crate) fn decode_hex<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(value)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| NostrError::InvalidFieldLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// A secp256k1 secret key with its cached x-only public key.
///
/// # Example
///
/// ```
/// use nostr_id_core::nostr::SigningKeys;
///
/// let mut bytes = [0u8; 32];
/// bytes[31] = 1;
/// let keys = SigningKeys::from_bytes(bytes).unwrap();
/// assert_eq!(
///     keys.pubkey_hex(),
///     "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
/// );
/// ```
#[derive(ZeroizeOnDrop)]
pub struct SigningKeys {
    /// The secret key bytes (zeroized on drop)
    secret_bytes: [u8; 32],

    /// Cached public key bytes (not sensitive, skip zeroization)
    #[zeroize(skip)]
    pubkey_bytes: [u8; 32],
}

impl SigningKeys {
    /// Generates a new random key using the operating system's RNG.
    #[must_use]
    pub fn generate() -> Self {
        let keys = nostr::Keys::generate();

        Self {
            secret_bytes: keys.secret_key().secret_bytes(),
            pubkey_bytes: keys.public_key().to_bytes(),
        }
    }

    /// Creates keys from raw secret key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`NostrError::KeyDerivation`] if the bytes are zero or not
    /// below the curve order.
    pub fn from_bytes(secret_bytes: [u8; 32]) -> Result<Self> {
        let secret_key = SecretKey::from_slice(&secret_bytes)
            .map_err(|e| NostrError::KeyDerivation(e.to_string()))?;
        let keypair = Keypair::from_secret_key(&SECP, &secret_key);
        let (public_key, _parity) = keypair.x_only_public_key();

        Ok(Self {
            secret_bytes,
            pubkey_bytes: public_key.serialize(),
        })
    }

    /// Creates keys from a 64-character hex secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed, not 32 bytes, or not a
    /// valid secret key.
    pub fn from_hex(secret_hex: &str) -> Result<Self> {
        let mut secret_bytes = decode_hex::<32>("secret key", secret_hex.trim())?;
        let keys = Self::from_bytes(secret_bytes);
        secret_bytes.zeroize();
        keys
    }

    /// Returns the x-only public key as 64 lowercase hex characters.
    ///
    /// This is the format used in the `pubkey` field of events.
    #[must_use]
    pub fn pubkey_hex(&self) -> String {
        hex::encode(self.pubkey_bytes)
    }

    /// Returns the x-only public key bytes.
    #[must_use]
    pub const fn pubkey_bytes(&self) -> [u8; 32] {
        self.pubkey_bytes
    }

    /// Signs a 32-byte message (an event id) with BIP-340 Schnorr.
    ///
    /// No auxiliary randomness is mixed into the nonce, so the same key and
    /// message always produce the same signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored secret can no longer be parsed.
    pub fn sign(&self, message: &[u8; 32]) -> Result<[u8; 64]> {
        let mut secret_bytes_copy = self.secret_bytes;

        let result = SecretKey::from_slice(&secret_bytes_copy)
            .map_err(|e| NostrError::KeyDerivation(e.to_string()))
            .map(|secret_key| {
                let keypair = Keypair::from_secret_key(&SECP, &secret_key);
                let message = Message::from_digest(*message);
                SECP.sign_schnorr_no_aux_rand(&message, &keypair).serialize()
            });

        secret_bytes_copy.zeroize();

        result
    }
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret key
        f.debug_struct("SigningKeys")
            .field("pubkey", &self.pubkey_hex())
            .finish()
    }
}
