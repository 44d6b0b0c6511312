//! Key types for AES-128, AES-192 and AES-256.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;
use crate::error::{Error, Result};

/// Round keys needed by the largest variant (AES-256: 14 rounds + 1).
pub const MAX_ROUND_KEYS: usize = 15;

/// A raw cipher key of fixed length.
///
/// The implementing type selects the variant at compile time: its length fixes
/// `Nk` and its round count fixes `Nr`.
pub trait CipherKey: Clone + Zeroize {
    /// Key length in bytes.
    const LEN: usize;
    /// Number of cipher rounds (`Nr`).
    const ROUNDS: usize;
    /// Human-readable variant name.
    const NAME: &'static str;

    /// Raw key bytes.
    fn as_bytes(&self) -> &[u8];

    /// Builds a key from a slice, rejecting any other length.
    fn from_slice(bytes: &[u8]) -> Result<Self>;
}

macro_rules! cipher_key {
    ($(#[$meta:meta])* $name:ident, $len:literal, $rounds:literal, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
        pub struct $name(pub [u8; $len]);

        impl From<[u8; $len]> for $name {
            fn from(value: [u8; $len]) -> Self {
                Self(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = Error;

            fn try_from(bytes: &[u8]) -> Result<Self> {
                <Self as CipherKey>::from_slice(bytes)
            }
        }

        impl CipherKey for $name {
            const LEN: usize = $len;
            const ROUNDS: usize = $rounds;
            const NAME: &'static str = $label;

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            fn from_slice(bytes: &[u8]) -> Result<Self> {
                let raw: [u8; $len] = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                    expected: $len,
                    actual: bytes.len(),
                })?;
                Ok(Self(raw))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(..)"))
            }
        }
    };
}

cipher_key!(
    /// AES-128 key (10 rounds).
    Aes128Key, 16, 10, "AES-128"
);
cipher_key!(
    /// AES-192 key (12 rounds).
    Aes192Key, 24, 12, "AES-192"
);
cipher_key!(
    /// AES-256 key (14 rounds).
    Aes256Key, 32, 14, "AES-256"
);

/// Expanded round keys; round key `r` is bytes `[16 * r, 16 * r + 16)` of the schedule.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    rounds: usize,
}

impl RoundKeys {
    pub(crate) fn new(keys: [Block; MAX_ROUND_KEYS], rounds: usize) -> Self {
        Self { keys, rounds }
    }

    /// Returns the round key at the requested index (`0..=rounds`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.keys[round]
    }

    /// Number of cipher rounds (`Nr`).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of round keys in the schedule (`Nr + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.rounds + 1
    }

    /// Always false: a schedule holds at least one round key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the round keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.keys[..self.len()].iter()
    }

    /// Size of the schedule in bytes (`(Nr + 1) * 16`).
    pub fn byte_len(&self) -> usize {
        self.len() * 16
    }

    /// Copies the schedule into a flat byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.iter().flatten().copied().collect()
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}
