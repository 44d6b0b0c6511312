//! Cipher context: an expanded key schedule plus derived S-box tables.

use core::fmt;
use core::marker::PhantomData;

use tracing::debug;

use crate::block::Block;
use crate::cipher::{decrypt_block, encrypt_block, expand_key};
use crate::error::Result;
use crate::key::{Aes128Key, Aes192Key, Aes256Key, CipherKey, RoundKeys};
use crate::sbox::SboxTable;

/// Expanded cipher state for one key.
///
/// A context only exists once its key schedule has been expanded, and it is
/// never mutated afterwards, so one instance can serve any number of threads
/// encrypting or decrypting their own blocks.
#[derive(Clone)]
pub struct CipherContext<K: CipherKey = Aes256Key> {
    round_keys: RoundKeys,
    sbox: SboxTable,
    _variant: PhantomData<fn() -> K>,
}

/// AES-128 context.
pub type Aes128 = CipherContext<Aes128Key>;
/// AES-192 context.
pub type Aes192 = CipherContext<Aes192Key>;
/// AES-256 context.
pub type Aes256 = CipherContext<Aes256Key>;

/// Builds an AES-256 context from a raw 32-byte key.
pub fn init(raw_key: &[u8]) -> Result<Aes256> {
    Aes256::init(raw_key)
}

impl<K: CipherKey> CipherContext<K> {
    /// Builds a context from raw key bytes, which must be exactly `K::LEN` long.
    pub fn init(raw_key: &[u8]) -> Result<Self> {
        let key = K::from_slice(raw_key)?;
        Ok(Self::new(&key))
    }

    /// Builds a context from a typed key.
    pub fn new(key: &K) -> Self {
        let round_keys = expand_key(key);
        let sbox = SboxTable::derive();
        debug!(variant = K::NAME, "initialized cipher context");
        Self {
            round_keys,
            sbox,
            _variant: PhantomData,
        }
    }

    /// Encrypts one block in place.
    #[inline]
    pub fn encrypt_block(&self, state: &mut Block) {
        encrypt_block(state, &self.round_keys, &self.sbox);
    }

    /// Decrypts one block in place.
    #[inline]
    pub fn decrypt_block(&self, state: &mut Block) {
        decrypt_block(state, &self.round_keys, &self.sbox);
    }

    /// The expanded key schedule.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Number of cipher rounds.
    pub fn rounds(&self) -> usize {
        K::ROUNDS
    }
}

impl<K: CipherKey> fmt::Debug for CipherContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherContext")
            .field("variant", &K::NAME)
            .field("rounds", &K::ROUNDS)
            .finish_non_exhaustive()
    }
}
