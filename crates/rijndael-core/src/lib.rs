//! AES (Rijndael) block cipher built from first principles.
//!
//! Nothing here is a precomputed constant table: the S-boxes come from
//! multiplicative inverses in GF(2⁸) and the affine transform, and column
//! mixing is a matrix product over the same field. This crate provides:
//! - GF(2⁸) arithmetic and the algebraic S-box derivation.
//! - Key schedules for AES-128, AES-192 and AES-256 (the default).
//! - Single-block encryption and decryption through [`CipherContext`].
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod context;
mod error;
pub mod gf;
mod key;
pub mod round;
mod sbox;

pub use crate::block::{xor_in_place, Block};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, RCON};
pub use crate::context::{init, Aes128, Aes192, Aes256, CipherContext};
pub use crate::error::{Error, Result};
pub use crate::key::{Aes128Key, Aes192Key, Aes256Key, CipherKey, RoundKeys, MAX_ROUND_KEYS};
pub use crate::sbox::{forward_sbox, inverse_sbox, Algebraic, SboxTable, Substitution};
