//! Error type for cipher construction.

use thiserror::Error;

/// Errors raised while building a cipher context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The raw key does not match the key length of the selected variant.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Key length required by the variant.
        expected: usize,
        /// Length of the supplied key.
        actual: usize,
    },
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
