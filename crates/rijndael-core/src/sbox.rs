//! Algebraic derivation of the AES substitution boxes.

use crate::gf::multiplicative_inverse;

const SBOX_CONSTANT: u8 = 0x63;
const INV_SBOX_CONSTANT: u8 = 0x05;

/// Forward S-box: multiplicative inverse followed by the affine transform.
pub fn forward_sbox(x: u8) -> u8 {
    if x == 0 {
        return SBOX_CONSTANT;
    }
    let inv = multiplicative_inverse(x);
    inv ^ inv.rotate_left(1)
        ^ inv.rotate_left(2)
        ^ inv.rotate_left(3)
        ^ inv.rotate_left(4)
        ^ SBOX_CONSTANT
}

/// Inverse S-box: undo the affine transform, then invert in the field.
pub fn inverse_sbox(y: u8) -> u8 {
    let undone = y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6) ^ INV_SBOX_CONSTANT;
    multiplicative_inverse(undone)
}

/// Byte substitution used by the round transformations.
pub trait Substitution {
    /// Maps a byte through the forward S-box.
    fn forward(&self, x: u8) -> u8;

    /// Maps a byte through the inverse S-box.
    fn inverse(&self, y: u8) -> u8;
}

/// Computes every substitution from scratch.
#[derive(Clone, Copy, Debug, Default)]
pub struct Algebraic;

impl Substitution for Algebraic {
    #[inline]
    fn forward(&self, x: u8) -> u8 {
        forward_sbox(x)
    }

    #[inline]
    fn inverse(&self, y: u8) -> u8 {
        inverse_sbox(y)
    }
}

/// Both S-boxes evaluated once for all 256 inputs.
#[derive(Clone, PartialEq, Eq)]
pub struct SboxTable {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl SboxTable {
    /// Derives both tables from [`forward_sbox`] and [`inverse_sbox`].
    pub fn derive() -> Self {
        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];
        for (x, (fwd, inv)) in forward.iter_mut().zip(inverse.iter_mut()).enumerate() {
            *fwd = forward_sbox(x as u8);
            *inv = inverse_sbox(x as u8);
        }
        Self { forward, inverse }
    }

    /// The forward table, indexed by input byte.
    pub fn forward_table(&self) -> &[u8; 256] {
        &self.forward
    }

    /// The inverse table, indexed by input byte.
    pub fn inverse_table(&self) -> &[u8; 256] {
        &self.inverse
    }
}

impl Default for SboxTable {
    fn default() -> Self {
        Self::derive()
    }
}

impl core::fmt::Debug for SboxTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SboxTable").finish_non_exhaustive()
    }
}

impl Substitution for SboxTable {
    #[inline]
    fn forward(&self, x: u8) -> u8 {
        self.forward[x as usize]
    }

    #[inline]
    fn inverse(&self, y: u8) -> u8 {
        self.inverse[y as usize]
    }
}
