//! Arithmetic in GF(2⁸)/(x⁸ + x⁴ + x³ + x + 1), the finite field used by AES.
//!
//! Everything here is bit-at-a-time and branches on operand values, so none of
//! it is constant-time.

use core::ops;

/// Low byte of the reduction polynomial `0x11b`, folded in after a carry out of bit 7.
pub const REDUCTION_POLY: u8 = 0x1b;

/// A 4×4 matrix of field elements, stored row-major.
pub type Matrix4 = [[u8; 4]; 4];

/// Adds two field elements (bitwise XOR).
#[inline]
pub const fn field_add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplies two field elements with shift-and-reduce over all eight bits of `b`.
pub const fn field_multiply(mut a: u8, mut b: u8) -> u8 {
    let mut acc = 0u8;
    let mut bit = 0;
    while bit < 8 {
        if b & 1 != 0 {
            acc = field_add(acc, a);
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a = field_add(a, REDUCTION_POLY);
        }
        b >>= 1;
        bit += 1;
    }
    acc
}

/// Returns the multiplicative inverse of `a`, or 0 when `a == 0`.
///
/// Found by exhaustive search over the 255 nonzero candidates.
pub fn multiplicative_inverse(a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    (1..=u8::MAX)
        .find(|&candidate| field_multiply(a, candidate) == 1)
        .unwrap_or(0)
}

/// Computes `a * b` over the field.
///
/// Each output entry accumulates four products into a zeroed matrix.
pub fn matrix_multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut out = [[0u8; 4]; 4];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, entry) in out_row.iter_mut().enumerate() {
            for k in 0..4 {
                *entry = field_add(*entry, field_multiply(a[row][k], b[k][col]));
            }
        }
    }
    out
}

/// An element of GF(2⁸)/(x⁸ + x⁴ + x³ + x + 1).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct FieldElement(pub u8);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self(0);
    /// The multiplicative identity.
    pub const ONE: Self = Self(1);

    /// Returns the multiplicative inverse, mapping zero to zero.
    pub fn inverse(self) -> Self {
        Self(multiplicative_inverse(self.0))
    }
}

impl From<u8> for FieldElement {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for u8 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl ops::Add for FieldElement {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl ops::AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = field_add(self.0, rhs.0);
    }
}

impl ops::Mul for FieldElement {
    type Output = Self;

    fn mul(mut self, rhs: Self) -> Self::Output {
        self *= rhs;
        self
    }
}

impl ops::MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        self.0 = field_multiply(self.0, rhs.0);
    }
}
