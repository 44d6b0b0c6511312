//! Block representation helpers.

use crate::gf::Matrix4;

/// AES block of 16 bytes, column-major: byte `r + 4 * c` is row `r`, column `c`.
pub type Block = [u8; 16];

/// XORs `rhs` into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Reads the state as a row-major 4×4 matrix.
#[inline]
pub(crate) fn to_matrix(state: &Block) -> Matrix4 {
    let mut m = [[0u8; 4]; 4];
    for (row, m_row) in m.iter_mut().enumerate() {
        for (col, entry) in m_row.iter_mut().enumerate() {
            *entry = state[row + 4 * col];
        }
    }
    m
}

/// Writes a row-major 4×4 matrix back into the column-major state.
#[inline]
pub(crate) fn from_matrix(state: &mut Block, m: &Matrix4) {
    for (row, m_row) in m.iter().enumerate() {
        for (col, entry) in m_row.iter().enumerate() {
            state[row + 4 * col] = *entry;
        }
    }
}
