//! AES round transformations, each applied to the state in place.

use crate::block::{from_matrix, to_matrix, xor_in_place, Block};
use crate::gf::{matrix_multiply, Matrix4};
use crate::sbox::Substitution;

/// MixColumns coefficients.
pub const MIX_COLUMNS_MATRIX: Matrix4 = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// InvMixColumns coefficients, the field inverse of [`MIX_COLUMNS_MATRIX`].
pub const INV_MIX_COLUMNS_MATRIX: Matrix4 = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes<S: Substitution + ?Sized>(state: &mut Block, sbox: &S) {
    for byte in state.iter_mut() {
        *byte = sbox.forward(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes<S: Substitution + ?Sized>(state: &mut Block, sbox: &S) {
    for byte in state.iter_mut() {
        *byte = sbox.inverse(*byte);
    }
}

fn rotate_rows(state: &mut Block, rotate: fn(&mut [u8; 4], usize)) {
    for row in 1..4 {
        let mut bytes = [state[row], state[row + 4], state[row + 8], state[row + 12]];
        rotate(&mut bytes, row);
        for (col, byte) in bytes.into_iter().enumerate() {
            state[row + 4 * col] = byte;
        }
    }
}

/// Performs ShiftRows: row `r` rotates left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut Block) {
    rotate_rows(state, |row, n| row.rotate_left(n));
}

/// Performs the inverse of ShiftRows: row `r` rotates right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    rotate_rows(state, |row, n| row.rotate_right(n));
}

fn mix_with(state: &mut Block, matrix: &Matrix4) {
    let mixed = matrix_multiply(matrix, &to_matrix(state));
    from_matrix(state, &mixed);
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    mix_with(state, &MIX_COLUMNS_MATRIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    mix_with(state, &INV_MIX_COLUMNS_MATRIX);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbox::{Algebraic, SboxTable};

    fn block(hex_str: &str) -> Block {
        hex::decode(hex_str)
            .expect("valid hex")
            .try_into()
            .expect("16 bytes")
    }

    // Intermediate states from FIPS-197 Appendix B, round 1.
    const START: &str = "193de3bea0f4e22b9ac68d2ae9f84808";
    const AFTER_SUB: &str = "d42711aee0bf98f1b8b45de51e415230";
    const AFTER_SHIFT: &str = "d4bf5d30e0b452aeb84111f11e2798e5";
    const AFTER_MIX: &str = "046681e5e0cb199a48f8d37a2806264c";

    #[test]
    fn sub_bytes_matches_fips_appendix_b() {
        let mut state = block(START);
        sub_bytes(&mut state, &Algebraic);
        assert_eq!(state, block(AFTER_SUB));
        inv_sub_bytes(&mut state, &SboxTable::derive());
        assert_eq!(state, block(START));
    }

    #[test]
    fn shift_rows_matches_fips_appendix_b() {
        let mut state = block(AFTER_SUB);
        shift_rows(&mut state);
        assert_eq!(state, block(AFTER_SHIFT));
        inv_shift_rows(&mut state);
        assert_eq!(state, block(AFTER_SUB));
    }

    #[test]
    fn shift_rows_moves_every_row_by_its_index() {
        let mut state: Block = core::array::from_fn(|i| i as u8);
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
    }

    #[test]
    fn mix_columns_matches_fips_appendix_b() {
        let mut state = block(AFTER_SHIFT);
        mix_columns(&mut state);
        assert_eq!(state, block(AFTER_MIX));
        inv_mix_columns(&mut state);
        assert_eq!(state, block(AFTER_SHIFT));
    }

    #[test]
    fn mix_matrices_are_inverse() {
        let identity: Matrix4 = [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]];
        assert_eq!(
            matrix_multiply(&MIX_COLUMNS_MATRIX, &INV_MIX_COLUMNS_MATRIX),
            identity
        );
    }

    #[test]
    fn add_round_key_twice_restores_state() {
        let original = block(START);
        let key = block("a0fafe1788542cb123a339392a6c7605");
        let mut state = original;
        add_round_key(&mut state, &key);
        assert_ne!(state, original);
        add_round_key(&mut state, &key);
        assert_eq!(state, original);
    }
}
