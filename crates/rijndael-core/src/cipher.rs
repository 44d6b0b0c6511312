//! AES key schedule and block encryption/decryption.

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::block::Block;
use crate::key::{CipherKey, RoundKeys, MAX_ROUND_KEYS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::{forward_sbox, Substitution};

/// Round constants indexed by `i / Nk`; entry 0 is never used by the expansion.
pub const RCON: [u8; 11] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36,
];

type Word = [u8; 4];

fn rot_word(word: Word) -> Word {
    let [a, b, c, d] = word;
    [b, c, d, a]
}

fn sub_word(word: Word) -> Word {
    word.map(forward_sbox)
}

fn xor_words(lhs: Word, rhs: Word) -> Word {
    let mut out = lhs;
    for (o, r) in out.iter_mut().zip(rhs) {
        *o ^= r;
    }
    out
}

/// Expands a cipher key into `K::ROUNDS + 1` round keys.
pub fn expand_key<K: CipherKey>(key: &K) -> RoundKeys {
    let nk = K::LEN / 4;
    let total_words = 4 * (K::ROUNDS + 1);
    let mut w = [[0u8; 4]; 4 * MAX_ROUND_KEYS];

    for (word, chunk) in w.iter_mut().zip(key.as_bytes().chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(rot_word(temp));
            temp[0] ^= RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = xor_words(w[i - nk], temp);
    }

    let mut round_keys = [[0u8; 16]; MAX_ROUND_KEYS];
    for (round, round_key) in round_keys.iter_mut().take(K::ROUNDS + 1).enumerate() {
        for (word_idx, word) in w[round * 4..round * 4 + 4].iter().enumerate() {
            round_key[word_idx * 4..word_idx * 4 + 4].copy_from_slice(word);
        }
        trace!(round, "derived round key");
    }

    w.zeroize();
    debug!(variant = K::NAME, rounds = K::ROUNDS, "expanded key schedule");

    RoundKeys::new(round_keys, K::ROUNDS)
}

/// Encrypts a single 16-byte block in place with pre-expanded round keys.
pub fn encrypt_block<S: Substitution + ?Sized>(
    state: &mut Block,
    round_keys: &RoundKeys,
    sbox: &S,
) {
    let rounds = round_keys.rounds();

    add_round_key(state, round_keys.get(0));

    for round in 1..rounds {
        sub_bytes(state, sbox);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys.get(round));
    }

    sub_bytes(state, sbox);
    shift_rows(state);
    add_round_key(state, round_keys.get(rounds));
}

/// Decrypts a single 16-byte block in place with pre-expanded round keys.
pub fn decrypt_block<S: Substitution + ?Sized>(
    state: &mut Block,
    round_keys: &RoundKeys,
    sbox: &S,
) {
    let rounds = round_keys.rounds();

    add_round_key(state, round_keys.get(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state, sbox);
        add_round_key(state, round_keys.get(round));
        inv_mix_columns(state);
    }
    inv_shift_rows(state);
    inv_sub_bytes(state, sbox);
    add_round_key(state, round_keys.get(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Aes128Key, Aes192Key, Aes256Key};
    use crate::sbox::{Algebraic, SboxTable};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];

    fn sequential<const N: usize>() -> [u8; N] {
        core::array::from_fn(|i| i as u8)
    }

    fn from_hex<const N: usize>(s: &str) -> [u8; N] {
        hex::decode(s)
            .expect("valid hex")
            .try_into()
            .expect("length")
    }

    #[test]
    fn schedule_sizes() {
        let k128 = expand_key(&Aes128Key::from(sequential::<16>()));
        let k192 = expand_key(&Aes192Key::from(sequential::<24>()));
        let k256 = expand_key(&Aes256Key::from(sequential::<32>()));
        assert_eq!((k128.len(), k128.byte_len()), (11, 176));
        assert_eq!((k192.len(), k192.byte_len()), (13, 208));
        assert_eq!((k256.len(), k256.byte_len()), (15, 240));
        assert_eq!(k256.to_bytes().len(), 240);
    }

    #[test]
    fn schedule_starts_with_raw_key() {
        let raw = sequential::<32>();
        let rks = expand_key(&Aes256Key::from(raw));
        assert_eq!(&rks.to_bytes()[..32], &raw[..]);
    }

    #[test]
    fn aes128_schedule_matches_fips_appendix_a1() {
        let key = Aes128Key::from(from_hex::<16>("2b7e151628aed2a6abf7158809cf4f3c"));
        let rks = expand_key(&key);
        assert_eq!(rks.get(1), &from_hex::<16>("a0fafe1788542cb123a339392a6c7605"));
        assert_eq!(rks.get(10), &from_hex::<16>("d014f9a8c9ee2589e13f0cc8b6630ca6"));
    }

    #[test]
    fn aes256_schedule_matches_fips_appendix_a3() {
        let key = Aes256Key::from(from_hex::<32>(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        ));
        let rks = expand_key(&key);
        assert_eq!(rks.get(2), &from_hex::<16>("9ba354118e6925afa51a8b5f2067fcde"));
        assert_eq!(rks.get(14), &from_hex::<16>("fe4890d1e6188d0b046df344706c631e"));
    }

    #[test]
    fn aes256_matches_fips_appendix_c3() {
        let rks = expand_key(&Aes256Key::from(sequential::<32>()));
        let mut state = NIST_PLAIN;
        encrypt_block(&mut state, &rks, &Algebraic);
        assert_eq!(state, from_hex::<16>("8ea2b7ca516745bfeafc49904b496089"));
        decrypt_block(&mut state, &rks, &Algebraic);
        assert_eq!(state, NIST_PLAIN);
    }

    #[test]
    fn aes192_matches_fips_appendix_c2() {
        let rks = expand_key(&Aes192Key::from(sequential::<24>()));
        let mut state = NIST_PLAIN;
        encrypt_block(&mut state, &rks, &SboxTable::derive());
        assert_eq!(state, from_hex::<16>("dda97ca4864cdfe06eaf70a0ec0d7191"));
    }

    #[test]
    fn aes128_matches_fips_appendix_c1() {
        let rks = expand_key(&Aes128Key::from(sequential::<16>()));
        let mut state = NIST_PLAIN;
        encrypt_block(&mut state, &rks, &SboxTable::derive());
        assert_eq!(state, from_hex::<16>("69c4e0d86a7b0430d8cdb78070b4c55a"));
        decrypt_block(&mut state, &rks, &SboxTable::derive());
        assert_eq!(state, NIST_PLAIN);
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let table = SboxTable::derive();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 32];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let rks = expand_key(&Aes256Key::from(key_bytes));
            let mut state = block;
            encrypt_block(&mut state, &rks, &table);
            decrypt_block(&mut state, &rks, &table);
            assert_eq!(state, block);
        }
    }
}
