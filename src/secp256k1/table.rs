//! Fixed-base comb table: precomputed multiples of the generator used by
//! `ecmult_gen` for constant-time scalar multiplication.
//!
//! The table covers 64 nibble (radix-16) windows across a 256-bit scalar.
//! Window `i` holds the 15 nonzero points `d * 16^i * G` for `d in 1..=15`;
//! entry `0` of each window is the point at infinity, selected when that
//! window's digit is zero. Building the table only ever multiplies the
//! public generator by small constants, so it freely uses the
//! variable-time group operations.

use crate::secp256k1::group::{generator, Affine, Jacobian};

pub const WINDOWS: usize = 64;
pub const DIGITS: usize = 16;

pub type CombTable = Vec<[Affine; DIGITS]>;

pub fn build_comb_table() -> CombTable {
    let mut table = Vec::with_capacity(WINDOWS);
    let mut base = generator();

    for _ in 0..WINDOWS {
        let mut window = [Affine::set_infinity(); DIGITS];
        let mut acc = Jacobian::set_ge(&base);
        window[1] = base;
        for d in 2..DIGITS {
            acc = acc.add_ge_var(&base);
            window[d] = acc.to_affine_var();
        }
        table.push(window);

        let mut jac = Jacobian::set_ge(&base);
        for _ in 0..4 {
            jac = jac.double_var();
        }
        base = jac.to_affine_var();
    }

    table
}

/// Returns the 64 radix-16 digits of `b32` (big-endian 256-bit value),
/// ordered from the least-significant nibble (`digits[0]`) to the
/// most-significant (`digits[63]`).
pub fn nibbles_le(b32: &[u8; 32]) -> [u8; WINDOWS] {
    let mut digits = [0u8; WINDOWS];
    for i in 0..WINDOWS {
        let byte = b32[31 - i / 2];
        digits[i] = if i % 2 == 0 { byte & 0xF } else { byte >> 4 };
    }
    digits
}

/// Walks the comb table for scalar `k`'s nibble decomposition, starting the
/// accumulator at `start` rather than the identity (so callers can fold in
/// a blinding offset). Every window performs the same sequence of
/// operations regardless of `k`'s digits: a full table scan via masked
/// selection followed by one complete addition.
pub fn comb_walk(table: &CombTable, digits: &[u8; WINDOWS], start: Jacobian) -> Jacobian {
    let mut acc = start;
    for (window, &digit) in table.iter().zip(digits.iter()) {
        let mut selected = window[0];
        for (d, candidate) in window.iter().enumerate().skip(1) {
            selected.conditional_move(candidate, digit as usize == d);
        }
        acc = acc.add_ge_ct(&selected);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comb_matches_repeated_addition() {
        let table = build_comb_table();

        let mut k_bytes = [0u8; 32];
        k_bytes[31] = 5;
        let digits = nibbles_le(&k_bytes);
        let result = comb_walk(&table, &digits, Jacobian::set_infinity()).to_affine_var();

        let g = generator();
        let mut acc = Jacobian::set_ge(&g);
        for _ in 0..4 {
            acc = acc.add_ge_var(&g);
        }
        let expected = acc.to_affine_var();

        assert!(result.x.equal(&expected.x));
        assert!(result.y.equal(&expected.y));
    }

    #[test]
    fn nibble_decomposition_is_big_endian() {
        let mut b = [0u8; 32];
        b[31] = 0x21;
        let digits = nibbles_le(&b);
        assert_eq!(digits[0], 1);
        assert_eq!(digits[1], 2);
        assert!(digits[2..].iter().all(|&d| d == 0));
    }
}
