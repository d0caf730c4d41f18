//! Scalar multiplication: a constant-time fixed-base multiply (`ecmult_gen`,
//! used for signing) and a variable-time double-scalar multiply (`ecmult`,
//! used for verification).

use crate::rng::Csprng;
use crate::secp256k1::ct::abs_i32;
use crate::secp256k1::group::{generator, Affine, Jacobian};
use crate::secp256k1::scalar::Scalar;
use crate::secp256k1::table::{self, CombTable};

/// Holds the precomputed fixed-base comb table plus a scalar/point blinding
/// pair refreshed on demand. `build` multiplies only public data (the
/// generator) so it runs in variable time; every `ecmult_gen` call after
/// that is constant-time in the scalar it is given.
pub struct EcMultGenContext {
    table: CombTable,
    blind: Scalar,
    blind_neg: Jacobian,
    built: bool,
}

impl EcMultGenContext {
    /// Builds the comb table and draws an initial blinding scalar from
    /// `rng`. Must be called (directly or via [`EcMultGenContext::build`])
    /// before any signing operation.
    pub fn build(rng: &mut Csprng) -> EcMultGenContext {
        let table = table::build_comb_table();
        let mut ctx = EcMultGenContext {
            table,
            blind: Scalar::ZERO,
            blind_neg: Jacobian::set_infinity(),
            built: true,
        };
        ctx.blinding_refresh(rng);
        ctx
    }

    /// A context with no comb table, as if `build` had never been called.
    /// Signing against this must fail with `ContextNotBuilt` rather than
    /// panic or silently compute over an empty table.
    pub fn uninitialized() -> EcMultGenContext {
        EcMultGenContext {
            table: CombTable::new(),
            blind: Scalar::ZERO,
            blind_neg: Jacobian::set_infinity(),
            built: false,
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Draws a fresh blinding scalar and recomputes `blind_neg = (-blind)*G`.
    /// Requires single-writer access: callers must not call `ecmult_gen`
    /// concurrently with a refresh.
    pub fn blinding_refresh(&mut self, rng: &mut Csprng) {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let (blind, overflow) = Scalar::from_bytes(&seed);
        let blind = if overflow || blind.is_zero() { Scalar::ONE } else { blind };

        let neg = blind.negate();
        let digits = table::nibbles_le(&neg.to_bytes());
        self.blind_neg = table::comb_walk(&self.table, &digits, Jacobian::set_infinity());
        self.blind = blind;
    }

    /// Computes `k * G` in constant time with respect to `k`.
    pub fn ecmult_gen(&self, k: &Scalar) -> Jacobian {
        let masked = k.add(&self.blind);
        let digits = table::nibbles_le(&masked.to_bytes());
        table::comb_walk(&self.table, &digits, self.blind_neg)
    }
}

/// wNAF digit of width `w`: values are odd and in `[-(2^(w-1)-1), 2^(w-1)-1]`,
/// with `0` meaning "no digit at this position".
fn wnaf(k: &Scalar, w: u32) -> Vec<i32> {
    let bytes = k.to_bytes();
    let mut bits = [0u8; 256];
    for i in 0..256 {
        let byte = bytes[31 - i / 8];
        bits[i] = (byte >> (i % 8)) & 1;
    }

    let window = 1i32 << w;
    let half = window >> 1;
    let mut out = vec![0i32; 257];
    let mut carry = 0i32;
    let mut i = 0usize;
    while i < 256 {
        let bit = bits[i] as i32 + carry;
        if bit & 1 == 0 {
            i += 1;
            continue;
        }

        let mut word = bit;
        for j in 1..w as usize {
            if i + j >= 256 {
                break;
            }
            word |= (bits[i + j] as i32) << j;
        }
        let digit = if word >= half { word - window } else { word };
        carry = if digit < 0 { 1 } else { 0 };
        out[i] = digit;
        i += w as usize;
    }
    if carry != 0 {
        out[256] = carry;
    }
    out
}

/// Variable-time `a*point + b*G`, for Schnorr verification where `point`
/// (the public key's x-only point) and both scalars are public.
pub fn ecmult(point: &Affine, a: &Scalar, b: &Scalar) -> Jacobian {
    const W_A: u32 = 5;
    const W_G: u32 = 5;

    let point_j = Jacobian::set_ge(point);
    let mut odd_a = Vec::with_capacity(8);
    odd_a.push(point_j);
    let double_a = point_j.double_var();
    for i in 1..8 {
        odd_a.push(odd_a[i - 1].add_ge_var(&double_a.to_affine_var()));
    }
    let odd_a_affine: Vec<Affine> = odd_a.iter().map(Jacobian::to_affine_var).collect();

    let g = generator();
    let mut odd_g = Vec::with_capacity(8);
    odd_g.push(Jacobian::set_ge(&g));
    let double_g = odd_g[0].double_var();
    for i in 1..8 {
        odd_g.push(odd_g[i - 1].add_ge_var(&double_g.to_affine_var()));
    }
    let odd_g_affine: Vec<Affine> = odd_g.iter().map(Jacobian::to_affine_var).collect();

    let naf_a = wnaf(a, W_A);
    let naf_g = wnaf(b, W_G);
    let len = naf_a.len().max(naf_g.len());

    let mut acc = Jacobian::set_infinity();
    for i in (0..len).rev() {
        acc = acc.double_var();

        if let Some(&d) = naf_a.get(i) {
            if d != 0 {
                let (idx, neg) = abs_i32(d);
                let mut p = odd_a_affine[(idx as usize - 1) / 2];
                if neg {
                    p = Affine::set_xy(p.x, p.y.negate(1).normalize_var());
                }
                acc = acc.add_ge_var(&p);
            }
        }

        if let Some(&d) = naf_g.get(i) {
            if d != 0 {
                let (idx, neg) = abs_i32(d);
                let mut p = odd_g_affine[(idx as usize - 1) / 2];
                if neg {
                    p = Affine::set_xy(p.x, p.y.negate(1).normalize_var());
                }
                acc = acc.add_ge_var(&p);
            }
        }
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_context_reports_not_built() {
        let ctx = EcMultGenContext::uninitialized();
        assert!(!ctx.is_built());

        let mut rng = Csprng::from_seed([3u8; 32]);
        let built = EcMultGenContext::build(&mut rng);
        assert!(built.is_built());
    }

    #[test]
    fn ecmult_gen_matches_naive_addition() {
        let mut rng = Csprng::from_seed([7u8; 32]);
        let ctx = EcMultGenContext::build(&mut rng);

        let mut k_bytes = [0u8; 32];
        k_bytes[31] = 9;
        let (k, _) = Scalar::from_bytes(&k_bytes);

        let got = ctx.ecmult_gen(&k).to_affine_var();

        let g = generator();
        let mut acc = Jacobian::set_ge(&g);
        for _ in 0..8 {
            acc = acc.add_ge_var(&g);
        }
        let expected = acc.to_affine_var();

        assert!(got.x.equal(&expected.x));
        assert!(got.y.equal(&expected.y));
    }

    #[test]
    fn ecmult_zero_b_matches_scalar_mult_of_point() {
        let g = generator();
        let mut k_bytes = [0u8; 32];
        k_bytes[31] = 11;
        let (k, _) = Scalar::from_bytes(&k_bytes);

        let got = ecmult(&g, &k, &Scalar::ZERO).to_affine_var();

        let mut acc = Jacobian::set_ge(&g);
        for _ in 0..10 {
            acc = acc.add_ge_var(&g);
        }
        let expected = acc.to_affine_var();

        assert!(got.x.equal(&expected.x));
        assert!(got.y.equal(&expected.y));
    }

    #[test]
    fn ecmult_zero_a_matches_generator_mult() {
        let g = generator();
        let mut k_bytes = [0u8; 32];
        k_bytes[31] = 6;
        let (k, _) = Scalar::from_bytes(&k_bytes);

        let got = ecmult(&g, &Scalar::ZERO, &k).to_affine_var();

        let mut acc = Jacobian::set_ge(&g);
        for _ in 0..5 {
            acc = acc.add_ge_var(&g);
        }
        let expected = acc.to_affine_var();

        assert!(got.x.equal(&expected.x));
        assert!(got.y.equal(&expected.y));
    }
}
