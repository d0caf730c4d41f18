//! 256-bit scalar ring modulo the secp256k1 curve order *n*.
//!
//! Represented as four 64-bit limbs, little-endian (`d[0]` is the lowest
//! limb). Every publicly observable `Scalar` satisfies `value < N`. All
//! operations here are constant-time with respect to scalar *values*; only
//! the overflow/zero flags they return may influence later control flow.

use zeroize::Zeroize;

/// Curve order `n`, limb 0 (lowest 64 bits).
const N_0: u64 = 0xBFD2_5E8C_D036_4141;
const N_1: u64 = 0xBAAE_DCE6_AF48_A03B;
const N_2: u64 = 0xFFFF_FFFF_FFFF_FFFE;
const N_3: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// `2^256 - n`, split so that `N_C_2 = 1` is implicit (see module docs of
/// the field/scalar reduction in the distilled spec, §4.1).
const N_C_0: u64 = N_0.wrapping_neg();
const N_C_1: u64 = !N_1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scalar(pub [u64; 4]);

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Scalar {
    pub const ZERO: Scalar = Scalar([0, 0, 0, 0]);
    pub const ONE: Scalar = Scalar([1, 0, 0, 0]);

    fn check_overflow(&self) -> bool {
        let mut yes = false;
        let mut no = false;
        no |= self.0[3] < N_3;
        no |= self.0[2] < N_2;
        yes |= self.0[2] > N_2 && !no;
        no |= self.0[1] < N_1;
        yes |= self.0[1] > N_1 && !no;
        yes |= self.0[0] >= N_0 && !no;
        yes
    }

    fn reduce(&mut self, overflow: bool) -> bool {
        let o = overflow as u128;
        let mut t = self.0[0] as u128 + o * N_C_0 as u128;
        self.0[0] = t as u64;
        t >>= 64;
        t += self.0[1] as u128 + o * N_C_1 as u128;
        self.0[1] = t as u64;
        t >>= 64;
        t += self.0[2] as u128 + o; // N_C_2 == 1
        self.0[2] = t as u64;
        t >>= 64;
        t += self.0[3] as u128;
        self.0[3] = t as u64;
        overflow
    }

    /// Parses 32 big-endian bytes. Returns the scalar reduced mod *n* and
    /// whether the raw value was `>= n`.
    pub fn from_bytes(b32: &[u8; 32]) -> (Scalar, bool) {
        let mut r = Scalar([
            u64::from_be_bytes(b32[24..32].try_into().unwrap()),
            u64::from_be_bytes(b32[16..24].try_into().unwrap()),
            u64::from_be_bytes(b32[8..16].try_into().unwrap()),
            u64::from_be_bytes(b32[0..8].try_into().unwrap()),
        ]);
        let overflow = r.check_overflow();
        r.reduce(overflow);
        (r, overflow)
    }

    /// Parses a secret key: succeeds iff the bytes are both non-overflowing
    /// and nonzero.
    pub fn from_bytes_seckey(b32: &[u8; 32]) -> Option<Scalar> {
        let (s, overflow) = Scalar::from_bytes(b32);
        if overflow || s.is_zero() { None } else { Some(s) }
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[0..8].copy_from_slice(&self.0[3].to_be_bytes());
        out[8..16].copy_from_slice(&self.0[2].to_be_bytes());
        out[16..24].copy_from_slice(&self.0[1].to_be_bytes());
        out[24..32].copy_from_slice(&self.0[0].to_be_bytes());
        out
    }

    pub fn is_zero(&self) -> bool {
        (self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0
    }

    pub fn negate(&self) -> Scalar {
        let nonzero = (!self.is_zero()) as u64;
        let mask = 0u64.wrapping_sub(nonzero);
        let mut t = (!self.0[0]) as u128 + (N_0 + 1) as u128;
        let d0 = (t as u64) & mask;
        t >>= 64;
        t += (!self.0[1]) as u128 + N_1 as u128;
        let d1 = (t as u64) & mask;
        t >>= 64;
        t += (!self.0[2]) as u128 + N_2 as u128;
        let d2 = (t as u64) & mask;
        t >>= 64;
        t += (!self.0[3]) as u128 + N_3 as u128;
        let d3 = (t as u64) & mask;
        Scalar([d0, d1, d2, d3])
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        let mut t = self.0[0] as u128 + other.0[0] as u128;
        let d0 = t as u64;
        t >>= 64;
        t += self.0[1] as u128 + other.0[1] as u128;
        let d1 = t as u64;
        t >>= 64;
        t += self.0[2] as u128 + other.0[2] as u128;
        let d2 = t as u64;
        t >>= 64;
        t += self.0[3] as u128 + other.0[3] as u128;
        let d3 = t as u64;
        t >>= 64;
        let mut r = Scalar([d0, d1, d2, d3]);
        let carry = (t as u64) != 0;
        let overflow = carry || r.check_overflow();
        r.reduce(overflow);
        r
    }

    /// Multiplies two scalars mod *n* via the reference's three-phase
    /// 512-bit schoolbook product / two-stage fold / final conditional
    /// subtraction.
    pub fn mul(&self, other: &Scalar) -> Scalar {
        let l = mul_512(self, other);
        reduce_512(&l)
    }

    pub fn conditional_move(&mut self, other: &Scalar, flag: bool) {
        let mask1 = 0u64.wrapping_sub(flag as u64);
        let mask0 = !mask1;
        for i in 0..4 {
            self.0[i] = (self.0[i] & mask0) | (other.0[i] & mask1);
        }
    }

    pub fn clear(&mut self) {
        self.zeroize();
    }
}

/// 256x256 -> 512-bit schoolbook product, carry-propagated through a
/// `(c0, c1, c2)` accumulator triple exactly as the reference macros do.
fn mul_512(a: &Scalar, b: &Scalar) -> [u64; 8] {
    macro_rules! muladd {
        ($c0:ident, $c1:ident, $c2:ident, $x:expr, $y:expr) => {{
            let t = ($x as u128) * ($y as u128);
            let (n0, carry) = $c0.overflowing_add(t as u64);
            $c0 = n0;
            let th = (t >> 64) as u64 + carry as u64;
            let (n1, carry1) = $c1.overflowing_add(th);
            $c1 = n1;
            $c2 += carry1 as u64;
        }};
    }
    macro_rules! extract {
        ($c0:ident, $c1:ident, $c2:ident) => {{
            let n = $c0;
            $c0 = $c1;
            $c1 = $c2;
            $c2 = 0;
            n
        }};
    }

    let mut c0: u64 = 0;
    let mut c1: u64 = 0;
    let mut c2: u64 = 0;
    let mut l = [0u64; 8];

    muladd!(c0, c1, c2, a.0[0], b.0[0]);
    l[0] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[0], b.0[1]);
    muladd!(c0, c1, c2, a.0[1], b.0[0]);
    l[1] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[0], b.0[2]);
    muladd!(c0, c1, c2, a.0[1], b.0[1]);
    muladd!(c0, c1, c2, a.0[2], b.0[0]);
    l[2] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[0], b.0[3]);
    muladd!(c0, c1, c2, a.0[1], b.0[2]);
    muladd!(c0, c1, c2, a.0[2], b.0[1]);
    muladd!(c0, c1, c2, a.0[3], b.0[0]);
    l[3] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[1], b.0[3]);
    muladd!(c0, c1, c2, a.0[2], b.0[2]);
    muladd!(c0, c1, c2, a.0[3], b.0[1]);
    l[4] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[2], b.0[3]);
    muladd!(c0, c1, c2, a.0[3], b.0[2]);
    l[5] = extract!(c0, c1, c2);
    muladd!(c0, c1, c2, a.0[3], b.0[3]);
    l[6] = extract!(c0, c1, c2);
    l[7] = c0;
    l
}

/// Folds the 512-bit product down to a scalar mod *n*: 512->385->258->256.
fn reduce_512(l: &[u64; 8]) -> Scalar {
    let (n0, n1, n2, n3) = (l[4], l[5], l[6], l[7]);

    // 512 -> 385 bits.
    let mut t = l[0] as u128 + (n0 as u128) * (N_C_0 as u128);
    let m0 = t as u64;
    t >>= 64;
    t += l[1] as u128 + (n1 as u128) * (N_C_0 as u128) + (n0 as u128) * (N_C_1 as u128);
    let m1 = t as u64;
    t >>= 64;
    t += l[2] as u128
        + (n2 as u128) * (N_C_0 as u128)
        + (n1 as u128) * (N_C_1 as u128)
        + n0 as u128;
    let m2 = t as u64;
    t >>= 64;
    t += l[3] as u128
        + (n3 as u128) * (N_C_0 as u128)
        + (n2 as u128) * (N_C_1 as u128)
        + n1 as u128;
    let m3 = t as u64;
    t >>= 64;
    t += (n3 as u128) * (N_C_1 as u128) + n2 as u128;
    let m4 = t as u64;
    t >>= 64;
    t += n3 as u128;
    let m5 = t as u64;
    t >>= 64;
    let m6 = t as u64;

    // 385 -> 258 bits.
    let mut t = m0 as u128 + (m4 as u128) * (N_C_0 as u128);
    let p0 = t as u64;
    t >>= 64;
    t += m1 as u128 + (m5 as u128) * (N_C_0 as u128) + (m4 as u128) * (N_C_1 as u128);
    let p1 = t as u64;
    t >>= 64;
    t += m2 as u128
        + (m6 as u128) * (N_C_0 as u128)
        + (m5 as u128) * (N_C_1 as u128)
        + m4 as u128;
    let p2 = t as u64;
    t >>= 64;
    t += m3 as u128 + (m6 as u128) * (N_C_1 as u128) + m5 as u128;
    let p3 = t as u64;
    t >>= 64;
    let p4 = (t as u64) + m6;

    // 258 -> 256 bits, plus final conditional subtraction of n.
    let mut t = p0 as u128 + (p4 as u128) * (N_C_0 as u128);
    let d0 = t as u64;
    t >>= 64;
    t += p1 as u128 + (p4 as u128) * (N_C_1 as u128);
    let d1 = t as u64;
    t >>= 64;
    t += p2 as u128 + p4 as u128;
    let d2 = t as u64;
    t >>= 64;
    t += p3 as u128;
    let d3 = t as u64;
    t >>= 64;

    let mut r = Scalar([d0, d1, d2, d3]);
    let overflow = (t as u64 != 0) || r.check_overflow();
    r.reduce(overflow);
    r
}
