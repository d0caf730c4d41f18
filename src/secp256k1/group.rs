//! Points on *y² = x³ + 7*, in affine and Jacobian coordinates.
//!
//! Jacobian coordinates represent the affine point `(x/z², y/z³)`; the
//! point at infinity is flagged explicitly rather than encoded as a
//! coordinate pattern, matching the reference's `infinity` field.

use crate::secp256k1::field::FieldElement;

/// `B = 7` in the curve equation `y² = x³ + B`.
const CURVE_B: u64 = 7;

#[derive(Clone, Copy, Debug)]
pub struct Affine {
    pub x: FieldElement,
    pub y: FieldElement,
    pub infinity: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Jacobian {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
    pub infinity: bool,
}

impl Affine {
    pub const fn new(x: FieldElement, y: FieldElement) -> Affine {
        Affine { x, y, infinity: false }
    }

    pub fn set_infinity() -> Affine {
        Affine { x: FieldElement::ZERO, y: FieldElement::ZERO, infinity: true }
    }

    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// Recovers a point from its x-coordinate and the parity of y.
    /// Variable-time: the x-coordinate and parity are public data in every
    /// caller of this function (x-only pubkey decoding).
    pub fn set_xo_var(x: FieldElement, odd: bool) -> Option<Affine> {
        let rhs = x.sqr().mul(&x).add_int(CURVE_B);
        let mut y = rhs.sqrt()?;
        let y_norm = y.normalize_var();
        if y_norm.is_odd() != odd {
            y = y.negate(1).normalize_var();
        }
        Some(Affine { x, y, infinity: false })
    }

    pub fn set_xy(x: FieldElement, y: FieldElement) -> Affine {
        Affine { x, y, infinity: false }
    }

    /// 64-byte uncompressed encoding: 32-byte big-endian x, 32-byte
    /// big-endian y. Infinity has no wire representation here; callers
    /// must not serialize it (matches the reference's storage format,
    /// which is only ever populated with finite points).
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.x.normalize_var().to_bytes());
        out[32..].copy_from_slice(&self.y.normalize_var().to_bytes());
        out
    }

    pub fn from_bytes(b: &[u8; 64]) -> Option<Affine> {
        let mut xb = [0u8; 32];
        let mut yb = [0u8; 32];
        xb.copy_from_slice(&b[..32]);
        yb.copy_from_slice(&b[32..]);
        let x = FieldElement::from_bytes_strict(&xb)?;
        let y = FieldElement::from_bytes_strict(&yb)?;
        let p = Affine::set_xy(x, y);
        if p.on_curve() { Some(p) } else { None }
    }

    fn on_curve(&self) -> bool {
        let rhs = self.x.sqr().mul(&self.x).add_int(CURVE_B);
        let lhs = self.y.sqr();
        lhs.equal(&rhs)
    }

    /// Selects `other` if `flag` is true, `self` otherwise, without
    /// branching on `flag`.
    pub fn conditional_move(&mut self, other: &Affine, flag: bool) {
        self.x.conditional_move(&other.x, flag);
        self.y.conditional_move(&other.y, flag);
        self.infinity = select_bool(flag, self.infinity, other.infinity);
    }
}

/// `select_u64`'s `bool` counterpart: picks `b` when `flag`, `a` otherwise,
/// via bitwise arithmetic rather than a branch on `flag`.
#[inline(always)]
fn select_bool(flag: bool, a: bool, b: bool) -> bool {
    let f = flag as u8;
    (((a as u8) & (1 - f)) | ((b as u8) & f)) != 0
}

impl Jacobian {
    pub fn set_infinity() -> Jacobian {
        Jacobian {
            x: FieldElement::ZERO,
            y: FieldElement::ZERO,
            z: FieldElement::ZERO,
            infinity: true,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    pub fn set_ge(a: &Affine) -> Jacobian {
        Jacobian { x: a.x, y: a.y, z: FieldElement::ONE, infinity: a.infinity }
    }

    /// Converts to affine. Variable-time (uses `inv_var`); callers on the
    /// constant-time signing path must not call this on secret-dependent
    /// points.
    pub fn to_affine_var(&self) -> Affine {
        if self.infinity {
            return Affine::set_infinity();
        }
        let z_inv = self.z.inv_var();
        let z_inv2 = z_inv.sqr();
        let z_inv3 = z_inv2.mul(&z_inv);
        Affine {
            x: self.x.mul(&z_inv2).normalize_var(),
            y: self.y.mul(&z_inv3).normalize_var(),
            infinity: false,
        }
    }

    /// Doubles a Jacobian point. Standard formulas for `a = 0` curves
    /// (`dbl-2009-l`); variable-time only in the sense that it branches on
    /// infinity/zero-y, both of which are public in every caller here.
    pub fn double_var(&self) -> Jacobian {
        if self.infinity || self.y.normalizes_to_zero() {
            return Jacobian::set_infinity();
        }

        let a = self.x.sqr();
        let b = self.y.sqr();
        let c = b.sqr();
        let mut d = self.x.add(&b).sqr().add(&a.negate(1)).add(&c.negate(1));
        d = d.add(&d);
        let mut e = a.add(&a);
        e = e.add(&a);
        let f = e.sqr();

        let x3 = f.add(&d.add(&d).negate(20)).normalize_weak();
        let mut y3 = d.add(&x3.negate(2)).normalize_weak().mul(&e);
        let mut c8 = c;
        for _ in 0..3 {
            c8 = c8.add(&c8);
        }
        y3 = y3.add(&c8.negate(8));
        let z3 = self.y.mul(&self.z).add(&self.y.mul(&self.z)).normalize_weak();

        Jacobian { x: x3, y: y3.normalize_weak(), z: z3, infinity: false }
    }

    /// Adds an affine point to a Jacobian accumulator. Standard
    /// mixed-addition formulas (`madd-2007-bl`); handles the
    /// infinity/equal-point/inverse-point special cases explicitly.
    /// Variable-time: only used on the verification path with public data.
    pub fn add_ge_var(&self, b: &Affine) -> Jacobian {
        if b.infinity {
            return *self;
        }
        if self.infinity {
            return Jacobian::set_ge(b);
        }

        let z1z1 = self.z.sqr();
        let u2 = b.x.mul(&z1z1);
        let s2 = b.y.mul(&z1z1).mul(&self.z);

        let h = u2.add(&self.x.negate(1)).normalize_weak();
        let r = s2.add(&self.y.negate(1)).normalize_weak();

        if h.normalizes_to_zero() {
            if r.normalizes_to_zero() {
                return self.double_var();
            }
            return Jacobian::set_infinity();
        }

        let i = h.add(&h).sqr();
        let j = h.mul(&i);
        let rr = r.add(&r);
        let v = self.x.mul(&i);

        let x3 = rr
            .sqr()
            .add(&j.negate(1))
            .add(&v.add(&v).negate(2))
            .normalize_weak();
        let y3 = v
            .add(&x3.negate(2))
            .mul(&rr)
            .add(&self.y.mul(&j).add(&self.y.mul(&j)).negate(2))
            .normalize_weak();
        let z3 = self
            .z
            .add(&h)
            .sqr()
            .add(&z1z1.negate(1))
            .add(&h.sqr().negate(1))
            .normalize_weak();

        Jacobian { x: x3, y: y3, z: z3, infinity: false }
    }

    pub fn negate(&self) -> Jacobian {
        Jacobian { x: self.x, y: self.y.negate(1).normalize_weak(), z: self.z, infinity: self.infinity }
    }

    /// Selects `other` if `flag` is true, `self` otherwise, without
    /// branching on `flag`.
    pub fn conditional_move(&mut self, other: &Jacobian, flag: bool) {
        self.x.conditional_move(&other.x, flag);
        self.y.conditional_move(&other.y, flag);
        self.z.conditional_move(&other.z, flag);
        self.infinity = select_bool(flag, self.infinity, other.infinity);
    }

    /// Complete constant-time mixed addition: computes the generic-sum,
    /// doubling, and both-infinity-passthrough outcomes unconditionally and
    /// selects among them with bitwise masks, so the sequence of field
    /// operations executed never depends on whether `self`/`b` happen to be
    /// infinity or equal. Used by the fixed-base comb, where `self`/`b` are
    /// derived from a secret scalar digit.
    pub fn add_ge_ct(&self, b: &Affine) -> Jacobian {
        let z1z1 = self.z.sqr();
        let u2 = b.x.mul(&z1z1);
        let s2 = b.y.mul(&z1z1).mul(&self.z);

        let h = u2.add(&self.x.negate(1)).normalize_weak();
        let r = s2.add(&self.y.negate(1)).normalize_weak();

        let i = h.add(&h).sqr();
        let j = h.mul(&i);
        let rr = r.add(&r);
        let v = self.x.mul(&i);

        let x3 = rr
            .sqr()
            .add(&j.negate(1))
            .add(&v.add(&v).negate(2))
            .normalize_weak();
        let y3 = v
            .add(&x3.negate(2))
            .mul(&rr)
            .add(&self.y.mul(&j).add(&self.y.mul(&j)).negate(2))
            .normalize_weak();
        let z3 = self
            .z
            .add(&h)
            .sqr()
            .add(&z1z1.negate(1))
            .add(&h.sqr().negate(1))
            .normalize_weak();

        let mut result = Jacobian { x: x3, y: y3, z: z3, infinity: false };

        let h_zero = h.normalizes_to_zero();
        let r_zero = r.normalizes_to_zero();
        result.conditional_move(&self.double_var(), h_zero & r_zero);
        result.conditional_move(&Jacobian::set_infinity(), h_zero & !r_zero);
        result.conditional_move(self, b.infinity);
        result.conditional_move(&Jacobian::set_ge(b), self.infinity);

        result
    }
}

pub fn generator() -> Affine {
    Affine {
        x: FieldElement::from_bytes_mod(&[
            0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
            0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b,
            0x16, 0xf8, 0x17, 0x98,
        ]),
        y: FieldElement::from_bytes_mod(&[
            0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11,
            0x08, 0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f,
            0xfb, 0x10, 0xd4, 0xb8,
        ]),
        infinity: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_on_curve() {
        let g = generator();
        assert!(g.on_curve());
    }

    #[test]
    fn doubling_matches_addition() {
        let g = generator();
        let gj = Jacobian::set_ge(&g);
        let doubled = gj.double_var().to_affine_var();
        let added = gj.add_ge_var(&g).to_affine_var();
        assert!(doubled.x.equal(&added.x));
        assert!(doubled.y.equal(&added.y));
    }

    #[test]
    fn add_infinity_is_identity() {
        let g = generator();
        let gj = Jacobian::set_ge(&g);
        let inf = Affine::set_infinity();
        let r = gj.add_ge_var(&inf).to_affine_var();
        assert!(r.x.equal(&g.x));
        assert!(r.y.equal(&g.y));
    }

    #[test]
    fn add_negation_is_infinity() {
        let g = generator();
        let gj = Jacobian::set_ge(&g);
        let neg = Affine::set_xy(g.x, g.y.negate(1).normalize_var());
        let r = gj.add_ge_var(&neg);
        assert!(r.is_infinity() || r.to_affine_var().x.is_zero());
    }

    #[test]
    fn xo_round_trip() {
        let g = generator();
        let odd = g.y.normalize_var().is_odd();
        let recovered = Affine::set_xo_var(g.x, odd).unwrap();
        assert!(recovered.y.equal(&g.y));
    }

    #[test]
    fn bytes_round_trip() {
        let g = generator();
        let b = g.to_bytes();
        let back = Affine::from_bytes(&b).unwrap();
        assert!(back.x.equal(&g.x));
        assert!(back.y.equal(&g.y));
    }
}
