//! BIP-340 Schnorr signatures: key material, nonce derivation, sign, verify.
//!
//! Implements the protocol in `secp256k1_schnorrsig_sign_internal` /
//! `secp256k1_schnorrsig_verify` step for step: even-Y secret negation,
//! aux-randomness-masked nonce derivation, the zero-nonce carry-forward, and
//! the `s*G + (-e)*P` verification equation.

use zeroize::Zeroize;

use crate::hash::sha256::streaming::{BipTag, Sha256, tagged_hash};
use crate::rng::Csprng;
use crate::secp256k1::ct::conditional_zero_bytes;
use crate::secp256k1::ecmult::{ecmult, EcMultGenContext};
use crate::secp256k1::field::FieldElement;
use crate::secp256k1::group::Affine;
use crate::secp256k1::scalar::Scalar;

/// Precomputed `TaggedHash("BIP0340/aux", 0x00 * 32)`, used as the nonce
/// mask when the caller supplies no auxiliary randomness.
const ZERO_MASK: [u8; 32] = [
    0x54, 0xf1, 0x69, 0xcf, 0xc9, 0xe2, 0xe5, 0x72, 0x74, 0x80, 0x44, 0x41, 0x90, 0xba, 0x25, 0xc4,
    0x88, 0xf4, 0x61, 0xc7, 0x0b, 0x5e, 0xa5, 0xdc, 0xaa, 0xf7, 0xaf, 0x69, 0x27, 0x0a, 0xa5, 0x14,
];

/// Failure kinds for key material parsing and signing. Verification has no
/// secret output and never needs one: it just returns `false`.
#[derive(Debug, PartialEq, Eq)]
pub enum SchnorrError {
    /// Secret key bytes were zero or `>= n`.
    InvalidSecretKey,
    /// Signature bytes failed to parse (`R.x >= p` or `s >= n`).
    InvalidSignatureEncoding,
    /// Public key bytes were off-curve, or `>= p`/`>= n` where applicable.
    InvalidPublicKey,
    /// Signing was attempted against a context whose comb table has not
    /// been built.
    ContextNotBuilt,
    /// The nonce derived for this message/key/aux-randomness combination
    /// reduced to zero mod `n` (probability ~2^-256). The caller should
    /// retry with different aux randomness, though this is expected to
    /// never happen in practice.
    ZeroNonce,
}

/// A secp256k1 keypair: a secret scalar `d` and its public point `d*G`.
///
/// Mirrors the reference's opaque 96-byte `secp256k1_keypair` blob: `d` and
/// `d*G` are stored together so that signing never has to recompute the
/// public point, and `d` is zeroised on drop.
#[derive(Clone, Copy)]
pub struct Keypair {
    secret: Scalar,
    public: Affine,
}

impl Keypair {
    /// Derives a keypair from a 32-byte secret key. Fails if the bytes
    /// overflow `n` or are zero, or if `ctx` has not been built.
    pub fn from_seckey(seckey: &[u8; 32], ctx: &EcMultGenContext) -> Result<Keypair, SchnorrError> {
        if !ctx.is_built() {
            return Err(SchnorrError::ContextNotBuilt);
        }
        let secret = Scalar::from_bytes_seckey(seckey).ok_or(SchnorrError::InvalidSecretKey)?;
        let public = ctx.ecmult_gen(&secret).to_affine_var();
        Ok(Keypair { secret, public })
    }

    /// The flat 96-byte layout: 32-byte big-endian secret, then the 64-byte
    /// opaque affine public-key encoding.
    pub fn to_bytes(&self) -> [u8; 96] {
        let mut out = [0u8; 96];
        out[..32].copy_from_slice(&self.secret.to_bytes());
        out[32..].copy_from_slice(&self.public.to_bytes());
        out
    }

    /// Parses the 96-byte flat layout. Does not re-derive the public point
    /// from the secret (mirroring the reference, whose opaque keypair blob
    /// is only ever populated by its own `keypair_create`); callers that
    /// construct this from untrusted bytes should prefer
    /// [`Keypair::from_seckey`].
    pub fn from_bytes(b: &[u8; 96]) -> Result<Keypair, SchnorrError> {
        let mut seckey = [0u8; 32];
        seckey.copy_from_slice(&b[..32]);
        let secret = Scalar::from_bytes_seckey(&seckey).ok_or(SchnorrError::InvalidSecretKey)?;

        let mut pubkey = [0u8; 64];
        pubkey.copy_from_slice(&b[32..]);
        let public = Affine::from_bytes(&pubkey).ok_or(SchnorrError::InvalidPublicKey)?;

        Ok(Keypair { secret, public })
    }

    /// The x-only public key derived from this keypair: the even-Y root
    /// sharing this keypair's `x`-coordinate.
    pub fn xonly_public_key(&self) -> XOnlyPublicKey {
        let y = self.public.y.normalize_var();
        let point = if y.is_odd() {
            Affine::set_xy(self.public.x, y.negate(1).normalize_var())
        } else {
            Affine::set_xy(self.public.x, y)
        };
        XOnlyPublicKey { point }
    }

    /// Signs an arbitrary-length message per BIP-340.
    pub fn sign(
        &self,
        msg: &[u8],
        aux_rand: Option<&[u8; 32]>,
        ctx: &EcMultGenContext,
    ) -> Result<Signature, SchnorrError> {
        sign_internal(msg, self, aux_rand, ctx)
    }

    /// Signs a 32-byte message (e.g. a prehashed digest). Equivalent to
    /// `sign` with a 32-byte slice; kept as its own entry point to mirror
    /// the reference's `schnorr_sign32`.
    pub fn sign32(
        &self,
        msg32: &[u8; 32],
        aux_rand: Option<&[u8; 32]>,
        ctx: &EcMultGenContext,
    ) -> Result<Signature, SchnorrError> {
        sign_internal(msg32, self, aux_rand, ctx)
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.secret.clear();
    }
}

/// An x-only public key: the 32-byte x-coordinate of a curve point whose y
/// is taken to be the even root. Internally keeps both coordinates (the
/// even-y affine point) to avoid re-deriving `y` on every verification.
#[derive(Clone, Copy)]
pub struct XOnlyPublicKey {
    point: Affine,
}

impl XOnlyPublicKey {
    /// Parses the 32-byte wire encoding (just `x`), decoding the even-y
    /// root. Fails if `x >= p` or if `x^3 + 7` has no square root mod `p`.
    pub fn from_bytes(x32: &[u8; 32]) -> Result<XOnlyPublicKey, SchnorrError> {
        let x = FieldElement::from_bytes_strict(x32).ok_or(SchnorrError::InvalidPublicKey)?;
        let point = Affine::set_xo_var(x, false).ok_or(SchnorrError::InvalidPublicKey)?;
        Ok(XOnlyPublicKey { point })
    }

    /// The 32-byte wire encoding: just the x-coordinate.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.point.x.normalize_var().to_bytes()
    }

    /// Parses the 64-byte opaque in-memory layout (both coordinates).
    /// Fails if the point is off-curve or its y is odd (the caller-supplied
    /// invariant from the data model: the stored y must already be even).
    pub fn from_opaque(b: &[u8; 64]) -> Result<XOnlyPublicKey, SchnorrError> {
        let point = Affine::from_bytes(b).ok_or(SchnorrError::InvalidPublicKey)?;
        if point.y.normalize_var().is_odd() {
            return Err(SchnorrError::InvalidPublicKey);
        }
        Ok(XOnlyPublicKey { point })
    }

    /// The 64-byte opaque in-memory layout (both coordinates).
    pub fn to_opaque(&self) -> [u8; 64] {
        self.point.to_bytes()
    }
}

/// A BIP-340 signature: the 32-byte x-coordinate of the nonce point `R`
/// followed by the 32-byte response scalar `s`, both big-endian.
#[derive(Clone, Copy)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    pub fn from_bytes(b: [u8; 64]) -> Signature {
        Signature(b)
    }

    pub fn r_x_bytes(&self) -> [u8; 32] {
        self.0[..32].try_into().unwrap()
    }

    pub fn s_bytes(&self) -> [u8; 32] {
        self.0[32..].try_into().unwrap()
    }

    /// Verifies this signature over `msg` against `pubkey`.
    pub fn verify(&self, msg: &[u8], pubkey: &XOnlyPublicKey) -> bool {
        verify_internal(self, msg, pubkey)
    }
}

fn xor32(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// `e = TaggedHash("BIP0340/challenge", r_x || pubkey_x || msg) mod n`.
fn challenge(r_x: &[u8; 32], pubkey_x: &[u8; 32], msg: &[u8]) -> Scalar {
    let mut h = Sha256::initialize_tagged(BipTag::Challenge);
    h.write(r_x);
    h.write(pubkey_x);
    h.write(msg);
    let digest: [u8; 32] = h.finalize().into();
    let (e, _overflow) = Scalar::from_bytes(&digest);
    e
}

fn sign_internal(
    msg: &[u8],
    keypair: &Keypair,
    aux_rand: Option<&[u8; 32]>,
    ctx: &EcMultGenContext,
) -> Result<Signature, SchnorrError> {
    if !ctx.is_built() {
        return Err(SchnorrError::ContextNotBuilt);
    }

    let mut d = keypair.secret;
    let pubkey_y_odd = keypair.public.y.normalize_var().is_odd();
    if pubkey_y_odd {
        d = d.negate();
    }
    let pubkey_x = keypair.public.x.normalize_var().to_bytes();

    let mut d_bytes = d.to_bytes();
    let mut t = match aux_rand {
        Some(aux) => {
            let aux_hash: [u8; 32] = tagged_hash(BipTag::Aux, aux).into();
            xor32(&d_bytes, &aux_hash)
        }
        None => xor32(&d_bytes, &ZERO_MASK),
    };
    d_bytes.zeroize();

    let nonce32: [u8; 32] = {
        let mut h = Sha256::initialize_tagged(BipTag::Nonce);
        h.write(&t);
        h.write(&pubkey_x);
        h.write(msg);
        h.finalize().into()
    };
    t.zeroize();

    let (mut k, _overflow) = Scalar::from_bytes(&nonce32);
    let k_is_zero = k.is_zero();
    // Carry the failure forward constant-time: keep computing with k = 1
    // rather than branching out now, and only act on `k_is_zero` at the
    // very end (zeroing the output, returning an error).
    k.conditional_move(&Scalar::ONE, k_is_zero);

    // R = k*G. The conversion to affine runs in variable time (it inverts
    // Z), but R itself is the public nonce commitment: once computed it is
    // not a secret, so branching on its parity below leaks nothing beyond
    // what the published signature already reveals.
    let r = ctx.ecmult_gen(&k).to_affine_var();
    let r_y_odd = r.y.normalize_var().is_odd();
    if r_y_odd {
        k = k.negate();
    }
    let r_x_bytes = r.x.normalize_var().to_bytes();

    let e = challenge(&r_x_bytes, &pubkey_x, msg);
    let s = k.add(&e.mul(&d));

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&r_x_bytes);
    sig_bytes[32..].copy_from_slice(&s.to_bytes());
    conditional_zero_bytes(&mut sig_bytes, k_is_zero);

    d.clear();
    k.clear();

    if k_is_zero {
        Err(SchnorrError::ZeroNonce)
    } else {
        Ok(Signature(sig_bytes))
    }
}

fn verify_internal(sig: &Signature, msg: &[u8], pubkey: &XOnlyPublicKey) -> bool {
    let Some(rx) = FieldElement::from_bytes_strict(&sig.r_x_bytes()) else {
        return false;
    };
    let (s, overflow) = Scalar::from_bytes(&sig.s_bytes());
    if overflow {
        return false;
    }

    let pubkey_x = pubkey.point.x.normalize_var().to_bytes();
    let e = challenge(&sig.r_x_bytes(), &pubkey_x, msg);
    let neg_e = e.negate();

    let r_prime = ecmult(&pubkey.point, &neg_e, &s);
    if r_prime.is_infinity() {
        return false;
    }
    let r_prime = r_prime.to_affine_var();

    !r_prime.y.normalize_var().is_odd() && r_prime.x.normalize_var().equal(&rx)
}

/// Draws a fresh keypair from `rng`: a uniformly random nonzero scalar
/// below `n` and its public point.
pub fn generate_keypair(rng: &mut Csprng, ctx: &EcMultGenContext) -> Result<Keypair, SchnorrError> {
    loop {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        match Keypair::from_seckey(&seed, ctx) {
            Ok(kp) => return Ok(kp),
            Err(SchnorrError::InvalidSecretKey) => continue,
            Err(e) => return Err(e),
        }
    }
}
