//! secp256k1 curve arithmetic and BIP-340 Schnorr signatures.
//!
//! This module is a layered stack, each layer depending only on the ones
//! below it:
//!
//! - [`scalar`] — the 256-bit scalar ring modulo the curve order `n`.
//! - [`field`] — the 256-bit prime field modulo `p = 2^256 - 2^32 - 977`,
//!   using a 5-limb radix-2^52 representation with lazy reduction.
//! - [`group`] — affine and Jacobian points on `y^2 = x^3 + 7`.
//! - [`ecmult`] — constant-time fixed-base scalar multiplication
//!   (`ecmult_gen`, used for signing) and variable-time double-scalar
//!   multiplication (`ecmult`, used for verification), plus the
//!   precomputed comb [`table`] the former walks.
//! - [`ct`] — shared constant-time selection primitives.
//! - [`schnorr`] — the BIP-340 sign/verify protocol built on the above.
//!
//! Only `schnorr`'s types are re-exported at this module's root; the
//! arithmetic layers are implementation detail for anyone not hand-rolling
//! a new protocol on top of this curve.

pub(crate) mod ct;
pub mod ecmult;
pub mod field;
pub mod group;
pub mod scalar;
mod schnorr;
pub mod table;

pub use ecmult::EcMultGenContext;
pub use schnorr::{generate_keypair, Keypair, SchnorrError, Signature, XOnlyPublicKey};
