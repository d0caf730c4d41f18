//! Cryptographic utilities and primitives for Nebula
//!
//! This crate provides low-level cryptographic building blocks used
//! throughout the Nebula ecosystem.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level cryptographic API. All components
//! are designed to be dependency-free, explicit in their semantics, and
//! suitable for security-critical code.
//!
//! # Module overview
//!
//! - `os` (private)
//!   Low-level, non-cryptographic utilities used by the rest of the crate.
//!   This module contains environment-facing helpers (OS entropy
//!   acquisition) and other foundational components required to support
//!   cryptographic code without polluting its APIs.
//!
//! - `hash`
//!   Cryptographic hash functions and related utilities (currently SHA-256,
//!   including a streaming variant with a BIP-340 tagged-hash fastpath).
//!   These implementations are intended for internal use and
//!   protocol-level constructions.
//!
//! - `primitives`
//!   Fixed-size, low-level cryptographic primitives such as `U256`. These
//!   types provide explicit, predictable semantics and are used as
//!   fundamental building blocks across the crate.
//!
//! - `rng`
//!   Cryptographically secure pseudorandom number generators built from
//!   internal primitives. These generators rely on the `os` module for
//!   initial entropy or environment interaction, while providing
//!   deterministic and auditable randomness expansion.
//!
//! - `secp256k1`
//!   A self-contained secp256k1 finite-field and elliptic-curve arithmetic
//!   stack (scalar ring, prime field, affine/Jacobian group, constant-time
//!   and variable-time scalar multiplication) together with BIP-340 Schnorr
//!   signing and verification built on top of it. The constant-time
//!   `ecmult_gen` path is hardened against secret-dependent timing via
//!   table-scan masking and scalar/point blinding; verification uses a
//!   variable-time double-scalar multiplication since it only ever
//!   operates on public data.
//!
//! # Design goals
//!
//! - No heap allocations in core primitives
//! - Minimal and explicit APIs
//! - Stable, well-defined semantics
//! - Clear separation between cryptographic code and supporting utilities
//!
//! This crate is not intended to replace full-featured, externally audited
//! cryptographic libraries, but to serve as a small, controlled foundation
//! for Nebula's internal cryptographic needs.

mod os;

pub mod hash;
pub mod primitives;
pub mod rng;
pub mod secp256k1;
