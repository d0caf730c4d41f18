//! Incremental SHA-256 with a BIP-340 tagged-hash fastpath.
//!
//! `TaggedHash("BIP0340/nonce" | "BIP0340/aux" | "BIP0340/challenge", msg)` is
//! `SHA256(SHA256(tag) || SHA256(tag) || msg)`. Because the tag is fixed
//! and known at compile time for these three tags, the compression of the
//! 64-byte `SHA256(tag) || SHA256(tag)` prefix block can be precomputed
//! once into a midstate, turning every hash of that form into a single
//! streaming hash starting from the midstate instead of three full blocks.

use crate::hash::sha256::H256_INIT;
use crate::hash::sha256::core::compress;
use crate::primitives::U256;

/// Precomputed post-first-block state for `TaggedHash("BIP0340/nonce", ..)`.
const MIDSTATE_NONCE: [u32; 8] = [
    0x46615b35, 0xf4bfbff7, 0x9f8dc671, 0x83627ab3, 0x60217180, 0x57358661, 0x21a29e54, 0x68b07b4c,
];

/// Precomputed post-first-block state for `TaggedHash("BIP0340/aux", ..)`.
const MIDSTATE_AUX: [u32; 8] = [
    0x24dd3219, 0x4eba7e70, 0xca0fabb9, 0x0fa3166d, 0x3afbe4b1, 0x4c44df97, 0x4aac2739, 0x249e850a,
];

/// Precomputed post-first-block state for `TaggedHash("BIP0340/challenge", ..)`.
const MIDSTATE_CHALLENGE: [u32; 8] = [
    0x9cecba11, 0x23925381, 0x11679112, 0xd1627e0f, 0x97c87550, 0x003cc765, 0x90f61164, 0x33e9b66a,
];

/// A tag with a precomputed midstate, saving the two block compressions
/// that `SHA256(tag) || SHA256(tag)` would otherwise cost per hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BipTag {
    Nonce,
    Aux,
    Challenge,
}

impl BipTag {
    fn midstate(self) -> [u32; 8] {
        match self {
            BipTag::Nonce => MIDSTATE_NONCE,
            BipTag::Aux => MIDSTATE_AUX,
            BipTag::Challenge => MIDSTATE_CHALLENGE,
        }
    }
}

/// Incremental SHA-256 hasher.
#[derive(Clone)]
pub struct Sha256 {
    state: [u32; 8],
    buffer: [u8; 64],
    buffered: usize,
    length: u64,
}

impl Sha256 {
    pub fn new() -> Sha256 {
        Sha256 { state: H256_INIT, buffer: [0u8; 64], buffered: 0, length: 0 }
    }

    /// Starts from one of the three BIP-340 tagged-hash midstates, as if
    /// `SHA256(tag) || SHA256(tag)` (one 64-byte block) had already been
    /// written, without paying for its compression.
    pub fn initialize_tagged(tag: BipTag) -> Sha256 {
        Sha256 { state: tag.midstate(), buffer: [0u8; 64], buffered: 0, length: 64 }
    }

    /// Generic tagged hash for tags without a precomputed midstate.
    pub fn initialize_tagged_generic(tag: &[u8]) -> Sha256 {
        let tag_hash = super::core::sha256(tag).0;
        let mut h = Sha256::new();
        h.write(&tag_hash);
        h.write(&tag_hash);
        h
    }

    pub fn write(&mut self, mut data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let need = 64 - self.buffered;
            let take = need.min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered == 64 {
                let block = self.buffer;
                compress(&block, &mut self.state);
                self.buffered = 0;
            }
        }

        while data.len() >= 64 {
            let block: &[u8; 64] = data[..64].try_into().unwrap();
            compress(block, &mut self.state);
            data = &data[64..];
        }

        if !data.is_empty() {
            self.buffer[..data.len()].copy_from_slice(data);
            self.buffered = data.len();
        }
    }

    pub fn finalize(mut self) -> U256 {
        let bit_len = self.length << 3;
        let mut pad = [0u8; 64];
        pad[0] = 0x80;

        if self.buffered < 56 {
            self.write(&pad[..56 - self.buffered]);
        } else {
            self.write(&pad[..64 - self.buffered]);
            self.write(&[0u8; 56]);
        }

        let len_bytes = bit_len.to_be_bytes();
        self.write(&len_bytes);

        U256::from(self.state)
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Sha256::new()
    }
}

/// One-shot tagged hash using the midstate fastpath when available.
pub fn tagged_hash(tag: BipTag, msg: &[u8]) -> U256 {
    let mut h = Sha256::initialize_tagged(tag);
    h.write(msg);
    h.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_matches_one_shot() {
        let msg = b"the quick brown fox jumps over the lazy dog, repeated to cross a block boundary";
        let mut s = Sha256::new();
        s.write(msg);
        let streamed = s.finalize();
        let oneshot = super::super::core::sha256(msg);
        assert_eq!(streamed, oneshot);
    }

    #[test]
    fn split_writes_match_single_write() {
        let msg = b"0123456789abcdef".repeat(5);
        let mut whole = Sha256::new();
        whole.write(&msg);
        let whole = whole.finalize();

        let mut split = Sha256::new();
        for chunk in msg.chunks(7) {
            split.write(chunk);
        }
        let split = split.finalize();

        assert_eq!(whole, split);
    }

    #[test]
    fn tagged_midstate_matches_generic() {
        let msg = b"hello schnorr";
        let fast = tagged_hash(BipTag::Challenge, msg);
        let generic = {
            let mut h = Sha256::initialize_tagged_generic(b"BIP0340/challenge");
            h.write(msg);
            h.finalize()
        };
        assert_eq!(fast, generic);
    }
}
