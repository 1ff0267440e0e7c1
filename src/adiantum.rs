//! Adiantum tweakable hash: NH over 1024-byte chunks, Poly1305 over the
//! chunk digests, plus a separate Poly1305 over the tweak.
//!
//! ```text
//! H(T, L) = Poly1305(K_T, le64(8 * |L|) ‖ 0^64 ‖ T)
//!         + Poly1305(K_M, NH(L_1) ‖ NH(L_2) ‖ ...)      (mod 2^128)
//! ```
//!
//! The length in the tweak header is the bit length of the message, not of
//! the tweak.

use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::{Key, Poly1305};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::nh;
use crate::utils::{add128, pad_len, BLOCK_LENGTH};

/// Poly1305 `r` bytes taken from the bootstrap keystream per key.
const POLY_R_LENGTH: usize = 16;

/// Hash key material consumed from the bootstrap keystream.
pub(crate) const KEY_MATERIAL_LENGTH: usize = 2 * POLY_R_LENGTH + nh::KEY_SIZE;

/// Keys for the NH + Poly1305 tweakable hash.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct NhPoly1305 {
    key_t: [u8; 32],
    key_m: [u8; 32],
    key_nh: [u8; nh::KEY_SIZE],
}

impl NhPoly1305 {
    /// Build the hash from `K_T ‖ K_M ‖ K_NH` key material.
    pub(crate) fn new(material: &[u8; KEY_MATERIAL_LENGTH]) -> Self {
        let (key_t_r, rest) = material.split_at(POLY_R_LENGTH);
        let (key_m_r, key_nh_bytes) = rest.split_at(POLY_R_LENGTH);

        // s half stays zero
        let mut key_t = [0u8; 32];
        let mut key_m = [0u8; 32];
        let mut key_nh = [0u8; nh::KEY_SIZE];
        key_t[..POLY_R_LENGTH].copy_from_slice(key_t_r);
        key_m[..POLY_R_LENGTH].copy_from_slice(key_m_r);
        key_nh.copy_from_slice(key_nh_bytes);

        Self { key_t, key_m, key_nh }
    }

    /// Hash `msg` under `tweak`.
    pub(crate) fn sum(&self, tweak: &[u8], msg: &[u8]) -> [u8; BLOCK_LENGTH] {
        let out_t = self.hash_tweak(tweak, msg.len());
        let out_m = self.hash_message(msg);
        add128(&out_t, &out_m)
    }

    fn hash_tweak(&self, tweak: &[u8], msg_len: usize) -> [u8; BLOCK_LENGTH] {
        let mut header = [0u8; BLOCK_LENGTH];
        header[..8].copy_from_slice(&(msg_len as u64).wrapping_mul(8).to_le_bytes());

        let mut mac = Poly1305::new(Key::from_slice(&self.key_t));
        mac.update_padded(&header);
        tag_bytes(&mac.compute_unpadded(tweak))
    }

    fn hash_message(&self, msg: &[u8]) -> [u8; BLOCK_LENGTH] {
        let mut mac = Poly1305::new(Key::from_slice(&self.key_m));
        let mut digest = [0u8; nh::OUTPUT_SIZE];

        let mut chunks = msg.chunks_exact(nh::CHUNK_SIZE);
        for chunk in &mut chunks {
            nh::sum_chunk(&mut digest, chunk, &self.key_nh);
            mac.update_padded(&digest);
        }

        let tail = chunks.remainder();
        if !tail.is_empty() {
            let mut padded = [0u8; nh::CHUNK_SIZE];
            padded[..tail.len()].copy_from_slice(tail);
            nh::sum_chunk(&mut digest, &padded[..pad_len(tail.len())], &self.key_nh);
            mac.update_padded(&digest);
            padded.zeroize();
        }

        digest.zeroize();
        tag_bytes(&mac.finalize())
    }
}

fn tag_bytes(tag: &poly1305::Tag) -> [u8; BLOCK_LENGTH] {
    let mut out = [0u8; BLOCK_LENGTH];
    out.copy_from_slice(tag);
    out
}
