//! Portable NH implementation.

use super::{OUTPUT_SIZE, STRIDE};
use crate::utils::le32x4;

/// Portable NH, the reference the SIMD backends are checked against.
pub fn sum(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    let mut sums = [0u64; 4];

    for (j, stride) in msg.chunks_exact(STRIDE).enumerate() {
        let m = le32x4(stride);
        for (p, acc) in sums.iter_mut().enumerate() {
            let offset = STRIDE * (j + p);
            let k = le32x4(&key[offset..offset + STRIDE]);
            *acc = acc
                .wrapping_add(product(m[0], k[0], m[2], k[2]))
                .wrapping_add(product(m[1], k[1], m[3], k[3]));
        }
    }

    for (chunk, acc) in out.chunks_exact_mut(8).zip(sums) {
        chunk.copy_from_slice(&acc.to_le_bytes());
    }
}

#[inline(always)]
fn product(a: u32, ka: u32, b: u32, kb: u32) -> u64 {
    u64::from(a.wrapping_add(ka)) * u64::from(b.wrapping_add(kb))
}
