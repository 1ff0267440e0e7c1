//! AArch64 Advanced SIMD NH implementation.

#![allow(unsafe_code)]

#[cfg(target_endian = "little")]
use core::arch::aarch64::*;

#[cfg(target_endian = "little")]
use super::{OUTPUT_SIZE, STRIDE};

#[cfg(target_endian = "little")]
#[target_feature(enable = "neon")]
unsafe fn sum_neon_impl(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    let mut acc = [vdupq_n_u64(0); 4];

    for (j, stride) in msg.chunks_exact(STRIDE).enumerate() {
        let m = vreinterpretq_u32_u8(vld1q_u8(stride.as_ptr()));
        for (p, a) in acc.iter_mut().enumerate() {
            let offset = STRIDE * (j + p);
            let k = vreinterpretq_u32_u8(vld1q_u8(key[offset..offset + STRIDE].as_ptr()));
            let t = vaddq_u32(m, k);
            // (t0 * t2, t1 * t3)
            *a = vaddq_u64(*a, vmull_u32(vget_low_u32(t), vget_high_u32(t)));
        }
    }

    for (chunk, a) in out.chunks_exact_mut(8).zip(acc) {
        let mut lanes = [0u64; 2];
        vst1q_u64(lanes.as_mut_ptr(), a);
        chunk.copy_from_slice(&lanes[0].wrapping_add(lanes[1]).to_le_bytes());
    }
}

/// NEON NH. Callers must have checked that NEON is available.
#[cfg(target_endian = "little")]
#[inline]
pub fn sum_neon(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    unsafe { sum_neon_impl(out, msg, key) }
}
