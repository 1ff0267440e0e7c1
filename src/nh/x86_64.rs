//! x86-64 SSE2 and AVX2 NH implementations.
//!
//! Both keep the portable formulation: `_mm_mul_epu32` multiplies the even
//! 32-bit lanes into 64-bit products, so each pass shuffles `m + k` into
//! `(t0, t1)` and `(t2, t3)` and accumulates `(t0 * t2, t1 * t3)`.

#![allow(unsafe_code)]

use core::arch::x86_64::*;

use super::{OUTPUT_SIZE, STRIDE};

/// Lanes (0, 0, 1, 1): feeds `t0`, `t1` to the even lanes.
const LOW_PAIR: i32 = 0x50;
/// Lanes (2, 2, 3, 3): feeds `t2`, `t3` to the even lanes.
const HIGH_PAIR: i32 = 0xfa;

#[target_feature(enable = "sse2")]
unsafe fn sum_sse2_impl(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    let mut acc = [_mm_setzero_si128(); 4];

    for (j, stride) in msg.chunks_exact(STRIDE).enumerate() {
        let m = _mm_loadu_si128(stride.as_ptr() as *const __m128i);
        for (p, a) in acc.iter_mut().enumerate() {
            let offset = STRIDE * (j + p);
            let k = &key[offset..offset + STRIDE];
            let t = _mm_add_epi32(m, _mm_loadu_si128(k.as_ptr() as *const __m128i));
            let prod = _mm_mul_epu32(
                _mm_shuffle_epi32(t, LOW_PAIR),
                _mm_shuffle_epi32(t, HIGH_PAIR),
            );
            *a = _mm_add_epi64(*a, prod);
        }
    }

    for (chunk, a) in out.chunks_exact_mut(8).zip(acc) {
        let mut lanes = [0u64; 2];
        _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, a);
        chunk.copy_from_slice(&lanes[0].wrapping_add(lanes[1]).to_le_bytes());
    }
}

/// SSE2 NH. Callers must have checked that SSE2 is available.
#[inline]
pub fn sum_sse2(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    unsafe { sum_sse2_impl(out, msg, key) }
}

#[target_feature(enable = "avx2")]
unsafe fn sum_avx2_impl(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    // passes 0 and 1 in acc01, passes 2 and 3 in acc23
    let mut acc01 = _mm256_setzero_si256();
    let mut acc23 = _mm256_setzero_si256();

    for (j, stride) in msg.chunks_exact(STRIDE).enumerate() {
        let m = _mm256_broadcastsi128_si256(_mm_loadu_si128(stride.as_ptr() as *const __m128i));
        let offset = STRIDE * j;
        let k = &key[offset..offset + 4 * STRIDE];

        let t01 = _mm256_add_epi32(m, _mm256_loadu_si256(k.as_ptr() as *const __m256i));
        let t23 = _mm256_add_epi32(m, _mm256_loadu_si256(k[2 * STRIDE..].as_ptr() as *const __m256i));

        acc01 = _mm256_add_epi64(
            acc01,
            _mm256_mul_epu32(
                _mm256_shuffle_epi32(t01, LOW_PAIR),
                _mm256_shuffle_epi32(t01, HIGH_PAIR),
            ),
        );
        acc23 = _mm256_add_epi64(
            acc23,
            _mm256_mul_epu32(
                _mm256_shuffle_epi32(t23, LOW_PAIR),
                _mm256_shuffle_epi32(t23, HIGH_PAIR),
            ),
        );
    }

    let mut lanes = [0u64; 8];
    _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc01);
    _mm256_storeu_si256(lanes[4..].as_mut_ptr() as *mut __m256i, acc23);

    for (chunk, pair) in out.chunks_exact_mut(8).zip(lanes.chunks_exact(2)) {
        chunk.copy_from_slice(&pair[0].wrapping_add(pair[1]).to_le_bytes());
    }
}

/// AVX2 NH. Callers must have checked that AVX2 is available.
#[inline]
pub fn sum_avx2(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    unsafe { sum_avx2_impl(out, msg, key) }
}
