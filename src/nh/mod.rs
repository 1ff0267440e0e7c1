//! NH universal hash with runtime backend selection.
//!
//! NH hashes a message whose length is a multiple of 16 bytes into four
//! 64-bit accumulators. For every 16-byte stride `j` of the message and every
//! pass `p` in `0..4`, with message words `m[0..4]` and key words
//! `k[0..4]` taken from key bytes `16 * (j + p)..16 * (j + p + 1)`:
//!
//! ```text
//! sum[p] += (m[0] + k[0]) * (m[2] + k[2]) + (m[1] + k[1]) * (m[3] + k[3])
//! ```
//!
//! where word additions wrap modulo 2^32 and products and sums wrap modulo
//! 2^64. The key window therefore advances by four words per stride and a
//! message of `n` bytes needs `n + 48` key bytes.
//!
//! Every backend computes exactly this function. The best backend for the
//! running CPU is detected once and cached for the life of the process.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Error, Result};

#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(target_arch = "x86_64")]
mod x86_64;

mod fallback;

/// Largest message hashed by a single NH evaluation in Adiantum.
pub const CHUNK_SIZE: usize = 1024;

/// Message granularity in bytes.
pub const STRIDE: usize = 16;

/// Extra key bytes needed beyond the message length.
pub const KEY_OVERHANG: usize = 48;

/// Key length able to hash a full chunk.
pub const KEY_SIZE: usize = CHUNK_SIZE + KEY_OVERHANG;

/// Digest length in bytes.
pub const OUTPUT_SIZE: usize = 32;

/// NH implementation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable scalar code, available everywhere.
    Portable,
    /// x86-64 SSE2, two products per instruction.
    Sse2,
    /// x86-64 AVX2, two passes per instruction.
    Avx2,
    /// AArch64 Advanced SIMD.
    Neon,
}

/// Cached backend selection.
static BACKEND: AtomicU8 = AtomicU8::new(BACKEND_UNKNOWN);

const BACKEND_UNKNOWN: u8 = 0;
const BACKEND_PORTABLE: u8 = 1;
const BACKEND_SSE2: u8 = 2;
const BACKEND_AVX2: u8 = 3;
const BACKEND_NEON: u8 = 4;

impl Backend {
    /// Every backend, in order of preference.
    pub const ALL: [Backend; 4] = [Backend::Avx2, Backend::Sse2, Backend::Neon, Backend::Portable];

    /// The backend used by [`sum`], detected on first use.
    #[inline]
    pub fn detected() -> Backend {
        match BACKEND.load(Ordering::Relaxed) {
            BACKEND_UNKNOWN => {
                let backend = detect();
                BACKEND.store(backend.code(), Ordering::Relaxed);
                backend
            }
            code => Backend::from_code(code),
        }
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_supported(self) -> bool {
        match self {
            Backend::Portable => true,
            Backend::Sse2 => has_sse2(),
            Backend::Avx2 => has_avx2(),
            Backend::Neon => has_neon(),
        }
    }

    /// Short lowercase name, for reports and benchmarks.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    fn code(self) -> u8 {
        match self {
            Backend::Portable => BACKEND_PORTABLE,
            Backend::Sse2 => BACKEND_SSE2,
            Backend::Avx2 => BACKEND_AVX2,
            Backend::Neon => BACKEND_NEON,
        }
    }

    fn from_code(code: u8) -> Backend {
        match code {
            BACKEND_SSE2 => Backend::Sse2,
            BACKEND_AVX2 => Backend::Avx2,
            BACKEND_NEON => Backend::Neon,
            _ => Backend::Portable,
        }
    }
}

/// Pick the fastest supported backend (called once).
#[cold]
fn detect() -> Backend {
    if cfg!(feature = "force-portable") {
        return Backend::Portable;
    }
    Backend::ALL
        .into_iter()
        .find(|backend| backend.is_supported())
        .unwrap_or(Backend::Portable)
}

#[allow(unreachable_code)]
fn has_sse2() -> bool {
    #[cfg(all(target_arch = "x86_64", feature = "std"))]
    {
        return std::arch::is_x86_feature_detected!("sse2");
    }
    #[cfg(all(target_arch = "x86_64", not(feature = "std")))]
    {
        return cfg!(target_feature = "sse2");
    }
    false
}

#[allow(unreachable_code)]
fn has_avx2() -> bool {
    #[cfg(all(target_arch = "x86_64", feature = "std"))]
    {
        return std::arch::is_x86_feature_detected!("avx2");
    }
    #[cfg(all(target_arch = "x86_64", not(feature = "std")))]
    {
        return cfg!(target_feature = "avx2");
    }
    false
}

#[allow(unreachable_code)]
fn has_neon() -> bool {
    #[cfg(all(target_arch = "aarch64", target_endian = "little", feature = "std"))]
    {
        return std::arch::is_aarch64_feature_detected!("neon");
    }
    #[cfg(all(target_arch = "aarch64", target_endian = "little", not(feature = "std")))]
    {
        return cfg!(target_feature = "neon");
    }
    false
}

fn check(msg: &[u8], key: &[u8]) -> Result<()> {
    if msg.len() % STRIDE != 0 {
        return Err(Error::InvalidMessageLength);
    }
    if key.len() < msg.len().saturating_add(KEY_OVERHANG) {
        return Err(Error::KeyTooShort);
    }
    Ok(())
}

/// Compute the NH hash of `msg` under `key` with the detected backend.
///
/// # Errors
///
/// Returns `Error::InvalidMessageLength` if `msg.len()` is not a multiple of
/// 16 and `Error::KeyTooShort` if `key` is not at least 48 bytes longer than
/// `msg`.
pub fn sum(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) -> Result<()> {
    check(msg, key)?;
    dispatch(Backend::detected(), out, msg, key);
    Ok(())
}

/// Compute the NH hash of `msg` under `key` with a specific backend.
///
/// # Errors
///
/// Same as [`sum`], plus `Error::BackendUnavailable` if `backend` cannot run
/// on this CPU.
pub fn sum_with(backend: Backend, out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) -> Result<()> {
    check(msg, key)?;
    if !backend.is_supported() {
        return Err(Error::BackendUnavailable);
    }
    dispatch(backend, out, msg, key);
    Ok(())
}

/// Hash one pre-validated chunk with the detected backend.
#[inline]
pub(crate) fn sum_chunk(out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    debug_assert!(check(msg, key).is_ok());
    dispatch(Backend::detected(), out, msg, key);
}

#[inline]
fn dispatch(backend: Backend, out: &mut [u8; OUTPUT_SIZE], msg: &[u8], key: &[u8]) {
    match backend {
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => x86_64::sum_avx2(out, msg, key),
        #[cfg(target_arch = "x86_64")]
        Backend::Sse2 => x86_64::sum_sse2(out, msg, key),
        #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
        Backend::Neon => aarch64::sum_neon(out, msg, key),
        _ => fallback::sum(out, msg, key),
    }
}
