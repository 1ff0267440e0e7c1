//! # Adiantum and HPolyC - wide-block tweakable encryption
//!
//! This crate implements the HBSH (hash, block cipher, stream cipher, hash)
//! construction and its two standard instantiations:
//!
//! - **Adiantum**: XChaCha, AES-256 and an NH + Poly1305 tweakable hash.
//! - **HPolyC**: XChaCha, AES-256 and a single Poly1305 tweakable hash.
//!
//! Both are length-preserving: a block of any length of at least 16 bytes
//! (typically a disk sector) encrypts to a block of the same length, and
//! changing any plaintext bit scrambles the whole ciphertext block. There is
//! no authentication tag; this is not an AEAD.
//!
//! ## Features
//!
//! - **Wide blocks**: one permutation over the whole sector, no chaining mode
//! - **Fast NH**: SSE2, AVX2 and NEON backends selected at runtime
//! - **Key hygiene**: derived sub-keys and per-call scratch are zeroized
//! - **No-std Compatible**: disable the default `std` feature (needs `alloc`)
//!
//! ## Usage
//!
//! ```rust
//! use adiantum::Hbsh;
//!
//! let key = [0u8; 32];
//! let cipher = Hbsh::adiantum(&key, 12)?;
//!
//! let sector = [0x55u8; 4096];
//! let tweak = 1234u64.to_le_bytes();
//!
//! let ciphertext = cipher.encrypt(&sector, &tweak)?;
//! assert_eq!(ciphertext.len(), sector.len());
//!
//! let decrypted = cipher.decrypt(&ciphertext, &tweak)?;
//! assert_eq!(decrypted, sector);
//! # Ok::<(), adiantum::Error>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

extern crate alloc;

mod adiantum;
mod error;
mod hbsh;
mod hchacha;
mod hpolyc;
pub mod nh;
mod utils;
mod xchacha;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use hbsh::{Hbsh, Variant};
pub use hchacha::hchacha;
pub use hpolyc::MAX_TWEAK_LENGTH;
pub use utils::{BLOCK_LENGTH, KEY_LENGTH};
pub use xchacha::{Rounds, XChaCha, MAX_LOGICAL_NONCE_LENGTH};
