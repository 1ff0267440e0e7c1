//! HBSH composition: a stream cipher, a block cipher and a tweakable hash
//! combined into a length-preserving permutation of blocks of 16 bytes or
//! more.
//!
//! ```text
//! encrypt(P = L ‖ R, T):              decrypt(C = Cl ‖ Cr, T):
//!   M  = R + H(T, L)                    Cm = Cr + H(T, Cl)
//!   Cm = AES(M)                         L  = Cl ^ XChaCha(Cm)
//!   Cl = L ^ XChaCha(Cm)                M  = AES^-1(Cm)
//!   Cr = Cm - H(T, Cl)                  R  = M - H(T, L)
//! ```
//!
//! Additions and subtractions are modulo 2^128 on little-endian values.
//!
//! All sub-keys come from the stream cipher itself, run over zeros with an
//! empty nonce.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use zeroize::Zeroize;

use crate::adiantum::{self, NhPoly1305};
use crate::error::Result;
use crate::hpolyc::{self, Poly1305Hash};
use crate::utils::{add128, split_block, sub128, validate_key, BLOCK_LENGTH, KEY_LENGTH};
use crate::xchacha::{Rounds, XChaCha};

/// AES-256 key bytes at the head of the bootstrap keystream.
const AES_KEY_LENGTH: usize = 32;

/// Largest bootstrap output, for the NH + Poly1305 hash.
const BOOTSTRAP_CAPACITY: usize = AES_KEY_LENGTH + adiantum::KEY_MATERIAL_LENGTH;

/// Tweakable hash construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// NH + Poly1305: fast on long blocks.
    Adiantum,
    /// Direct Poly1305: smaller key, slower on long blocks.
    HPolyC,
}

impl Variant {
    /// Display name of the construction.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Adiantum => "Adiantum",
            Variant::HPolyC => "HPolyC",
        }
    }

    /// Sub-key bytes drawn from the stream cipher at construction.
    pub const fn key_material_length(self) -> usize {
        AES_KEY_LENGTH
            + match self {
                Variant::Adiantum => adiantum::KEY_MATERIAL_LENGTH,
                Variant::HPolyC => hpolyc::KEY_MATERIAL_LENGTH,
            }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
enum TweakableHash {
    // the NH key is over a kilobyte
    NhPoly1305(Box<NhPoly1305>),
    Poly1305(Poly1305Hash),
}

impl TweakableHash {
    #[inline]
    fn sum(&self, tweak: &[u8], msg: &[u8]) -> Result<[u8; BLOCK_LENGTH]> {
        match self {
            TweakableHash::NhPoly1305(h) => Ok(h.sum(tweak, msg)),
            TweakableHash::Poly1305(h) => h.sum(tweak, msg),
        }
    }
}

/// A keyed HBSH cipher.
///
/// Instances are immutable after construction. Every call works on
/// stack-local scratch, so one instance can serve many threads at once.
///
/// # Example
///
/// ```
/// use adiantum::Hbsh;
///
/// let cipher = Hbsh::adiantum(&[0x42; 32], 12)?;
/// let mut sector = [0u8; 512];
/// let tweak = 7u64.to_le_bytes();
///
/// cipher.encrypt_in_place(&mut sector, &tweak)?;
/// cipher.decrypt_in_place(&mut sector, &tweak)?;
/// assert_eq!(sector, [0u8; 512]);
/// # Ok::<(), adiantum::Error>(())
/// ```
#[derive(Clone)]
pub struct Hbsh {
    stream: XChaCha,
    block: Aes256,
    hash: TweakableHash,
    variant: Variant,
}

impl Hbsh {
    /// Derive a cipher of the given construction from a 32-byte master key.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKeyLength` if `key` is not 32 bytes and
    /// `Error::InvalidRounds` if `rounds` is not 8, 12 or 20.
    pub fn new(variant: Variant, key: &[u8], rounds: usize) -> Result<Self> {
        let rounds = Rounds::from_count(rounds)?;
        let mut master = validate_key(key)?;
        let stream = XChaCha::new(&master, rounds);
        master.zeroize();

        let (block, hash) = match variant {
            Variant::Adiantum => {
                let (block, mut material) = bootstrap::<{ adiantum::KEY_MATERIAL_LENGTH }>(&stream)?;
                let hash = TweakableHash::NhPoly1305(Box::new(NhPoly1305::new(&material)));
                material.zeroize();
                (block, hash)
            }
            Variant::HPolyC => {
                let (block, mut material) = bootstrap::<{ hpolyc::KEY_MATERIAL_LENGTH }>(&stream)?;
                let hash = TweakableHash::Poly1305(Poly1305Hash::new(&material));
                material.zeroize();
                (block, hash)
            }
        };

        Ok(Self {
            stream,
            block,
            hash,
            variant,
        })
    }

    /// Adiantum: XChaCha, AES-256 and NH + Poly1305.
    ///
    /// # Errors
    ///
    /// See [`Hbsh::new`].
    pub fn adiantum(key: &[u8], rounds: usize) -> Result<Self> {
        Self::new(Variant::Adiantum, key, rounds)
    }

    /// HPolyC: XChaCha, AES-256 and Poly1305.
    ///
    /// # Errors
    ///
    /// See [`Hbsh::new`].
    pub fn hpolyc(key: &[u8], rounds: usize) -> Result<Self> {
        Self::new(Variant::HPolyC, key, rounds)
    }

    /// Tweakable hash construction of this instance.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// ChaCha round count of this instance.
    pub fn rounds(&self) -> Rounds {
        self.stream.rounds()
    }

    /// Encrypt `block` in place under `tweak`.
    ///
    /// Every check runs before the first byte is written: on error `block`
    /// is left untouched.
    ///
    /// The keystream for one block uses a 32-bit ChaCha block counter, so
    /// `block` may be at most 256 GiB plus 16 bytes long.
    ///
    /// # Errors
    ///
    /// Returns `Error::InputTooShort` if `block` is shorter than 16 bytes,
    /// `Error::InputTooLong` if it exceeds the keystream of a single nonce
    /// and `Error::TweakTooLong` if the HPolyC length header would overflow.
    pub fn encrypt_in_place(&self, block: &mut [u8], tweak: &[u8]) -> Result<()> {
        let (left, right) = split_block(block)?;

        let mut cm = add128(right, &self.hash.sum(tweak, left)?);
        self.block.encrypt_block(GenericArray::from_mut_slice(&mut cm));
        self.stream.apply_keystream(&cm, left)?;

        *right = sub128(&cm, &self.hash.sum(tweak, left)?);
        cm.zeroize();
        Ok(())
    }

    /// Decrypt `block` in place under `tweak`.
    ///
    /// # Errors
    ///
    /// Same as [`Hbsh::encrypt_in_place`].
    pub fn decrypt_in_place(&self, block: &mut [u8], tweak: &[u8]) -> Result<()> {
        let (left, right) = split_block(block)?;

        let cm = add128(right, &self.hash.sum(tweak, left)?);
        self.stream.apply_keystream(&cm, left)?;

        let mut pm = cm;
        self.block.decrypt_block(GenericArray::from_mut_slice(&mut pm));
        *right = sub128(&pm, &self.hash.sum(tweak, left)?);
        pm.zeroize();
        Ok(())
    }

    /// Encrypt a copy of `block` under `tweak`.
    ///
    /// # Errors
    ///
    /// Same as [`Hbsh::encrypt_in_place`].
    pub fn encrypt(&self, block: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let mut out = block.to_vec();
        self.encrypt_in_place(&mut out, tweak)?;
        Ok(out)
    }

    /// Decrypt a copy of `block` under `tweak`.
    ///
    /// # Errors
    ///
    /// Same as [`Hbsh::encrypt_in_place`].
    pub fn decrypt(&self, block: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let mut out = block.to_vec();
        self.decrypt_in_place(&mut out, tweak)?;
        Ok(out)
    }
}

impl fmt::Debug for Hbsh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hbsh")
            .field("variant", &self.variant)
            .field("rounds", &self.rounds().count())
            .finish_non_exhaustive()
    }
}

/// Run the stream cipher over zeros with the empty nonce and split the
/// output into the AES-256 key and `N` bytes of hash key material.
fn bootstrap<const N: usize>(stream: &XChaCha) -> Result<(Aes256, [u8; N])> {
    let mut buf = [0u8; BOOTSTRAP_CAPACITY];
    let material = &mut buf[..AES_KEY_LENGTH + N];
    stream.apply_keystream(&[], material)?;

    let (aes_key, hash_key) = material.split_at(AES_KEY_LENGTH);
    let block = Aes256::new(GenericArray::from_slice(aes_key));
    let mut out = [0u8; N];
    out.copy_from_slice(hash_key);

    buf.zeroize();
    Ok((block, out))
}

const _: () = assert!(Variant::Adiantum.key_material_length() == BOOTSTRAP_CAPACITY);
const _: () = assert!(KEY_LENGTH == AES_KEY_LENGTH);
