//! HPolyC tweakable hash: a single Poly1305 pass over
//! `le32(8 * |T|) ‖ T ‖ pad16 ‖ M`.

use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::{Key, Poly1305};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::utils::BLOCK_LENGTH;

/// Hash key material consumed from the bootstrap keystream (Poly1305 `r`).
pub(crate) const KEY_MATERIAL_LENGTH: usize = 16;

/// Bytes of the bit-length header.
const HEADER_LENGTH: usize = 4;

/// Longest tweak whose bit length fits the 32-bit header.
pub const MAX_TWEAK_LENGTH: usize = (u32::MAX / 8) as usize;

/// Key for the direct Poly1305 tweakable hash.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Poly1305Hash {
    key: [u8; 32],
}

impl Poly1305Hash {
    pub(crate) fn new(material: &[u8; KEY_MATERIAL_LENGTH]) -> Self {
        let mut key = [0u8; 32];
        key[..KEY_MATERIAL_LENGTH].copy_from_slice(material);
        Self { key }
    }

    /// Hash `msg` under `tweak`.
    ///
    /// # Errors
    ///
    /// Returns `Error::TweakTooLong` if the tweak bit length overflows 32 bits.
    pub(crate) fn sum(&self, tweak: &[u8], msg: &[u8]) -> Result<[u8; BLOCK_LENGTH]> {
        let bits = tweak_bits(tweak.len())?;

        let split = tweak.len().min(BLOCK_LENGTH - HEADER_LENGTH);
        let (tweak_head, tweak_rest) = tweak.split_at(split);

        let mut first = [0u8; BLOCK_LENGTH];
        first[..HEADER_LENGTH].copy_from_slice(&bits.to_le_bytes());
        first[HEADER_LENGTH..HEADER_LENGTH + split].copy_from_slice(tweak_head);

        let mut mac = Poly1305::new(Key::from_slice(&self.key));
        mac.update_padded(&first);
        mac.update_padded(tweak_rest);
        first.zeroize();

        let tag = mac.compute_unpadded(msg);
        let mut out = [0u8; BLOCK_LENGTH];
        out.copy_from_slice(&tag);
        Ok(out)
    }
}

/// Bit length of a tweak as carried in the 32-bit header.
fn tweak_bits(len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(Error::TweakTooLong)
}
