//! Nonce-extended ChaCha stream cipher.
//!
//! The logical nonce is copied into a 24-byte buffer followed by a single
//! `0x01` byte and zero fill. The first 16 bytes go through [`hchacha`] with
//! the long-term key to produce a sub-key; the last 8 bytes become the nonce
//! of the base ChaCha keystream under that sub-key.
//!
//! Key derivation uses an empty logical nonce (`01 00 .. 00`), while block
//! encryption uses a 16-byte pseudorandom one (`xx .. xx 01 00 .. 00`), so
//! the two uses never share a ChaCha sub-key in practice.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha12, ChaCha20, ChaCha8, Key, Nonce};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::hchacha::{hchacha, NONCE_LENGTH as HNONCE_LENGTH};

/// Full nonce width of the extended stream cipher in bytes.
pub const NONCE_LENGTH: usize = 24;

/// Longest logical nonce accepted by [`XChaCha::apply_keystream`].
pub const MAX_LOGICAL_NONCE_LENGTH: usize = NONCE_LENGTH - 1;

/// ChaCha round count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounds {
    /// ChaCha8.
    R8,
    /// ChaCha12.
    R12,
    /// ChaCha20.
    R20,
}

impl Rounds {
    /// Parse a round count, accepting only 8, 12 and 20.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            8 => Ok(Rounds::R8),
            12 => Ok(Rounds::R12),
            20 => Ok(Rounds::R20),
            _ => Err(Error::InvalidRounds),
        }
    }

    /// Number of rounds.
    pub const fn count(self) -> usize {
        match self {
            Rounds::R8 => 8,
            Rounds::R12 => 12,
            Rounds::R20 => 20,
        }
    }

    /// Number of column/diagonal double rounds.
    pub const fn double_rounds(self) -> usize {
        self.count() / 2
    }
}

impl TryFrom<usize> for Rounds {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        Rounds::from_count(count)
    }
}

/// XChaCha stream cipher keyed with a 32-byte key.
///
/// The cipher itself is stateless: every call rebuilds the sub-key from the
/// nonce, so one instance can be shared between threads.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct XChaCha {
    key: [u8; 32],
    #[zeroize(skip)]
    rounds: Rounds,
}

impl XChaCha {
    /// Create a stream cipher from a 32-byte key.
    pub fn new(key: &[u8; 32], rounds: Rounds) -> Self {
        Self { key: *key, rounds }
    }

    /// Round count used by this cipher.
    pub fn rounds(&self) -> Rounds {
        self.rounds
    }

    /// XOR `buf` with the keystream selected by the logical `nonce`.
    ///
    /// Encryption and decryption are the same operation. An empty `buf` is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidNonceLength` if `nonce` is longer than 23 bytes
    /// and `Error::InputTooLong` if `buf` exceeds the keystream length
    /// available to a single nonce.
    pub fn apply_keystream(&self, nonce: &[u8], buf: &mut [u8]) -> Result<()> {
        if nonce.len() > MAX_LOGICAL_NONCE_LENGTH {
            return Err(Error::InvalidNonceLength);
        }

        let mut full = [0u8; NONCE_LENGTH];
        full[..nonce.len()].copy_from_slice(nonce);
        full[nonce.len()] = 1;

        let mut hnonce = [0u8; HNONCE_LENGTH];
        hnonce.copy_from_slice(&full[..HNONCE_LENGTH]);
        let mut subkey = hchacha(&self.key, &hnonce, self.rounds);

        // 32-bit block counter, zero high counter word, 64-bit nonce
        let mut inner = [0u8; 12];
        inner[4..].copy_from_slice(&full[HNONCE_LENGTH..]);

        let key = Key::from_slice(&subkey);
        let iv = Nonce::from_slice(&inner);
        let res = match self.rounds {
            Rounds::R8 => ChaCha8::new(key, iv).try_apply_keystream(buf),
            Rounds::R12 => ChaCha12::new(key, iv).try_apply_keystream(buf),
            Rounds::R20 => ChaCha20::new(key, iv).try_apply_keystream(buf),
        };

        subkey.zeroize();
        res.map_err(|_| Error::InputTooLong)
    }
}
