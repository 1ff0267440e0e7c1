//! Utility functions for block arithmetic and parameter validation.

use crate::error::{Error, Result};

/// Block cipher block length in bytes.
pub const BLOCK_LENGTH: usize = 16;

/// Master key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// Add two 128-bit little-endian integers modulo 2^128.
///
/// The value is handled as two 64-bit lanes; an overflow of lane 0 carries
/// into lane 1.
#[inline]
pub fn add128(x: &[u8; 16], y: &[u8; 16]) -> [u8; 16] {
    let (x0, x1) = lanes(x);
    let (y0, y1) = lanes(y);

    let (r0, carry) = x0.overflowing_add(y0);
    let r1 = x1.wrapping_add(y1).wrapping_add(u64::from(carry));

    join(r0, r1)
}

/// Subtract two 128-bit little-endian integers modulo 2^128.
///
/// Mirror of [`add128`]: a borrow out of lane 0 is taken from lane 1.
#[inline]
pub fn sub128(x: &[u8; 16], y: &[u8; 16]) -> [u8; 16] {
    let (x0, x1) = lanes(x);
    let (y0, y1) = lanes(y);

    let (r0, borrow) = x0.overflowing_sub(y0);
    let r1 = x1.wrapping_sub(y1).wrapping_sub(u64::from(borrow));

    join(r0, r1)
}

#[inline]
fn lanes(x: &[u8; 16]) -> (u64, u64) {
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&x[..8]);
    hi.copy_from_slice(&x[8..]);
    (u64::from_le_bytes(lo), u64::from_le_bytes(hi))
}

#[inline]
fn join(lo: u64, hi: u64) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&lo.to_le_bytes());
    out[8..].copy_from_slice(&hi.to_le_bytes());
    out
}

/// Read four little-endian 32-bit words from a 16-byte slice.
#[inline]
pub fn le32x4(bytes: &[u8]) -> [u32; 4] {
    debug_assert_eq!(bytes.len(), 16);
    let mut words = [0u32; 4];
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

/// Round a length up to the next multiple of the block length.
#[inline]
pub fn pad_len(len: usize) -> usize {
    len.div_ceil(BLOCK_LENGTH) * BLOCK_LENGTH
}

/// Validate and copy a caller-supplied master key.
pub fn validate_key(key: &[u8]) -> Result<[u8; KEY_LENGTH]> {
    if key.len() != KEY_LENGTH {
        return Err(Error::InvalidKeyLength);
    }
    let mut out = [0u8; KEY_LENGTH];
    out.copy_from_slice(key);
    Ok(out)
}

/// Split a block into its 16-byte right half and the rest.
pub fn split_block(block: &mut [u8]) -> Result<(&mut [u8], &mut [u8; BLOCK_LENGTH])> {
    if block.len() < BLOCK_LENGTH {
        return Err(Error::InputTooShort);
    }
    let (left, right) = block.split_at_mut(block.len() - BLOCK_LENGTH);
    let right: &mut [u8; BLOCK_LENGTH] = right.try_into().map_err(|_| Error::InputTooShort)?;
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    fn from_u128(x: u128) -> [u8; 16] {
        x.to_le_bytes()
    }

    #[test]
    fn test_add128_carry() {
        let x = from_u128(u64::MAX as u128);
        let y = from_u128(1);
        assert_eq!(add128(&x, &y), from_u128(1u128 << 64));

        let x = from_u128(u128::MAX);
        assert_eq!(add128(&x, &y), [0u8; 16]);
    }

    #[test]
    fn test_sub128_borrow() {
        let x = from_u128(1u128 << 64);
        let y = from_u128(1);
        assert_eq!(sub128(&x, &y), from_u128(u64::MAX as u128));

        assert_eq!(sub128(&[0u8; 16], &y), from_u128(u128::MAX));
    }

    #[test]
    fn test_lane_arithmetic_matches_u128() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a: u128 = rng.gen();
            let b: u128 = rng.gen();
            assert_eq!(add128(&from_u128(a), &from_u128(b)), from_u128(a.wrapping_add(b)));
            assert_eq!(sub128(&from_u128(a), &from_u128(b)), from_u128(a.wrapping_sub(b)));
        }
    }

    #[test]
    fn test_sub_inverts_add() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let mut x = [0u8; 16];
            let mut y = [0u8; 16];
            rng.fill_bytes(&mut x);
            rng.fill_bytes(&mut y);
            assert_eq!(sub128(&add128(&x, &y), &y), x);
        }
    }

    #[test]
    fn test_le32x4() {
        let bytes: [u8; 16] = core::array::from_fn(|i| i as u8);
        assert_eq!(
            le32x4(&bytes),
            [0x03020100, 0x07060504, 0x0b0a0908, 0x0f0e0d0c]
        );
    }

    #[test]
    fn test_pad_len() {
        assert_eq!(pad_len(0), 0);
        assert_eq!(pad_len(1), 16);
        assert_eq!(pad_len(16), 16);
        assert_eq!(pad_len(1000), 1008);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(&[0u8; 32]).is_ok());
        assert_eq!(validate_key(&[0u8; 31]), Err(Error::InvalidKeyLength));
        assert_eq!(validate_key(&[0u8; 33]), Err(Error::InvalidKeyLength));
    }

    #[test]
    fn test_split_block() {
        let mut block = [7u8; 40];
        let (left, right) = split_block(&mut block).unwrap();
        assert_eq!(left.len(), 24);
        assert_eq!(right, &[7u8; 16]);

        let mut block = [0u8; 16];
        let (left, _) = split_block(&mut block).unwrap();
        assert!(left.is_empty());

        let mut block = [0u8; 15];
        assert!(matches!(split_block(&mut block), Err(Error::InputTooShort)));
    }
}
