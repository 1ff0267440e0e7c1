//! HChaCha nonce-extension function.
//!
//! HChaCha runs the ChaCha permutation over `constants ‖ key ‖ nonce` and
//! outputs words 0..4 and 12..16 of the final state. Unlike the keystream
//! block function, the input state is not added back at the end, which is
//! what makes the output usable as a fresh sub-key.

use zeroize::Zeroize;

use crate::xchacha::Rounds;

/// HChaCha output length in bytes.
pub const OUTPUT_LENGTH: usize = 32;

/// HChaCha nonce length in bytes.
pub const NONCE_LENGTH: usize = 16;

/// "expand 32-byte k"
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

#[inline(always)]
fn quarter_round(a: usize, b: usize, c: usize, d: usize, state: &mut [u32; 16]) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Derive a 32-byte sub-key from `key` and a 16-byte `nonce`.
pub fn hchacha(key: &[u8; 32], nonce: &[u8; NONCE_LENGTH], rounds: Rounds) -> [u8; OUTPUT_LENGTH] {
    let mut state = [0u32; 16];
    state[..4].copy_from_slice(&CONSTANTS);
    for (v, chunk) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for (v, chunk) in state[12..].iter_mut().zip(nonce.chunks_exact(4)) {
        *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for _ in 0..rounds.double_rounds() {
        // columns
        quarter_round(0, 4, 8, 12, &mut state);
        quarter_round(1, 5, 9, 13, &mut state);
        quarter_round(2, 6, 10, 14, &mut state);
        quarter_round(3, 7, 11, 15, &mut state);

        // diagonals
        quarter_round(0, 5, 10, 15, &mut state);
        quarter_round(1, 6, 11, 12, &mut state);
        quarter_round(2, 7, 8, 13, &mut state);
        quarter_round(3, 4, 9, 14, &mut state);
    }

    let mut out = [0u8; OUTPUT_LENGTH];
    for (chunk, v) in out[..16].chunks_exact_mut(4).zip(&state[..4]) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }
    for (chunk, v) in out[16..].chunks_exact_mut(4).zip(&state[12..]) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }

    state.zeroize();
    out
}
