//! 32-bit MurmurHash2.
//!
//! Non-cryptographic: output is well distributed, but there is no collision or
//! preimage resistance. The result is deterministic for a given seed. Input is
//! consumed in little-endian 4-byte blocks and the 32-bit result is serialized
//! least-significant byte first, giving 8 hex chars.

/// Default seed.
pub const DEFAULT_SEED: u32 = 0x9747_b28c;

const M: u32 = 0x5bd1_e995;
const R: u32 = 24;

/// Computes MurmurHash2 of `data` with `seed`.
pub fn murmur2_32(data: &[u8], seed: u32) -> u32 {
    // length is folded in as the low 32 bits, like the reference does
    let mut h = seed ^ (data.len() as u32);

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let mut k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);

        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h = h.wrapping_mul(M);
        h ^= k;
    }

    let tail = blocks.remainder();
    if tail.len() == 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;
    h
}

/// MurmurHash2 of `data` as 4 little-endian bytes.
#[inline]
pub fn murmur2_32_bytes(data: &[u8], seed: u32) -> [u8; 4] {
    murmur2_32(data, seed).to_le_bytes()
}
