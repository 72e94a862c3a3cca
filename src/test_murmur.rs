#![cfg(test)]

use crate::hash::{Algorithm, HashProvider};
use crate::murmur::{murmur2_32, murmur2_32_bytes, DEFAULT_SEED};

const M: u32 = 0x5bd1_e995;

#[test]
fn test_empty_input_derivation() {
    // no blocks, no tail: only the finalizer runs over the seed
    let mut h = DEFAULT_SEED;
    h ^= h >> 13;
    h = h.wrapping_mul(M);
    h ^= h >> 15;

    assert_eq!(murmur2_32(b"", DEFAULT_SEED), h);
    assert_eq!(hex::encode(murmur2_32_bytes(b"", DEFAULT_SEED)), "d9086e10");
}

#[test]
fn test_known_answers() {
    let p = HashProvider::new("MurmurHash2").unwrap();
    assert_eq!(p.compute_hash(""), "d9086e10");
    // one tail byte
    assert_eq!(p.compute_hash("a"), "7cb2d0a2");
    // two tail bytes
    assert_eq!(p.compute_hash("ab"), "2a26d812");
    // three tail bytes
    assert_eq!(p.compute_hash("abc"), "1b22941c");
    // exactly one block
    assert_eq!(p.compute_hash("abcd"), "f4b51ab1");
    assert_eq!(p.compute_hash("hello"), "bddb1d7f");
    assert_eq!(p.compute_hash("hello world"), "63c3d048");
    assert_eq!(p.compute_hash("transaction"), "265d920c");
}

#[test]
fn test_little_endian_output() {
    let h = murmur2_32(b"hello", DEFAULT_SEED);
    let bytes = murmur2_32_bytes(b"hello", DEFAULT_SEED);
    assert_eq!(bytes[0], (h & 0xff) as u8);
    assert_eq!(bytes[3], (h >> 24) as u8);
}

#[test]
fn test_seed_changes_output() {
    let default = HashProvider::with_algorithm(Algorithm::murmur2());
    let seeded = HashProvider::with_algorithm(Algorithm::Murmur2 { seed: 0 });
    assert_ne!(default.compute_hash("hello"), seeded.compute_hash("hello"));
    assert_eq!(seeded.compute_hash("hello").len(), 8);
    assert_eq!(seeded.algorithm().to_string(), "MurmurHash2(seed=0x00000000)");
}

#[test]
fn test_utf8_bytes() {
    // multi-byte chars are hashed as their UTF-8 encoding
    let s = "ação";
    assert_eq!(
        murmur2_32(s.as_bytes(), DEFAULT_SEED),
        murmur2_32(&[0x61, 0xc3, 0xa7, 0xc3, 0xa3, 0x6f], DEFAULT_SEED)
    );
}
