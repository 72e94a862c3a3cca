//! Hash infrastructure for transactions and tree nodes.
//!
//! A [`HashProvider`] turns strings into lowercase hex digests under one
//! [`Algorithm`] fixed at construction. Providers are plain immutable values:
//! two providers configured differently never observe each other, and one
//! provider can be shared (e.g. behind an `Arc`) by any number of trees and
//! verifying threads.
//!
//! ```text
//! "tx"  --utf-8-->  bytes  --digest-->  [u8; N]  --hex-->  "9a3f..."
//! ```
//!
//! Interior nodes are hashed with [`HashProvider::combine`], which orders the
//! two child hashes before concatenating them, so `combine(a, b)` equals
//! `combine(b, a)`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use ring::digest;
use sha2::Digest as _;

use crate::error::{Error, Result};
use crate::murmur;

/// Cryptographic digests backed by `ring`, `sha2`, `sha3` and `md-5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptoDigest {
    /// MD5 (legacy).
    Md5,
    /// SHA-1 (legacy).
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
    /// SHA-512 truncated to 224 bits.
    Sha512_224,
    /// SHA-512 truncated to 256 bits.
    Sha512_256,
    /// SHA3-224.
    Sha3_224,
    /// SHA3-256.
    Sha3_256,
    /// SHA3-384.
    Sha3_384,
    /// SHA3-512.
    Sha3_512,
}

impl CryptoDigest {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            CryptoDigest::Md5 => "MD5",
            CryptoDigest::Sha1 => "SHA-1",
            CryptoDigest::Sha224 => "SHA-224",
            CryptoDigest::Sha256 => "SHA-256",
            CryptoDigest::Sha384 => "SHA-384",
            CryptoDigest::Sha512 => "SHA-512",
            CryptoDigest::Sha512_224 => "SHA-512/224",
            CryptoDigest::Sha512_256 => "SHA-512/256",
            CryptoDigest::Sha3_224 => "SHA3-224",
            CryptoDigest::Sha3_256 => "SHA3-256",
            CryptoDigest::Sha3_384 => "SHA3-384",
            CryptoDigest::Sha3_512 => "SHA3-512",
        }
    }

    /// Raw digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            CryptoDigest::Md5 => 16,
            CryptoDigest::Sha1 => 20,
            CryptoDigest::Sha224 | CryptoDigest::Sha512_224 | CryptoDigest::Sha3_224 => 28,
            CryptoDigest::Sha256 | CryptoDigest::Sha512_256 | CryptoDigest::Sha3_256 => 32,
            CryptoDigest::Sha384 | CryptoDigest::Sha3_384 => 48,
            CryptoDigest::Sha512 | CryptoDigest::Sha3_512 => 64,
        }
    }

    fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            CryptoDigest::Md5 => md5::Md5::digest(data).to_vec(),
            CryptoDigest::Sha1 => ring_digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, data),
            CryptoDigest::Sha224 => sha2::Sha224::digest(data).to_vec(),
            CryptoDigest::Sha256 => ring_digest(&digest::SHA256, data),
            CryptoDigest::Sha384 => ring_digest(&digest::SHA384, data),
            CryptoDigest::Sha512 => ring_digest(&digest::SHA512, data),
            CryptoDigest::Sha512_224 => sha2::Sha512_224::digest(data).to_vec(),
            CryptoDigest::Sha512_256 => ring_digest(&digest::SHA512_256, data),
            CryptoDigest::Sha3_224 => sha3::Sha3_224::digest(data).to_vec(),
            CryptoDigest::Sha3_256 => sha3::Sha3_256::digest(data).to_vec(),
            CryptoDigest::Sha3_384 => sha3::Sha3_384::digest(data).to_vec(),
            CryptoDigest::Sha3_512 => sha3::Sha3_512::digest(data).to_vec(),
        }
    }
}

#[inline]
fn ring_digest(alg: &'static digest::Algorithm, data: &[u8]) -> Vec<u8> {
    digest::digest(alg, data).as_ref().to_vec()
}

/// Hashing algorithm selector, held by value in every [`HashProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// A standard cryptographic digest.
    Cryptographic(CryptoDigest),
    /// 32-bit MurmurHash2 with the given seed.
    Murmur2 {
        /// Initial hash state.
        seed: u32,
    },
}

impl Algorithm {
    /// MurmurHash2 with [`murmur::DEFAULT_SEED`].
    pub fn murmur2() -> Algorithm {
        Algorithm::Murmur2 {
            seed: murmur::DEFAULT_SEED,
        }
    }

    /// Length of the hex digest produced by this algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Cryptographic(d) => 2 * d.output_len(),
            Algorithm::Murmur2 { .. } => 8,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Algorithm {
        Algorithm::Cryptographic(CryptoDigest::Sha256)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Names are matched case-insensitively with `-` and `_` ignored, so
    /// `SHA-256`, `sha256` and `SHA_256` are the same algorithm, as are
    /// `SHA3-256` and `SHA-3-256`. A seeded MurmurHash2 is written
    /// `MurmurHash2(seed=0x1234abcd)` (hex) or `MurmurHash2(seed=42)`.
    fn from_str(name: &str) -> Result<Algorithm> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if let Some(seed) = murmur_seed(&key) {
            return seed
                .map(|seed| Algorithm::Murmur2 { seed })
                .ok_or_else(|| Error::UnsupportedAlgorithm(name.to_owned()));
        }

        let digest = match key.as_str() {
            "MURMURHASH2" | "MURMUR2" => return Ok(Algorithm::murmur2()),
            "MD5" => CryptoDigest::Md5,
            "SHA1" => CryptoDigest::Sha1,
            "SHA224" => CryptoDigest::Sha224,
            "SHA256" => CryptoDigest::Sha256,
            "SHA384" => CryptoDigest::Sha384,
            "SHA512" => CryptoDigest::Sha512,
            "SHA512/224" => CryptoDigest::Sha512_224,
            "SHA512/256" => CryptoDigest::Sha512_256,
            "SHA3224" => CryptoDigest::Sha3_224,
            "SHA3256" => CryptoDigest::Sha3_256,
            "SHA3384" => CryptoDigest::Sha3_384,
            "SHA3512" => CryptoDigest::Sha3_512,
            _ => return Err(Error::UnsupportedAlgorithm(name.to_owned())),
        };
        Ok(Algorithm::Cryptographic(digest))
    }
}

// `Some(None)` when the key has the seeded form but the seed is malformed.
fn murmur_seed(key: &str) -> Option<Option<u32>> {
    let inner = key
        .strip_prefix("MURMURHASH2(SEED=")
        .or_else(|| key.strip_prefix("MURMUR2(SEED="))?
        .strip_suffix(')');
    Some(inner.and_then(|seed| match seed.strip_prefix("0X") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => seed.parse().ok(),
    }))
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Cryptographic(d) => f.write_str(d.name()),
            Algorithm::Murmur2 { seed } if *seed == murmur::DEFAULT_SEED => {
                f.write_str("MurmurHash2")
            }
            Algorithm::Murmur2 { seed } => write!(f, "MurmurHash2(seed={:#010x})", seed),
        }
    }
}

/// Computes hex digests of strings under a fixed [`Algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashProvider {
    algorithm: Algorithm,
}

impl HashProvider {
    /// Creates a provider from an algorithm name, e.g. `"SHA-256"` or
    /// `"MurmurHash2"`.
    pub fn new(name: &str) -> Result<HashProvider> {
        name.parse().map(HashProvider::with_algorithm)
    }

    /// Creates a provider for an already selected algorithm.
    pub fn with_algorithm(algorithm: Algorithm) -> HashProvider {
        HashProvider { algorithm }
    }

    /// Returns the configured algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of hex characters in every digest this provider returns.
    pub fn digest_len(&self) -> usize {
        self.algorithm.hex_len()
    }

    /// Returns the raw digest of `data`.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self.algorithm {
            Algorithm::Cryptographic(d) => d.digest(data),
            Algorithm::Murmur2 { seed } => murmur::murmur2_32_bytes(data, seed).to_vec(),
        }
    }

    /// Returns the lowercase hex digest of the UTF-8 bytes of `data`.
    #[inline]
    pub fn compute_hash(&self, data: &str) -> String {
        hex::encode(self.digest(data.as_bytes()))
    }

    /// Hashes every element, preserving order.
    #[cfg(not(feature = "parallel"))]
    pub fn compute_hash_batch<S: AsRef<str> + Sync>(&self, data: &[S]) -> Vec<String> {
        data.iter().map(|s| self.compute_hash(s.as_ref())).collect()
    }

    /// Hashes every element, preserving order.
    #[cfg(feature = "parallel")]
    pub fn compute_hash_batch<S: AsRef<str> + Sync>(&self, data: &[S]) -> Vec<String> {
        use rayon::prelude::*;

        data.par_iter()
            .map(|s| self.compute_hash(s.as_ref()))
            .collect()
    }

    /// Hash of two node hashes in canonical order: the smaller string (plain
    /// byte-wise comparison) goes first. Commutative in its arguments.
    pub fn combine(&self, a: &str, b: &str) -> String {
        let (first, second) = canonical_order(a, b);
        let mut joined = String::with_capacity(first.len() + second.len());
        joined.push_str(first);
        joined.push_str(second);
        self.compute_hash(&joined)
    }
}

/// Orders two hashes for concatenation.
///
/// Byte-wise lexicographic comparison of the hex strings. Roots computed by
/// other implementations only match if they order pairs the same way.
#[inline]
pub fn canonical_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    match a.cmp(b) {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        let sha256 = Algorithm::Cryptographic(CryptoDigest::Sha256);
        assert_eq!("SHA-256".parse::<Algorithm>().unwrap(), sha256);
        assert_eq!("sha256".parse::<Algorithm>().unwrap(), sha256);
        assert_eq!(
            "SHA-3-256".parse::<Algorithm>().unwrap(),
            "SHA3-256".parse::<Algorithm>().unwrap()
        );
        assert_eq!(
            "MurmurHash2".parse::<Algorithm>().unwrap(),
            Algorithm::Murmur2 {
                seed: murmur::DEFAULT_SEED
            }
        );
        assert_eq!(
            "SHA-512/256".parse::<Algorithm>().unwrap(),
            Algorithm::Cryptographic(CryptoDigest::Sha512_256)
        );
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            HashProvider::new("MD4"),
            Err(Error::UnsupportedAlgorithm("MD4".to_owned()))
        );
        assert!(HashProvider::new("").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for name in &[
            "MD5",
            "SHA-1",
            "SHA-224",
            "SHA-256",
            "SHA-384",
            "SHA-512",
            "SHA-512/224",
            "SHA-512/256",
            "SHA3-224",
            "SHA3-256",
            "SHA3-384",
            "SHA3-512",
            "MurmurHash2",
            "MurmurHash2(seed=0x00000000)",
            "MurmurHash2(seed=0x1234abcd)",
        ] {
            let alg: Algorithm = name.parse().unwrap();
            assert_eq!(alg.to_string(), *name);
        }
    }

    #[test]
    fn test_parse_seeded_murmur() {
        assert_eq!(
            "MurmurHash2(seed=0x1234abcd)".parse::<Algorithm>().unwrap(),
            Algorithm::Murmur2 { seed: 0x1234_abcd }
        );
        assert_eq!(
            "murmur2(seed=42)".parse::<Algorithm>().unwrap(),
            Algorithm::Murmur2 { seed: 42 }
        );
        assert_eq!(
            "MurmurHash2(seed=0x9747b28c)".parse::<Algorithm>().unwrap(),
            Algorithm::murmur2()
        );
        for bad in &["MurmurHash2(seed=)", "MurmurHash2(seed=0xzz)", "MurmurHash2(seed=1"] {
            assert_eq!(
                bad.parse::<Algorithm>(),
                Err(Error::UnsupportedAlgorithm((*bad).to_owned()))
            );
        }
    }

    #[test]
    fn test_digest_len_matches_output() {
        for name in &[
            "MD5",
            "SHA-1",
            "SHA-224",
            "SHA-384",
            "SHA-512/224",
            "SHA3-224",
            "SHA3-512",
            "MurmurHash2",
        ] {
            let p = HashProvider::new(name).unwrap();
            assert_eq!(p.compute_hash("abc").len(), p.digest_len(), "{}", name);
        }
    }

    #[test]
    fn test_combine_is_commutative() {
        let p = HashProvider::default();
        let a = p.compute_hash("a");
        let b = p.compute_hash("b");
        assert_eq!(p.combine(&a, &b), p.combine(&b, &a));
        assert_ne!(p.combine(&a, &b), p.combine(&a, &a));
    }

    #[test]
    fn test_batch_preserves_order() {
        let p = HashProvider::new("MurmurHash2").unwrap();
        let txs = ["x", "y", "z", ""];
        let batch = p.compute_hash_batch(&txs);
        let single: Vec<String> = txs.iter().map(|t| p.compute_hash(t)).collect();
        assert_eq!(batch, single);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_batch_matches_sequential() {
        let p = HashProvider::default();
        let txs: Vec<String> = (0..4096).map(|i| format!("tx-{}", i)).collect();
        let batch = p.compute_hash_batch(&txs);
        assert_eq!(batch.len(), txs.len());
        for (tx, h) in txs.iter().zip(&batch) {
            assert_eq!(*h, p.compute_hash(tx));
        }
    }

    #[test]
    fn test_independent_providers() {
        let murmur = HashProvider::new("MurmurHash2").unwrap();
        let sha = HashProvider::new("SHA-256").unwrap();
        assert_eq!(murmur.compute_hash("a").len(), 8);
        assert_eq!(sha.compute_hash("a").len(), 64);
        assert_eq!(murmur.compute_hash("a"), "7cb2d0a2");
    }
}
