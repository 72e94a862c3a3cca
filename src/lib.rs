//! _Merkle Tree_ over transaction strings.
//!
//! Merkle tree (MT) implemented as an owned binary tree of hex hashes built
//! over an ordered list of transactions. The tree is parameterised by a
//! [`HashProvider`] chosen at runtime (SHA-1, SHA-2, SHA-3 families or the
//! non-cryptographic 32-bit MurmurHash2) and produces compact membership
//! proofs that can be checked against a known root without the tree.
//!
//! Leaves are the digests of the transactions, the list being padded with
//! empty strings to the next power of two. Interior nodes use canonical
//! pairing: the two child hashes are compared as strings and concatenated
//! smaller-first before hashing,
//!
//! ```text
//! LEAF(tx)      = ALG(tx)
//! NODE(a, b)    = ALG(min(a, b) || max(a, b))
//! ```
//!
//! so a node does not depend on which side each child occupies, and a
//! verifier never needs to trust the side recorded in a proof.
//!
//! Link: [](https://en.wikipedia.org/wiki/Merkle_tree)
//!
//! # Interface
//!
//! ```text
//! - HashProvider::new (name) -> provider
//! - MerkleTree::build (transactions, provider) -> tree
//! - root_hash -> hash
//! - proof_for (tx) -> proof
//! - verify (tx, proof, root) -> bool
//! ```
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use merkle_tx::{HashProvider, MerkleTree};
//!
//! let provider = Arc::new(HashProvider::new("SHA-256").unwrap());
//! let tree = MerkleTree::build(vec!["a", "b", "c"], provider).unwrap();
//!
//! let proof = tree.proof_for("b");
//! assert_eq!(proof.len(), 2);
//! assert!(tree.verify("b", &proof, tree.root_hash()));
//! assert!(tree.proof_for("z").is_empty());
//! ```

#![deny(
    missing_docs, unused_qualifications,
    missing_debug_implementations, missing_copy_implementations,
    trivial_casts, trivial_numeric_casts,
    unsafe_code, unstable_features,
    unused_import_braces
)]

/// Error taxonomy.
pub mod error;

/// Hash providers and algorithm selection.
pub mod hash;

/// MurmurHash2 32-bit.
pub mod murmur;

/// Tree nodes.
pub mod node;

/// Merkle tree inclusion proof.
pub mod proof;

/// Merkle tree construction, proofs and verification.
pub mod merkle;

/// Diagnostic rendering.
pub mod render;

pub use error::{Error, Result};
pub use hash::{Algorithm, CryptoDigest, HashProvider};
pub use merkle::MerkleTree;
pub use node::TreeNode;
pub use proof::{Proof, ProofStep, Side};


/// MurmurHash2 known answers.
#[cfg(test)]
mod test_murmur;
