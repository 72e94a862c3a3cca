use std::sync::Arc;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::hash::HashProvider;
use crate::node::TreeNode;
use crate::proof::{verify_path, Proof, ProofStep, Side};

/// Merkle Tree.
///
/// A merkle tree is a tree in which every non-leaf node is the hash of its
/// children nodes. A diagram depicting how it works:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
/// ```
///
/// where `+` concatenates the two hex hashes smaller-first (see
/// [`HashProvider::combine`]), so `h(h1 + h2) == h(h2 + h1)`.
///
/// The number of inputs is not always a power of two. In that case the
/// transaction list is extended with empty strings up to the next power of
/// two and the padding entries are hashed like any other transaction, which
/// keeps the tree perfectly balanced. A real empty-string transaction is
/// indistinguishable from padding.
///
/// The tree is built once and never mutated afterwards; it can be shared
/// between threads for proof extraction and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    transactions: Vec<String>,
    leafs: usize,
    height: usize,
    root: TreeNode,
    hasher: Arc<HashProvider>,
}

impl MerkleTree {
    /// Builds a tree over `transactions`, padding them to a power of two.
    ///
    /// Fails with [`Error::EmptyInput`] when there is nothing to build on.
    pub fn build<I, S>(transactions: I, hasher: Arc<HashProvider>) -> Result<MerkleTree>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut transactions: Vec<String> = transactions.into_iter().map(Into::into).collect();

        let leafs = transactions.len();
        if leafs == 0 {
            return Err(Error::EmptyInput);
        }

        let pow = next_pow2(leafs);
        transactions.resize(pow, String::new());
        if !transactions.len().is_power_of_two() {
            return Err(Error::Invariant(format!(
                "padded transaction count {} is not a power of two",
                transactions.len()
            )));
        }

        let height = log2_pow2(pow);
        debug!(
            "building merkle tree: {} transactions, {} padded, {} levels, {}",
            leafs,
            pow,
            height,
            hasher.algorithm()
        );

        let mut level: Vec<TreeNode> = hasher
            .compute_hash_batch(&transactions)
            .into_iter()
            .map(TreeNode::leaf)
            .collect();

        while level.len() > 1 {
            level = reduce_level(level, &hasher)?;
        }

        let root = level
            .pop()
            .ok_or_else(|| Error::Invariant("reduction produced no root".to_owned()))?;

        Ok(MerkleTree {
            transactions,
            leafs,
            height,
            root,
            hasher,
        })
    }

    /// Returns merkle root hash.
    pub fn root_hash(&self) -> &str {
        self.root.hash()
    }

    /// Returns the root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Returns height of the tree, `log2` of the padded leaf count.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns original number of transactions the tree was built upon.
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Padded transaction list, one entry per leaf.
    pub fn transactions(&self) -> &[String] {
        &self.transactions
    }

    /// Provider the tree was hashed with.
    pub fn hash_provider(&self) -> &Arc<HashProvider> {
        &self.hasher
    }

    /// `true` if some leaf carries the hash of `tx`.
    pub fn contains(&self, tx: &str) -> bool {
        let leaf_hash = self.hasher.compute_hash(tx);
        find_leaf(&self.root, &leaf_hash)
    }

    /// Generates the inclusion proof for `tx`, ordered leaf to root.
    ///
    /// Returns an empty proof if `tx` is not in the tree. A single-leaf tree
    /// also yields an empty proof for its only transaction; use
    /// [`MerkleTree::contains`] to tell the two apart.
    pub fn proof_for(&self, tx: &str) -> Proof {
        let leaf_hash = self.hasher.compute_hash(tx);

        let mut proof = Vec::with_capacity(self.height);
        if collect_path(&self.root, &leaf_hash, &mut proof) {
            trace!("proof for leaf {}: {} steps", leaf_hash, proof.len());
            proof
        } else {
            trace!("no leaf {} in tree", leaf_hash);
            Vec::new()
        }
    }

    /// Verifies that `tx` hashes up to `expected_root` along `proof`.
    pub fn verify(&self, tx: &str, proof: &[ProofStep], expected_root: &str) -> bool {
        let leaf_hash = self.hasher.compute_hash(tx);
        verify_path(
            &self.hasher,
            Some(leaf_hash.as_str()),
            Some(proof),
            Some(expected_root),
        )
    }

    /// Same as [`MerkleTree::verify`], starting from an already hashed leaf.
    pub fn verify_from_leaf_hash(
        &self,
        leaf_hash: &str,
        proof: &[ProofStep],
        expected_root: &str,
    ) -> bool {
        verify_path(&self.hasher, Some(leaf_hash), Some(proof), Some(expected_root))
    }
}

/// Pairs nodes `(2i, 2i + 1)` of one level into their parents.
fn reduce_level(level: Vec<TreeNode>, hasher: &HashProvider) -> Result<Vec<TreeNode>> {
    let width = level.len();
    if width & 1 == 1 {
        return Err(Error::Invariant(format!("odd level width {}", width)));
    }

    let mut next = Vec::with_capacity(width >> 1);
    let mut nodes = level.into_iter();
    while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
        next.push(TreeNode::interior(left, right, hasher));
    }
    Ok(next)
}

// Recursion depth is bounded by the tree height.
fn collect_path(node: &TreeNode, leaf_hash: &str, acc: &mut Proof) -> bool {
    match node.children() {
        None => node.hash() == leaf_hash,
        Some((left, right)) => {
            if collect_path(left, leaf_hash, acc) {
                acc.push(ProofStep::new(right.hash(), Side::Right));
                true
            } else if collect_path(right, leaf_hash, acc) {
                acc.push(ProofStep::new(left.hash(), Side::Left));
                true
            } else {
                false
            }
        }
    }
}

fn find_leaf(node: &TreeNode, leaf_hash: &str) -> bool {
    match node.children() {
        None => node.hash() == leaf_hash,
        Some((left, right)) => find_leaf(left, leaf_hash) || find_leaf(right, leaf_hash),
    }
}

/// `next_pow2` returns next highest power of two from a given number if
/// it is not already a power of two. `n` must be positive.
///
/// [](http://locklessinc.com/articles/next_pow2/)
/// [](https://stackoverflow.com/questions/466204/rounding-up-to-next-power-of-2/466242#466242)
pub fn next_pow2(mut n: usize) -> usize {
    debug_assert!(n > 0);
    n -= 1;
    n |= n >> 1;
    n |= n >> 2;
    n |= n >> 4;
    n |= n >> 8;
    n |= n >> 16;
    #[cfg(target_pointer_width = "64")]
    {
        n |= n >> 32;
    }
    n + 1
}

/// find power of 2 of a number which is power of 2
pub fn log2_pow2(n: usize) -> usize {
    n.trailing_zeros() as usize
}
