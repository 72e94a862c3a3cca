//! Text rendering of trees and proofs for diagnostics.
//!
//! ```text
//!       5a8fb3a8
//!      /    \
//!  7cb2d0a2   f40f8c91
//! ```

use std::fmt;

use crate::merkle::MerkleTree;
use crate::node::TreeNode;
use crate::proof::ProofStep;

/// Default number of hash characters shown per node.
pub const DEFAULT_HASH_CHARS: usize = 8;

/// Every node hash, one line per level, root first.
#[derive(Debug, Clone, Copy)]
pub struct LevelOrder<'a>(pub &'a MerkleTree);

impl<'a> fmt::Display for LevelOrder<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut level = vec![self.0.root()];
        while !level.is_empty() {
            let line: Vec<&str> = level.iter().map(|n| n.hash()).collect();
            writeln!(f, "{}", line.join(" "))?;
            level = level
                .iter()
                .filter_map(|n| n.children())
                .flat_map(|(l, r)| vec![l, r])
                .collect();
        }
        Ok(())
    }
}

/// ASCII-art tree with each hash shortened to `hash_chars` characters.
#[derive(Debug, Clone, Copy)]
pub struct PrettyTree<'a> {
    tree: &'a MerkleTree,
    hash_chars: usize,
}

impl<'a> PrettyTree<'a> {
    /// Pretty printer with [`DEFAULT_HASH_CHARS`].
    pub fn new(tree: &'a MerkleTree) -> PrettyTree<'a> {
        PrettyTree::with_hash_chars(tree, DEFAULT_HASH_CHARS)
    }

    /// Pretty printer showing `hash_chars` characters per node (at least 1).
    pub fn with_hash_chars(tree: &'a MerkleTree, hash_chars: usize) -> PrettyTree<'a> {
        PrettyTree {
            tree,
            hash_chars: hash_chars.max(1),
        }
    }
}

impl<'a> fmt::Display for PrettyTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let root = self.tree.root();
        let height = root.height();
        let hash_chars = self.hash_chars;

        let total_slots = 1usize << (height - 1);
        let cell_width = hash_chars.max(3) + 2;
        let total_width = total_slots * cell_width;

        let mut level: Vec<Option<&TreeNode>> = vec![Some(root)];
        let mut depth = 0;
        let mut line = String::new();

        while depth < height && level.iter().any(Option::is_some) {
            let nodes = level.len();
            let gap = (total_slots / nodes).max(1) * cell_width;
            let between = gap - hash_chars;
            let left_margin = total_width.saturating_sub(nodes * gap) / 2;
            let left_pad = between / 2;

            line.clear();
            pad(&mut line, left_margin);
            for node in &level {
                pad(&mut line, left_pad);
                match node {
                    Some(n) => line.push_str(shorten(n.hash(), hash_chars)),
                    None => line.push('·'),
                }
                pad(&mut line, between);
            }
            writeln!(f, "{}", line.trim_end())?;

            if depth + 1 < height {
                let branch_pad = left_pad.saturating_sub(1);
                let mid = (between + 2).saturating_sub(2 * branch_pad).max(1);

                line.clear();
                pad(&mut line, left_margin);
                for node in &level {
                    pad(&mut line, branch_pad);
                    line.push(if node.is_some() { '/' } else { ' ' });
                    pad(&mut line, mid);
                    line.push(if node.is_some() { '\\' } else { ' ' });
                    pad(&mut line, branch_pad);
                }
                writeln!(f, "{}", line.trim_end())?;
            }

            level = level
                .iter()
                .flat_map(|n| match n.and_then(TreeNode::children) {
                    Some((l, r)) => [Some(l), Some(r)],
                    None => [None, None],
                })
                .collect();
            depth += 1;
        }
        Ok(())
    }
}

/// Proof as `[ 9a3f01bc(RIGHT)  77e0c2d4(LEFT) ]`.
#[derive(Debug, Clone, Copy)]
pub struct ProofDisplay<'a>(pub &'a [ProofStep]);

impl<'a> fmt::Display for ProofDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("[]");
        }
        f.write_str("[ ")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{}", step)?;
        }
        f.write_str(" ]")
    }
}

fn pad(line: &mut String, n: usize) {
    line.extend(std::iter::repeat(' ').take(n));
}

fn shorten(hash: &str, n: usize) -> &str {
    hash.get(..n).unwrap_or(hash)
}
