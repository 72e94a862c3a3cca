use std::fmt;

use crate::hash::HashProvider;

/// Merkle membership proof, ordered leaf to root.
///
/// An empty proof means the transaction was not found, and is also what a
/// single-leaf tree yields for its only transaction (the leaf is the root).
pub type Proof = Vec<ProofStep>;

/// Structural side a sibling occupied when the proof was extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Sibling was the left child.
    Left,
    /// Sibling was the right child.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        })
    }
}

/// One level of a [`Proof`].
///
/// `side` is informational only. Verification re-derives the pairing order
/// from the hashes themselves and never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProofStep {
    /// Hex hash of the sibling off the path.
    pub sibling_hash: String,
    /// Where the sibling sat.
    pub side: Side,
}

impl ProofStep {
    /// Creates a proof step.
    pub fn new(sibling_hash: impl Into<String>, side: Side) -> ProofStep {
        ProofStep {
            sibling_hash: sibling_hash.into(),
            side,
        }
    }
}

/// Short form: first 8 hex chars and the side, `9a3f01bc(RIGHT)`.
impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let short = self.sibling_hash.get(..8).unwrap_or(self.sibling_hash.as_str());
        write!(f, "{}({})", short, self.side)
    }
}

/// Replays a proof from a leaf hash and compares the result with
/// `expected_root`.
///
/// Total: any missing input, a step with an empty sibling hash, or a
/// mismatching root yields `false`.
pub fn verify_path(
    hasher: &HashProvider,
    leaf_hash: Option<&str>,
    proof: Option<&[ProofStep]>,
    expected_root: Option<&str>,
) -> bool {
    let (leaf_hash, proof, expected_root) = match (leaf_hash, proof, expected_root) {
        (Some(l), Some(p), Some(r)) => (l, p, r),
        _ => return false,
    };

    let mut h = leaf_hash.to_owned();
    for step in proof {
        if step.sibling_hash.is_empty() {
            return false;
        }
        h = hasher.combine(&h, &step.sibling_hash);
    }

    h == expected_root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display() {
        let step = ProofStep::new("0123456789abcdef", Side::Right);
        assert_eq!(step.to_string(), "01234567(RIGHT)");
        let short = ProofStep::new("ab", Side::Left);
        assert_eq!(short.to_string(), "ab(LEFT)");
    }

    #[test]
    fn test_verify_path_absent_inputs() {
        let p = HashProvider::default();
        let leaf = p.compute_hash("a");
        let sibling = p.compute_hash("b");
        let root = p.combine(&leaf, &sibling);
        let proof = vec![ProofStep::new(sibling, Side::Right)];

        assert!(verify_path(&p, Some(leaf.as_str()), Some(proof.as_slice()), Some(root.as_str())));
        assert!(!verify_path(&p, None, Some(proof.as_slice()), Some(root.as_str())));
        assert!(!verify_path(&p, Some(leaf.as_str()), None, Some(root.as_str())));
        assert!(!verify_path(&p, Some(leaf.as_str()), Some(proof.as_slice()), None));
    }

    #[test]
    fn test_verify_path_ignores_side() {
        let p = HashProvider::default();
        let leaf = p.compute_hash("a");
        let sibling = p.compute_hash("b");
        let root = p.combine(&leaf, &sibling);

        for side in &[Side::Left, Side::Right] {
            let proof = vec![ProofStep::new(sibling.clone(), *side)];
            assert!(verify_path(&p, Some(leaf.as_str()), Some(proof.as_slice()), Some(root.as_str())));
        }
    }

    #[test]
    fn test_verify_path_empty_sibling() {
        let p = HashProvider::default();
        let leaf = p.compute_hash("a");
        let proof = vec![ProofStep::new("", Side::Left)];
        assert!(!verify_path(&p, Some(leaf.as_str()), Some(proof.as_slice()), Some(leaf.as_str())));
    }
}
