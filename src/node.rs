use crate::hash::HashProvider;

/// Node of a built merkle tree.
///
/// A node is either a leaf, carrying the digest of one (possibly padding)
/// transaction, or an interior node that owns exactly two children and
/// carries `combine(left.hash, right.hash)`. There are no half-filled
/// interior nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    hash: String,
    children: Option<Box<(TreeNode, TreeNode)>>,
}

impl TreeNode {
    /// Wraps an already computed leaf hash.
    pub fn leaf(hash: String) -> TreeNode {
        TreeNode {
            hash,
            children: None,
        }
    }

    /// Joins two subtrees under a new parent, hashing the children in
    /// canonical order.
    pub fn interior(left: TreeNode, right: TreeNode, hasher: &HashProvider) -> TreeNode {
        let hash = hasher.combine(&left.hash, &right.hash);
        TreeNode {
            hash,
            children: Some(Box::new((left, right))),
        }
    }

    /// Hex hash of this node.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// `true` for leafs.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Both children of an interior node, `None` for a leaf.
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        self.children.as_deref().map(|(l, r)| (l, r))
    }

    /// Left child.
    pub fn left(&self) -> Option<&TreeNode> {
        self.children().map(|(l, _)| l)
    }

    /// Right child.
    pub fn right(&self) -> Option<&TreeNode> {
        self.children().map(|(_, r)| r)
    }

    /// Number of levels below and including this node; 1 for a leaf.
    pub fn height(&self) -> usize {
        match self.children() {
            None => 1,
            Some((l, r)) => 1 + l.height().max(r.height()),
        }
    }
}
