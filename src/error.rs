use thiserror::Error;

/// Errors raised while configuring a hash provider or building a tree.
///
/// Proof verification never produces one of these: a proof that does not
/// check out is reported as `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Digest name not recognised by [`crate::hash::Algorithm`].
    #[error("unsupported hash algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// Tree construction was handed zero transactions.
    #[error("cannot build a merkle tree from an empty transaction list")]
    EmptyInput,

    /// Internal shape invariant broken during construction.
    #[error("merkle tree invariant violated: {0}")]
    Invariant(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
