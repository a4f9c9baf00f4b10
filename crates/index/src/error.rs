//! Error types for the knnlike-index crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the knnlike-index crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// Returned when the point set is empty.
    #[error("no points provided")]
    EmptyPoints,

    /// Returned when the point dimension is zero.
    #[error("dimension must be >= 1, got {dim}")]
    InvalidDimension {
        /// The invalid dimension.
        dim: usize,
    },

    /// Returned when the flat point buffer is not divisible by the dimension.
    #[error("points length {len} is not divisible by dimension {dim}")]
    PointsShapeMismatch {
        /// Length of the flat point buffer.
        len: usize,
        /// Expected dimension.
        dim: usize,
    },

    /// Returned when a row of a nested point list has the wrong length.
    #[error("row {row} has length {len}, expected {dim}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Expected dimension.
        dim: usize,
    },

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when the point set is too large for 32-bit point ids.
    #[error("{n_points} points exceed the index capacity of {max}")]
    TooManyPoints {
        /// Number of points supplied.
        n_points: usize,
        /// Largest supported point count.
        max: usize,
    },

    /// Returned when the number of trees is zero.
    #[error("n_trees must be >= 1, got {n_trees}")]
    InvalidTrees {
        /// The invalid tree count.
        n_trees: usize,
    },

    /// Returned when the vote threshold is zero or exceeds the tree count.
    #[error("votes must be in 1..={n_trees}, got {votes}")]
    InvalidVotes {
        /// The invalid vote threshold.
        votes: usize,
        /// Number of trees in the forest.
        n_trees: usize,
    },

    /// Returned when a query point has the wrong dimension.
    #[error("query length {query} does not match dimension {dim}")]
    QueryDimensionMismatch {
        /// Length of the query slice.
        query: usize,
        /// Dimension of the indexed points.
        dim: usize,
    },

    /// Returned when an input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when an index file does not exist.
    #[error("index file not found: {}", path.display())]
    NotFound {
        /// Path that was checked.
        path: PathBuf,
    },

    /// Wraps a filesystem failure while reading or writing an index file.
    #[error("index i/o error at {}: {reason}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when an index file fails its integrity checks.
    #[error("corrupt index file {}: {reason}", path.display())]
    Corrupt {
        /// Path of the rejected file.
        path: PathBuf,
        /// What failed to verify.
        reason: String,
    },

    /// Returned when an index file was built over a different point set.
    #[error("index file {} does not match the sample pool: {reason}", path.display())]
    Stale {
        /// Path of the rejected file.
        path: PathBuf,
        /// Which property disagreed.
        reason: String,
    },
}
