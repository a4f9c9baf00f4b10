//! Error types for the knnlike-chain crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the knnlike-chain crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// Returned when a chain file cannot be read or written.
    #[error("I/O error on {}: {reason}", path.display())]
    Io {
        /// Path of the chain file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a token is not a number.
    #[error("line {line}, column {column}: cannot parse '{token}' as a number")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending token.
        token: String,
    },

    /// Returned when a row's width differs from the first row's.
    #[error("line {line} has {len} columns, expected {expected}")]
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Number of columns found.
        len: usize,
        /// Number of columns in the first row.
        expected: usize,
    },

    /// Returned when a chain has no rows.
    #[error("chain has no rows")]
    EmptyChain,

    /// Returned when rows are too narrow for the requested columns.
    #[error("chain has {n_cols} columns, need at least {required}")]
    TooFewColumns {
        /// Columns per row.
        n_cols: usize,
        /// Columns required.
        required: usize,
    },

    /// Returned when the number of parameters is zero.
    #[error("n_dim must be >= 1, got {n_dim}")]
    InvalidDimension {
        /// The invalid parameter count.
        n_dim: usize,
    },

    /// Returned when the worker count is zero.
    #[error("workers must be >= 1, got {workers}")]
    InvalidWorkers {
        /// The invalid worker count.
        workers: usize,
    },

    /// Returned when the worker pool cannot be created.
    #[error("failed to start worker pool: {reason}")]
    ThreadPool {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a derived quantity fails for a row.
    #[error("deriving quantities for row {row} failed: {reason}")]
    Derive {
        /// Zero-based row index.
        row: usize,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when rows produce different numbers of derived columns.
    #[error("row {row} produced {len} derived values, expected {expected}")]
    DerivedWidth {
        /// Zero-based row index.
        row: usize,
        /// Number of values produced.
        len: usize,
        /// Number produced by row 0.
        expected: usize,
    },
}
