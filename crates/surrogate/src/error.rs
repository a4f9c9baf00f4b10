//! Error types for the knnlike-surrogate crate.

use std::path::PathBuf;

use knnlike_index::IndexError;

/// Error type for all fallible operations in the knnlike-surrogate crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SurrogateError {
    /// Returned when parameter and log-likelihood samples differ in count.
    #[error("number of loglike samples {loglikes} does not match param samples {params}")]
    LengthMismatch {
        /// Number of parameter vectors.
        params: usize,
        /// Number of log-likelihood values.
        loglikes: usize,
    },

    /// Returned when an input contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when a query point has the wrong dimension.
    #[error("point length {point} does not match dimension {dim}")]
    DimensionMismatch {
        /// Length of the supplied point.
        point: usize,
        /// Dimension of the sample pool.
        dim: usize,
    },

    /// Returned when k is explicitly set to zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when a query is made before an index was built or loaded.
    #[error("search index not ready: call lazyload() or build() first")]
    IndexNotReady,

    /// Returned when a prior has unusable bounds.
    #[error("invalid prior for dimension {dim}: {reason}")]
    InvalidPrior {
        /// Dimension the prior applies to.
        dim: usize,
        /// Why the bounds were rejected.
        reason: String,
    },

    /// Wraps an error from the search index.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Wraps a failure reading a `.npy` sample file.
    #[error("failed to read {}: {reason}", path.display())]
    Npy {
        /// Path of the sample file.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },
}
