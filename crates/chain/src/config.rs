//! Configuration for chain augmentation.

use std::num::NonZeroUsize;

use crate::error::ChainError;

/// Which chain columns hold parameters, and how many workers to use.
///
/// # Example
///
/// ```
/// use knnlike_chain::TransformConfig;
///
/// let config = TransformConfig::new().with_n_dim(4).with_workers(Some(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    /// Number of parameter columns.
    n_dim: usize,
    /// Index of the first parameter column.
    param_offset: usize,
    /// Worker count. `None` uses every available core.
    workers: Option<usize>,
}

impl TransformConfig {
    /// Creates a new configuration.
    ///
    /// Defaults: `n_dim = 4`, `param_offset = 2`, `workers = None`.
    pub fn new() -> Self {
        Self {
            n_dim: 4,
            param_offset: 2,
            workers: None,
        }
    }

    /// Sets the number of parameter columns.
    pub fn with_n_dim(mut self, n_dim: usize) -> Self {
        self.n_dim = n_dim;
        self
    }

    /// Sets the first parameter column.
    pub fn with_param_offset(mut self, param_offset: usize) -> Self {
        self.param_offset = param_offset;
        self
    }

    /// Sets the worker count.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Returns the number of parameter columns.
    pub fn n_dim(&self) -> usize {
        self.n_dim
    }

    /// Returns the first parameter column.
    pub fn param_offset(&self) -> usize {
        self.param_offset
    }

    /// Returns the requested worker count.
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }

    /// Worker count actually used: the request capped at the available
    /// parallelism, or all of it if none was requested.
    pub fn effective_workers(&self) -> usize {
        let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        self.workers.map_or(available, |w| w.min(available))
    }

    /// Validates this configuration.
    ///
    /// Returns an error if `n_dim < 1` or `workers == Some(0)`.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.n_dim < 1 {
            return Err(ChainError::InvalidDimension { n_dim: self.n_dim });
        }
        if self.workers == Some(0) {
            return Err(ChainError::InvalidWorkers { workers: 0 });
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new()
    }
}
