//! Options controlling how neighbors are combined into an estimate.

use crate::error::SurrogateError;

/// Options for [`LogLike::estimate_with`](crate::LogLike::estimate_with).
///
/// # Example
///
/// ```
/// use knnlike_surrogate::EstimateOptions;
///
/// let options = EstimateOptions::new().with_k(Some(8)).with_weighted(false);
/// assert_eq!(options.k_for_dim(4), 8);
/// assert_eq!(EstimateOptions::new().k_for_dim(4), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOptions {
    /// Neighbor count. `None` means `dim + 1`.
    k: Option<usize>,
    /// Inverse-distance weighting when true, plain mean when false.
    weighted: bool,
    /// Average log-likelihoods when true, likelihoods when false.
    average_loglike: bool,
}

impl EstimateOptions {
    /// Creates the default options: `k = dim + 1`, weighted, averaging likelihoods.
    pub fn new() -> Self {
        Self {
            k: None,
            weighted: true,
            average_loglike: false,
        }
    }

    /// Sets the neighbor count.
    pub fn with_k(mut self, k: Option<usize>) -> Self {
        self.k = k;
        self
    }

    /// Enables or disables inverse-distance weighting.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Chooses between averaging log-likelihoods and likelihoods.
    pub fn with_average_loglike(mut self, average_loglike: bool) -> Self {
        self.average_loglike = average_loglike;
        self
    }

    /// Returns the configured neighbor count.
    pub fn k(&self) -> Option<usize> {
        self.k
    }

    /// Returns the neighbor count to use for a pool of dimension `dim`.
    pub fn k_for_dim(&self, dim: usize) -> usize {
        self.k.unwrap_or(dim + 1)
    }

    /// Returns whether inverse-distance weighting is enabled.
    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// Returns whether log-likelihoods (rather than likelihoods) are averaged.
    pub fn average_loglike(&self) -> bool {
        self.average_loglike
    }

    /// Validates these options.
    ///
    /// Returns an error if `k` is explicitly zero.
    pub fn validate(&self) -> Result<(), SurrogateError> {
        match self.k {
            Some(0) => Err(SurrogateError::InvalidK { k: 0 }),
            _ => Ok(()),
        }
    }
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self::new()
    }
}
