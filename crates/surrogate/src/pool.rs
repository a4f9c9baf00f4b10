//! The immutable pool of precomputed samples.

use std::path::Path;

use knnlike_index::Points;
use ndarray::{Array1, Array2};
use ndarray_npy::read_npy;
use tracing::info;

use crate::error::SurrogateError;

/// Parameter vectors paired with their log-likelihoods.
///
/// Both sequences have the same length and every parameter vector has the
/// same dimension. There is no insertion API: a pool is fixed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePool {
    params: Points,
    loglikes: Vec<f64>,
}

impl SamplePool {
    /// Pairs parameter vectors with log-likelihoods.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::LengthMismatch`] if the counts differ, or
    /// [`SurrogateError::NonFiniteInput`] if any log-likelihood is NaN or
    /// infinite.
    pub fn new(params: Points, loglikes: Vec<f64>) -> Result<Self, SurrogateError> {
        if params.len() != loglikes.len() {
            return Err(SurrogateError::LengthMismatch {
                params: params.len(),
                loglikes: loglikes.len(),
            });
        }
        if loglikes.iter().any(|v| !v.is_finite()) {
            return Err(SurrogateError::NonFiniteInput {
                input: "loglike samples",
            });
        }
        Ok(Self { params, loglikes })
    }

    /// Loads a pool from two `.npy` files.
    ///
    /// `param_path` holds an `(n_samples, n_dims)` float64 array and
    /// `loglike_path` a length-`n_samples` float64 array.
    ///
    /// # Errors
    ///
    /// Returns [`SurrogateError::Npy`] if either file cannot be read or has
    /// the wrong shape or dtype, plus the errors of [`SamplePool::new`].
    pub fn from_npy(param_path: &Path, loglike_path: &Path) -> Result<Self, SurrogateError> {
        let npy_err = |path: &Path, reason: String| SurrogateError::Npy {
            path: path.to_path_buf(),
            reason,
        };

        let params: Array2<f64> =
            read_npy(param_path).map_err(|e| npy_err(param_path, e.to_string()))?;
        let loglikes: Array1<f64> =
            read_npy(loglike_path).map_err(|e| npy_err(loglike_path, e.to_string()))?;

        let (n_samples, n_dims) = params.dim();
        info!(n_samples, n_dims, "sample pool loaded");

        let points = Points::new(params.iter().copied().collect(), n_dims)?;
        Self::new(points, loglikes.to_vec())
    }

    /// The raw parameter vectors.
    pub fn params(&self) -> &Points {
        &self.params
    }

    /// The log-likelihood of each sample.
    pub fn loglikes(&self) -> &[f64] {
        &self.loglikes
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.loglikes.len()
    }

    /// Always false: [`Points`] cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.loglikes.is_empty()
    }

    /// Parameter-space dimension.
    pub fn dim(&self) -> usize {
        self.params.dim()
    }

    /// Splits the pool into its parts.
    pub(crate) fn into_parts(self) -> (Points, Vec<f64>) {
        (self.params, self.loglikes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let params = Points::from_rows(&[[0.0], [1.0]]).unwrap();
        let err = SamplePool::new(params, vec![-1.0]).unwrap_err();
        assert!(matches!(
            err,
            SurrogateError::LengthMismatch {
                params: 2,
                loglikes: 1
            }
        ));
    }

    #[test]
    fn test_rejects_nan_loglike() {
        let params = Points::from_rows(&[[0.0], [1.0]]).unwrap();
        let err = SamplePool::new(params, vec![-1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, SurrogateError::NonFiniteInput { .. }));
    }

    #[test]
    fn test_accessors() {
        let params = Points::from_rows(&[[0.0, 1.0], [1.0, 2.0]]).unwrap();
        let pool = SamplePool::new(params, vec![-1.0, -2.0]).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.dim(), 2);
        assert_eq!(pool.loglikes(), &[-1.0, -2.0]);
        assert_eq!(pool.params().row(1), &[1.0, 2.0]);
    }
}
