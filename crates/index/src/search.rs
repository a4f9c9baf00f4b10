//! The capability set shared by every search structure.

use std::path::Path;

use crate::error::IndexError;
use crate::points::Points;
use crate::result::Neighbors;

/// A k-nearest-neighbor search structure over a borrowed [`Points`] set.
///
/// Implementations hold only their own bookkeeping; the point set is passed
/// to every call so that one copy of the pool serves build, query and
/// persistence. Queries take `&self` and never mutate, so a built index can
/// be shared across threads.
pub trait SearchIndex: Sized + Send + Sync {
    /// Construction parameters.
    type Config: Sync;

    /// Builds an index over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the configuration is invalid.
    fn build(points: &Points, config: &Self::Config) -> Result<Self, IndexError>;

    /// Returns the `min(k, points.len())` nearest neighbors of `query`,
    /// sorted ascending by distance.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `k == 0` or `query` has the wrong dimension
    /// or non-finite values.
    fn query(&self, points: &Points, query: &[f64], k: usize) -> Result<Neighbors, IndexError>;

    /// Persists the index to `path`, replacing any existing file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file cannot be written.
    fn save(&self, points: &Points, path: &Path) -> Result<(), IndexError>;

    /// Loads an index previously saved over the same `points`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::NotFound`], [`IndexError::Io`],
    /// [`IndexError::Corrupt`] or [`IndexError::Stale`].
    fn load(points: &Points, path: &Path) -> Result<Self, IndexError>;
}

/// Validates `k` and `query` against `points`, returning the effective k.
pub(crate) fn check_query(points: &Points, query: &[f64], k: usize) -> Result<usize, IndexError> {
    if k == 0 {
        return Err(IndexError::InvalidK { k });
    }
    points.check_query(query)?;
    Ok(k.min(points.len()))
}
