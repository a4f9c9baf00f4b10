//! Exact brute-force search.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::sq_distances_to;
use crate::error::IndexError;
use crate::persist::{read_index, write_index};
use crate::points::Points;
use crate::result::Neighbors;
use crate::search::{SearchIndex, check_query};
use crate::select::select_k_nearest;

const KIND: &str = "exact";

/// Linear scan over every point.
///
/// Answers are exact; cost is `O(n)` per query. Useful as a reference for
/// the approximate forest and for pools small enough not to need one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExactIndex {
    n_points: usize,
}

impl ExactIndex {
    /// Number of points the index was built over.
    pub fn n_points(&self) -> usize {
        self.n_points
    }
}

impl SearchIndex for ExactIndex {
    type Config = ();

    fn build(points: &Points, _config: &()) -> Result<Self, IndexError> {
        Ok(Self {
            n_points: points.len(),
        })
    }

    fn query(&self, points: &Points, query: &[f64], k: usize) -> Result<Neighbors, IndexError> {
        let k_eff = check_query(points, query, k)?;
        Ok(scan(points, query, k_eff))
    }

    fn save(&self, points: &Points, path: &Path) -> Result<(), IndexError> {
        write_index(path, KIND, points, self)
    }

    fn load(points: &Points, path: &Path) -> Result<Self, IndexError> {
        read_index(path, KIND, points)
    }
}

/// Exact k-nearest scan; `k_eff` must already be clamped to `points.len()`.
pub(crate) fn scan(points: &Points, query: &[f64], k_eff: usize) -> Neighbors {
    let mut pairs = Vec::with_capacity(points.len());
    sq_distances_to(
        points.as_flat(),
        points.dim(),
        0..points.len(),
        query,
        &mut pairs,
    );
    select_k_nearest(&mut pairs, k_eff)
}
