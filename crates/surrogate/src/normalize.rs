//! Per-dimension mapping of parameter vectors into the unit hypercube.

use knnlike_index::Points;
use tracing::warn;

/// Per-dimension minimum and range of a point set.
///
/// `normalize(v)[i] = (v[i] - min[i]) / range[i]`. A dimension whose range is
/// zero (every sample shares one value) maps to `0.0` instead of dividing by
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    min: Vec<f64>,
    range: Vec<f64>,
}

impl Normalizer {
    /// Computes bounds from `points`. Warns once per zero-range dimension.
    pub fn fit(points: &Points) -> Self {
        let dim = points.dim();
        let mut min = vec![f64::INFINITY; dim];
        let mut max = vec![f64::NEG_INFINITY; dim];
        for row in points.rows() {
            for (j, &v) in row.iter().enumerate() {
                min[j] = min[j].min(v);
                max[j] = max[j].max(v);
            }
        }
        let range: Vec<f64> = max.iter().zip(&min).map(|(hi, lo)| hi - lo).collect();

        for (dim, (&r, &lo)) in range.iter().zip(&min).enumerate() {
            if r == 0.0 {
                warn!(
                    dim,
                    value = lo,
                    "parameter has zero range across samples; normalising to 0"
                );
            }
        }
        Self { min, range }
    }

    /// Dimension of the bounds.
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Per-dimension minimum.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Per-dimension `max - min`.
    pub fn range(&self) -> &[f64] {
        &self.range
    }

    /// Dimensions whose range is zero.
    pub fn degenerate_dims(&self) -> Vec<usize> {
        self.range
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Writes the normalised form of `v` into `out`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `v` and `out` both have length [`Self::dim`].
    pub fn normalize_into(&self, v: &[f64], out: &mut [f64]) {
        debug_assert_eq!(v.len(), self.dim());
        debug_assert_eq!(out.len(), self.dim());
        for (j, o) in out.iter_mut().enumerate() {
            let r = self.range[j];
            *o = if r == 0.0 { 0.0 } else { (v[j] - self.min[j]) / r };
        }
    }

    /// Returns the normalised form of `v`.
    pub fn normalize(&self, v: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim()];
        self.normalize_into(v, &mut out);
        out
    }

    /// Normalises every row of `points` into a new flat buffer.
    pub(crate) fn normalize_flat(&self, points: &Points) -> Vec<f64> {
        let mut flat = vec![0.0; points.as_flat().len()];
        for (row, out) in points.rows().zip(flat.chunks_exact_mut(self.dim())) {
            self.normalize_into(row, out);
        }
        flat
    }
}
